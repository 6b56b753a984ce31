mod app_config;
mod s3_config;

pub use app_config::{
    AppConfig, AuthConfig, BlobConfig, CorsConfig, DatabaseConfig, Environment, ServerConfig,
};
pub use s3_config::*;
