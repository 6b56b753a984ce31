mod blob_service;
pub mod session;

pub use blob_service::BlobStore;
