mod image;
mod list;
mod product;
mod review;
mod seller;
mod user;

pub use image::*;
pub use list::*;
pub use product::*;
pub use review::*;
pub use seller::*;
pub use user::*;
