pub mod image_queries;
pub mod list_queries;
pub mod product_queries;
pub mod review_queries;
pub mod seller_queries;
pub mod user_queries;
