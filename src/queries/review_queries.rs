use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Review, ReviewView},
};

pub async fn find_by_product(pool: &PgPool, product_id: i32) -> Result<Vec<ReviewView>> {
    let reviews = sqlx::query_as::<_, ReviewView>(
        "SELECT r.id, r.rating, r.review, u.display_name AS reviewer_name
         FROM reviews r
         JOIN users u ON u.id = r.user_id
         WHERE r.product_id = $1
         ORDER BY r.id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn create_review(
    pool: &PgPool,
    product_id: i32,
    user_id: i32,
    rating: i32,
    review: &str,
) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (rating, review, user_id, product_id)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(rating)
    .bind(review)
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;

    Ok(review)
}
