use sqlx::PgPool;

use crate::{error::Result, models::Image};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Image>> {
    let image = sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(image)
}

pub async fn create_image(
    pool: &PgPool,
    url: &str,
    description: &str,
    owner_id: Option<i32>,
) -> Result<Image> {
    let image = sqlx::query_as::<_, Image>(
        "INSERT INTO images (url, description, owner_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(url)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(image)
}
