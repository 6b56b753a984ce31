use sqlx::PgPool;

use crate::{error::Result, models::Seller};

const SELLER_LIST_LIMIT: i64 = 10;

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Seller>> {
    let seller = sqlx::query_as::<_, Seller>("SELECT * FROM sellers WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(seller)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Seller>> {
    let seller = sqlx::query_as::<_, Seller>("SELECT * FROM sellers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(seller)
}

pub async fn list_sellers(pool: &PgPool) -> Result<Vec<Seller>> {
    let sellers = sqlx::query_as::<_, Seller>("SELECT * FROM sellers ORDER BY id LIMIT $1")
        .bind(SELLER_LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(sellers)
}

pub async fn create_seller(
    pool: &PgPool,
    email: &str,
    credential_hash: &str,
    display_name: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Seller> {
    let seller = sqlx::query_as::<_, Seller>(
        "INSERT INTO sellers (email, credential, display_name, first_name, last_name)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(email)
    .bind(credential_hash)
    .bind(display_name)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?;

    Ok(seller)
}
