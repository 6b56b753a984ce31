use sqlx::PgPool;

use crate::{error::Result, models::User};

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn create_user(
    pool: &PgPool,
    email: &str,
    credential_hash: &str,
    display_name: &str,
    first_name: &str,
    last_name: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, credential, display_name, first_name, last_name)
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

    Ok(user)
}

/// Partial update: absent fields keep their stored values.
pub async fn update_user(
    pool: &PgPool,
    id: i32,
    display_name: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    bio: Option<&str>,
    profile_picture_id: Option<i32>,
) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET
            display_name = COALESCE($2, display_name),
            first_name = COALESCE($3, first_name),
            last_name = COALESCE($4, last_name),
            bio = COALESCE($5, bio),
            profile_picture_id = COALESCE($6, profile_picture_id),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(display_name)
    .bind(first_name)
    .bind(last_name)
    .bind(bio)
    .bind(profile_picture_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
