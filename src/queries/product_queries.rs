use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CreateProductRequest, Product, ProductListQuery, ProductListingRow},
};

const LISTING_SELECT: &str = "SELECT p.id, p.name, p.description, p.price, p.category,
        p.discount_percent, p.discount_absolute,
        i.url AS image_url,
        s.id AS seller_id, s.display_name AS seller_display_name
     FROM products p
     JOIN sellers s ON s.id = p.seller_id
     LEFT JOIN images i ON i.id = p.image_id";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_listing_row(pool: &PgPool, id: i32) -> Result<Option<ProductListingRow>> {
    let row = sqlx::query_as::<_, ProductListingRow>(&format!("{} WHERE p.id = $1", LISTING_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_products(
    pool: &PgPool,
    params: &ProductListQuery,
) -> Result<Vec<ProductListingRow>> {
    let rows = sqlx::query_as::<_, ProductListingRow>(&format!(
        "{}
         WHERE ($1::INT IS NULL OR p.seller_id = $1)
           AND ($2::TEXT IS NULL OR p.category = $2)
         ORDER BY p.created_at DESC",
        LISTING_SELECT
    ))
    .bind(params.seller_id)
    .bind(params.category.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT DISTINCT category FROM products ORDER BY category",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Creates the product together with its single image in one transaction.
pub async fn create_product(
    pool: &PgPool,
    req: &CreateProductRequest,
    discount_percent: Decimal,
    discount_absolute: Decimal,
) -> Result<Product> {
    let mut tx = pool.begin().await?;

    let (image_id,): (i32,) = sqlx::query_as(
        "INSERT INTO images (url, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(&req.image_url)
    .bind(&req.name)
    .fetch_one(&mut *tx)
    .await?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products
            (name, description, price, category, discount_percent, discount_absolute,
             seller_id, image_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(req.description.as_deref())
    .bind(req.price)
    .bind(&req.category)
    .bind(discount_percent)
    .bind(discount_absolute)
    .bind(req.seller_id)
    .bind(image_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(product)
}

/// Updates the product row, upserting its image when a new URL is supplied
/// and preserving the existing one otherwise. Discount fields absent from
/// the request keep their stored values.
#[allow(clippy::too_many_arguments)]
pub async fn update_product(
    pool: &PgPool,
    id: i32,
    name: &str,
    description: Option<&str>,
    price: Decimal,
    category: &str,
    discount_percent: Option<Decimal>,
    discount_absolute: Option<Decimal>,
    image_url: Option<&str>,
) -> Result<Option<Product>> {
    let Some(existing) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let mut tx = pool.begin().await?;

    let image_id = match (image_url, existing.image_id) {
        (Some(url), Some(image_id)) => {
            sqlx::query("UPDATE images SET url = $1 WHERE id = $2")
                .bind(url)
                .bind(image_id)
                .execute(&mut *tx)
                .await?;
            Some(image_id)
        }
        (Some(url), None) => {
            let (image_id,): (i32,) = sqlx::query_as(
                "INSERT INTO images (url, description) VALUES ($1, $2) RETURNING id",
            )
            .bind(url)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
            Some(image_id)
        }
        (None, image_id) => image_id,
    };

    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET
            name = $2,
            description = $3,
            price = $4,
            category = $5,
            discount_percent = COALESCE($6, discount_percent),
            discount_absolute = COALESCE($7, discount_absolute),
            image_id = $8,
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(category)
    .bind(discount_percent)
    .bind(discount_absolute)
    .bind(image_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(product))
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
