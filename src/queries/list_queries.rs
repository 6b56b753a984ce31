use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{List, ListWithProducts, ProductListingRow},
};

#[derive(Debug, sqlx::FromRow)]
struct ListProductRow {
    list_id: i32,
    #[sqlx(flatten)]
    product: ProductListingRow,
}

pub async fn find_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<ListWithProducts>> {
    let lists = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    if lists.is_empty() {
        return Ok(Vec::new());
    }

    let list_ids: Vec<i32> = lists.iter().map(|l| l.id).collect();

    let rows = sqlx::query_as::<_, ListProductRow>(
        "SELECT lp.list_id,
                p.id, p.name, p.description, p.price, p.category,
                p.discount_percent, p.discount_absolute,
                i.url AS image_url,
                s.id AS seller_id, s.display_name AS seller_display_name
         FROM list_products lp
         JOIN products p ON p.id = lp.product_id
         JOIN sellers s ON s.id = p.seller_id
         LEFT JOIN images i ON i.id = p.image_id
         WHERE lp.list_id = ANY($1)
         ORDER BY lp.list_id, p.id",
    )
    .bind(&list_ids)
    .fetch_all(pool)
    .await?;

    let mut products_map: HashMap<i32, Vec<ProductListingRow>> = HashMap::new();
    for row in rows {
        products_map.entry(row.list_id).or_default().push(row.product);
    }

    let result = lists
        .into_iter()
        .map(|list| {
            let products = products_map.remove(&list.id).unwrap_or_default();
            ListWithProducts {
                id: list.id,
                name: list.name,
                user_id: list.user_id,
                products: products.into_iter().map(Into::into).collect(),
            }
        })
        .collect();

    Ok(result)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<List>> {
    let list = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(list)
}

pub async fn add_product(pool: &PgPool, list_id: i32, product_id: i32) -> Result<()> {
    sqlx::query(
        "INSERT INTO list_products (list_id, product_id)
         VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(list_id)
    .bind(product_id)
    .execute(pool)
    .await?;

    Ok(())
}
