use shared::models::product::{ProductVariant, VariantUpdate};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create(
    pool: &PgPool,
    id: Uuid,
    product_id: Uuid,
    name: &str,
    price: f64,
    is_active: bool,
    now: i64,
) -> Result<ProductVariant, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO product_variants (id, product_id, name, price, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(product_id)
    .bind(name)
    .bind(price)
    .bind(is_active)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_by_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<ProductVariant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM product_variants WHERE product_id = $1 ORDER BY created_at")
        .bind(product_id)
        .fetch_all(pool)
        .await
}

/// All variants under a store's products, for assembling product listings
pub async fn list_by_store(
    pool: &PgPool,
    store_id: Uuid,
) -> Result<Vec<ProductVariant>, sqlx::Error> {
    sqlx::query_as(
        "SELECT v.* FROM product_variants v
         JOIN products p ON p.id = v.product_id
         WHERE p.store_id = $1
         ORDER BY v.created_at",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProductVariant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM product_variants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &VariantUpdate,
    now: i64,
) -> Result<Option<ProductVariant>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE product_variants SET
            name = COALESCE($2, name),
            price = COALESCE($3, price),
            is_active = COALESCE($4, is_active),
            updated_at = $5
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.price)
    .bind(patch.is_active)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM product_variants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
