use shared::models::product::{Product, ProductUpdate, VariantPayload};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a product together with its inline variants (single transaction)
pub async fn create(
    pool: &PgPool,
    id: Uuid,
    store_id: Uuid,
    name: &str,
    description: Option<&str>,
    use_ai: bool,
    variants: &[VariantPayload],
    now: i64,
) -> Result<Product, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product: Product = sqlx::query_as(
        "INSERT INTO products (id, store_id, name, description, use_ai, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(store_id)
    .bind(name)
    .bind(description)
    .bind(use_ai)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for v in variants {
        sqlx::query(
            "INSERT INTO product_variants (id, product_id, name, price, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(v.variant_id.unwrap_or_else(Uuid::new_v4))
        .bind(id)
        .bind(&v.name)
        .bind(v.price)
        .bind(v.is_active.unwrap_or(true))
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(product)
}

pub async fn list_by_store(pool: &PgPool, store_id: Uuid) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE store_id = $1 ORDER BY created_at")
        .bind(store_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &ProductUpdate,
    now: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE products SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            use_ai = COALESCE($4, use_ai),
            updated_at = $5
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.use_ai)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
