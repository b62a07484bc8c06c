use shared::models::customer::{Customer, CustomerUpdate};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a customer; the unique `(store_id, contact_id)` index surfaces
/// duplicates as a database error the handler maps to a conflict.
pub async fn create(
    pool: &PgPool,
    id: Uuid,
    store_id: Uuid,
    contact_id: &str,
    contact_type: &str,
    name: &str,
    now: i64,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO customers (id, store_id, contact_id, contact_type, name, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(store_id)
    .bind(contact_id)
    .bind(contact_type)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_by_store(pool: &PgPool, store_id: Uuid) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE store_id = $1 ORDER BY created_at")
        .bind(store_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &CustomerUpdate,
    now: i64,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE customers SET
            contact_id = COALESCE($2, contact_id),
            contact_type = COALESCE($3, contact_type),
            name = COALESCE($4, name),
            updated_at = $5
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.contact_id.as_deref())
    .bind(patch.contact_type.as_deref())
    .bind(patch.name.as_deref())
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
