use shared::models::delivery::DeliveryTemplate;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    id: Uuid,
    store_id: Uuid,
    name: &str,
    content: &str,
    now: i64,
) -> Result<DeliveryTemplate, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO delivery_templates (id, store_id, name, content, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING *",
    )
    .bind(id)
    .bind(store_id)
    .bind(name)
    .bind(content)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn list_by_store(
    pool: &PgPool,
    store_id: Uuid,
) -> Result<Vec<DeliveryTemplate>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM delivery_templates WHERE store_id = $1 ORDER BY created_at")
        .bind(store_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<DeliveryTemplate>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM delivery_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    content: &str,
    now: i64,
) -> Result<Option<DeliveryTemplate>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE delivery_templates SET name = $2, content = $3, updated_at = $4
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(content)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM delivery_templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// How many delivery configs still reference this template
pub async fn count_referencing_configs(
    pool: &PgPool,
    template_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM product_delivery_config WHERE template_id = $1")
            .bind(template_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
