use shared::models::delivery::{DeliveryConfig, DeliveryConfigUpdate};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Active configs for a store in storage order, optionally narrowed to a
/// product. Resolution runs over this candidate set.
pub async fn fetch_candidates(
    pool: &PgPool,
    store_id: Uuid,
    product_id: Option<Uuid>,
) -> Result<Vec<DeliveryConfig>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM product_delivery_config
         WHERE store_id = $1 AND status = 'active'
           AND ($2::uuid IS NULL OR product_id = $2)
         ORDER BY created_at",
    )
    .bind(store_id)
    .bind(product_id)
    .fetch_all(pool)
    .await
}

/// Candidate set for fulfillment, row-locked for the duration of the
/// transaction so concurrent requests serialize on the ledger instead of
/// double-spending it. Unlike [`fetch_candidates`] this includes drained
/// (`used`) rows, active ones first: a resolved-but-drained config must
/// read as out-of-stock, not as unconfigured.
pub async fn lock_candidates(
    tx: &mut Transaction<'_, Postgres>,
    store_id: Uuid,
    product_id: Option<Uuid>,
) -> Result<Vec<DeliveryConfig>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM product_delivery_config
         WHERE store_id = $1
           AND ($2::uuid IS NULL OR product_id = $2)
         ORDER BY (status != 'active'), created_at
         FOR UPDATE",
    )
    .bind(store_id)
    .bind(product_id)
    .fetch_all(&mut **tx)
    .await
}

/// Persist the post-fulfillment ledger and status
pub async fn update_ledger(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    account_data: &str,
    status: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE product_delivery_config
         SET account_data = $2, status = $3, updated_at = $4
         WHERE id = $1",
    )
    .bind(id)
    .bind(account_data)
    .bind(status)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DeliveryConfig>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM product_delivery_config WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List configs for a store (all statuses), optionally filtered
pub async fn list_by_store(
    pool: &PgPool,
    store_id: Uuid,
    product_id: Option<Uuid>,
    variant_id: Option<Uuid>,
) -> Result<Vec<DeliveryConfig>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM product_delivery_config
         WHERE store_id = $1
           AND ($2::uuid IS NULL OR product_id = $2)
           AND ($3::uuid IS NULL OR variant_id = $3)
         ORDER BY created_at",
    )
    .bind(store_id)
    .bind(product_id)
    .bind(variant_id)
    .fetch_all(pool)
    .await
}

/// Insert-or-update keyed by `(store_id, product_id, variant_id)`, where a
/// NULL key component matches NULL. The matching row is locked while the
/// decision is made.
#[allow(clippy::too_many_arguments)]
pub async fn upsert(
    pool: &PgPool,
    store_id: Uuid,
    product_id: Option<Uuid>,
    variant_id: Option<Uuid>,
    config_type: &str,
    status: &str,
    account_data: &str,
    template_id: Option<Uuid>,
    use_ai: bool,
    now: i64,
) -> Result<DeliveryConfig, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: Option<DeliveryConfig> = sqlx::query_as(
        "SELECT * FROM product_delivery_config
         WHERE store_id = $1
           AND product_id IS NOT DISTINCT FROM $2
           AND variant_id IS NOT DISTINCT FROM $3
         FOR UPDATE",
    )
    .bind(store_id)
    .bind(product_id)
    .bind(variant_id)
    .fetch_optional(&mut *tx)
    .await?;

    let config: DeliveryConfig = match existing {
        Some(row) => {
            sqlx::query_as(
                "UPDATE product_delivery_config
                 SET type = $2, status = $3, account_data = $4, template_id = $5,
                     use_ai = $6, updated_at = $7
                 WHERE id = $1
                 RETURNING *",
            )
            .bind(row.id)
            .bind(config_type)
            .bind(status)
            .bind(account_data)
            .bind(template_id)
            .bind(use_ai)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as(
                "INSERT INTO product_delivery_config
                    (id, store_id, product_id, variant_id, type, status, account_data,
                     template_id, use_ai, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
                 RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(store_id)
            .bind(product_id)
            .bind(variant_id)
            .bind(config_type)
            .bind(status)
            .bind(account_data)
            .bind(template_id)
            .bind(use_ai)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;
    Ok(config)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &DeliveryConfigUpdate,
    now: i64,
) -> Result<Option<DeliveryConfig>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE product_delivery_config SET
            type = COALESCE($2, type),
            status = COALESCE($3, status),
            account_data = COALESCE($4, account_data),
            template_id = COALESCE($5, template_id),
            use_ai = COALESCE($6, use_ai),
            updated_at = $7
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.config_type.as_deref())
    .bind(patch.status.as_deref())
    .bind(patch.account_data.as_deref())
    .bind(patch.template_id)
    .bind(patch.use_ai)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM product_delivery_config WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
