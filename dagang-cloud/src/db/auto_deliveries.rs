//! Auto-delivery audit log operations

use shared::models::delivery::AutoDelivery;
use sqlx::PgPool;
use uuid::Uuid;

/// Append one audit row for a successful fulfillment
#[allow(clippy::too_many_arguments)]
pub async fn log(
    pool: &PgPool,
    store_id: Uuid,
    order_item_id: &str,
    customer_id: &str,
    product_id: Option<Uuid>,
    variant_id: Option<Uuid>,
    delivery_message: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO auto_deliveries
            (id, store_id, order_item_id, customer_id, product_id, variant_id,
             delivery_message, status, sent_at, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'sent', $8, $8)",
    )
    .bind(Uuid::new_v4())
    .bind(store_id)
    .bind(order_item_id)
    .bind(customer_id)
    .bind(product_id)
    .bind(variant_id)
    .bind(delivery_message)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Audit rows for a store, newest first
pub async fn list_by_store(
    pool: &PgPool,
    store_id: Uuid,
) -> Result<Vec<AutoDelivery>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM auto_deliveries WHERE store_id = $1 ORDER BY created_at DESC")
        .bind(store_id)
        .fetch_all(pool)
        .await
}
