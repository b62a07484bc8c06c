//! Fulfillment executor
//!
//! Resolves a delivery config, consumes (or reads) the inventory ledger,
//! renders the delivery message, and records a best-effort audit row.
//!
//! The decrement is planned as a pure function over the config's type and
//! ledger snapshot; [`fulfill`] applies it inside a transaction holding a
//! `FOR UPDATE` row lock on the candidate configs, so two concurrent
//! requests against the same config can never reserve the same items.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::delivery::{ConfigStatus, DeliveryType};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;

use super::ledger;
use super::resolver::{self, ResolveBy};
use super::template;

/// Pure fulfillment decision for one config snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillPlan {
    /// Comma-joined delivered items
    pub payload: String,
    /// Ledger to persist; `None` means no mutation (reusable links)
    pub remainder: Option<String>,
    /// Whether the config must flip to `used`
    pub exhausted: bool,
}

/// Why a fulfillment cannot proceed (no mutation has happened)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    InvalidType(String),
    OutOfStock,
}

/// Decide what a fulfillment of `qty` items does to the given ledger
///
/// A config that is no longer `active` is configured-but-drained, which is
/// out-of-stock rather than not-configured.
pub fn plan(
    config_type: &str,
    status: &str,
    account_data: &str,
    qty: usize,
) -> Result<FulfillPlan, PlanError> {
    let delivery_type = DeliveryType::from_db(config_type)
        .ok_or_else(|| PlanError::InvalidType(config_type.to_string()))?;

    if ConfigStatus::from_db(status) != Some(ConfigStatus::Active) {
        return Err(PlanError::OutOfStock);
    }

    if ledger::is_empty(account_data) {
        return Err(PlanError::OutOfStock);
    }

    let take = ledger::take(ledger::parse(account_data), qty);

    if delivery_type.consumes_ledger() {
        Ok(FulfillPlan {
            payload: take.payload(),
            exhausted: take.exhausted(),
            remainder: Some(take.remainder_string()),
        })
    } else {
        Ok(FulfillPlan {
            payload: take.payload(),
            remainder: None,
            exhausted: false,
        })
    }
}

/// One fulfillment request, validated by the handler
#[derive(Debug, Clone)]
pub struct FulfillmentRequest {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub qty: u32,
    /// Order context; present together with `customer_id` or not at all
    pub order_item_id: Option<String>,
    pub customer_id: Option<String>,
    /// Caller-supplied template override
    pub template_text: Option<String>,
}

/// Delivered result returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Fulfillment {
    pub product_id: Option<Uuid>,
    pub product_name: String,
    /// Raw delivered payload (comma-joined ledger items)
    pub product_data: String,
    /// Template content the message was rendered from
    pub template_content: String,
    /// Final rendered delivery message
    pub final_content: String,
    pub variant_id: Option<Uuid>,
}

/// Execute a fulfillment end to end
///
/// The caller must have verified store ownership already. The inventory
/// decrement is committed before the audit insert is attempted; an audit
/// failure is logged and swallowed so the delivered payload still reaches
/// the caller.
pub async fn fulfill(pool: &PgPool, req: &FulfillmentRequest) -> Result<Fulfillment, AppError> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let candidates =
        db::delivery_configs::lock_candidates(&mut tx, req.store_id, req.product_id)
            .await
            .map_err(db_err)?;

    let by = ResolveBy::from_params(req.product_id, req.variant_id);
    let config = resolver::select(&candidates, by)
        .ok_or_else(|| AppError::new(ErrorCode::DeliveryNotConfigured))?
        .clone();

    let plan = plan(
        &config.config_type,
        &config.status,
        &config.account_data,
        req.qty as usize,
    )
    .map_err(
        |e| match e {
            PlanError::InvalidType(t) => AppError::with_message(
                ErrorCode::InvalidDeliveryType,
                format!("Unknown delivery type: {t}"),
            ),
            PlanError::OutOfStock => AppError::new(ErrorCode::OutOfStock),
        },
    )?;

    // Read the message inputs on the same connection, before the ledger
    // write becomes visible
    let product = match config.product_id {
        Some(pid) => db::products::find_by_id(&mut *tx, pid).await.map_err(db_err)?,
        None => None,
    };
    let stored_template = match config.template_id {
        Some(tid) => db::templates::find_by_id(&mut *tx, tid).await.map_err(db_err)?,
        None => None,
    };

    if let Some(remainder) = &plan.remainder {
        let status = if plan.exhausted {
            ConfigStatus::Used
        } else {
            ConfigStatus::Active
        };
        db::delivery_configs::update_ledger(
            &mut tx,
            config.id,
            remainder,
            status.as_db(),
            shared::util::now_millis(),
        )
        .await
        .map_err(db_err)?;
    }

    tx.commit().await.map_err(db_err)?;

    let product_name = product.as_ref().map(|p| p.name.clone()).unwrap_or_default();
    let template_content = req
        .template_text
        .clone()
        .or_else(|| stored_template.map(|t| t.content))
        .unwrap_or_else(|| template::DEFAULT_TEMPLATE.to_string());

    let final_content = template::render(
        &template_content,
        &[
            (template::VAR_PRODUCT_DATA, plan.payload.as_str()),
            (template::VAR_PRODUCT_NAME, product_name.as_str()),
        ],
    );

    if let (Some(order_item_id), Some(customer_id)) =
        (req.order_item_id.as_deref(), req.customer_id.as_deref())
    {
        let now = shared::util::now_millis();
        if let Err(e) = db::auto_deliveries::log(
            pool,
            req.store_id,
            order_item_id,
            customer_id,
            config.product_id,
            config.variant_id,
            &final_content,
            now,
        )
        .await
        {
            tracing::warn!("Auto-delivery audit insert failed: {e}");
        }
    }

    Ok(Fulfillment {
        product_id: config.product_id,
        product_name,
        product_data: plan.payload,
        template_content,
        final_content,
        variant_id: config.variant_id,
    })
}

fn db_err(e: sqlx::Error) -> AppError {
    tracing::error!("Fulfillment storage error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_plan_consumes_prefix() {
        let p = plan("ACCOUNT", "active", "a@x.com:pw1,a@x.com:pw2", 1).unwrap();
        assert_eq!(p.payload, "a@x.com:pw1");
        assert_eq!(p.remainder.as_deref(), Some("a@x.com:pw2"));
        assert!(!p.exhausted);
    }

    #[test]
    fn test_voucher_plan_qty_caps_at_ledger_length() {
        let p = plan("VOUCHER", "active", "v1,v2", 5).unwrap();
        assert_eq!(p.payload, "v1,v2");
        assert_eq!(p.remainder.as_deref(), Some(""));
        assert!(p.exhausted);
    }

    #[test]
    fn test_link_plan_never_mutates() {
        let p1 = plan("LINK", "active", "https://dl/one,https://dl/two", 1).unwrap();
        let p2 = plan("LINK", "active", "https://dl/one,https://dl/two", 1).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.payload, "https://dl/one");
        assert!(p1.remainder.is_none());
        assert!(!p1.exhausted);
    }

    #[test]
    fn test_invalid_type_rejected_before_stock_check() {
        assert_eq!(
            plan("GIFT", "active", "a,b", 1),
            Err(PlanError::InvalidType("GIFT".to_string()))
        );
    }

    #[test]
    fn test_empty_ledger_is_out_of_stock() {
        for raw in ["", ",", " , "] {
            assert_eq!(plan("ACCOUNT", "active", raw, 1), Err(PlanError::OutOfStock));
            assert_eq!(plan("LINK", "active", raw, 3), Err(PlanError::OutOfStock));
        }
    }

    #[test]
    fn test_used_config_is_out_of_stock_not_unconfigured() {
        // A drained config stays resolvable; it must report out-of-stock,
        // never fall through to the not-configured outcome
        assert_eq!(plan("ACCOUNT", "used", "", 1), Err(PlanError::OutOfStock));
        // Even with leftover data, a non-active config does not deliver
        assert_eq!(plan("VOUCHER", "used", "v1,v2", 1), Err(PlanError::OutOfStock));
    }

    #[test]
    fn test_sequential_account_fulfillments_drain_ledger() {
        // Two one-item takes hand out disjoint items, then out of stock
        let first = plan("ACCOUNT", "active", "a@x.com:pw1,a@x.com:pw2", 1).unwrap();
        assert_eq!(first.payload, "a@x.com:pw1");
        assert!(!first.exhausted);

        let after_first = first.remainder.unwrap();
        let second = plan("ACCOUNT", "active", &after_first, 1).unwrap();
        assert_eq!(second.payload, "a@x.com:pw2");
        assert_eq!(second.remainder.as_deref(), Some(""));
        assert!(second.exhausted);

        // The exhausted config is now status 'used' with an empty ledger
        let after_second = second.remainder.unwrap();
        assert_eq!(
            plan("ACCOUNT", "used", &after_second, 1),
            Err(PlanError::OutOfStock)
        );
    }
}
