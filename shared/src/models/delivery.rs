//! Delivery config, template, and audit models
//!
//! A delivery config describes how a product/variant's digital goods are
//! fulfilled. Its `account_data` column is the inventory ledger: an ordered,
//! comma-separated sequence of deliverable items (account credentials,
//! voucher codes, or links) consumed front-first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the deliverable items of a config are handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryType {
    /// Account credentials, consumed on delivery
    Account,
    /// Voucher codes, consumed on delivery
    Voucher,
    /// Download/access links, reusable (never consumed)
    Link,
}

impl DeliveryType {
    /// Parse the database representation; `None` for anything unknown
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "ACCOUNT" => Some(Self::Account),
            "VOUCHER" => Some(Self::Voucher),
            "LINK" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::Voucher => "VOUCHER",
            Self::Link => "LINK",
        }
    }

    /// Whether delivery removes items from the ledger
    pub fn consumes_ledger(&self) -> bool {
        !matches!(self, Self::Link)
    }
}

/// Lifecycle status of a delivery config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    /// Has deliverable inventory
    Active,
    /// Ledger has been fully consumed
    Used,
}

impl ConfigStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "used" => Some(Self::Used),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
        }
    }
}

/// Delivery config entity
///
/// At most one *active* config exists per `(store_id, product_id,
/// variant_id)`; `variant_id = NULL` is the product-level default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryConfig {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    /// ACCOUNT | VOUCHER | LINK (kept as stored; parse via [`DeliveryType::from_db`])
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub config_type: String,
    /// active | used
    pub status: String,
    /// The inventory ledger (comma-separated FIFO queue)
    pub account_data: String,
    pub template_id: Option<Uuid>,
    pub use_ai: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Delivery template entity; content carries `{{TOKEN}}` placeholders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryTemplate {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Delivery config joined with its template, as returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfigWithTemplate {
    #[serde(flatten)]
    pub config: DeliveryConfig,
    pub template: Option<DeliveryTemplate>,
}

/// Append-only audit row, written once per successful fulfillment with
/// order/customer context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AutoDelivery {
    pub id: Uuid,
    pub store_id: Uuid,
    pub order_item_id: String,
    pub customer_id: String,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub delivery_message: String,
    pub status: String,
    pub sent_at: i64,
    pub created_at: i64,
}

/// Per-variant inventory in a grouped upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryVariantUpsert {
    pub variant_id: Uuid,
    pub account_data: Option<String>,
    pub status: Option<String>,
}

/// Upsert payload for `POST /api/product-delivery`
///
/// Keys the config by `(store_id, product_id, variant_id)`; an optional
/// `variants` list upserts per-variant configs in the same call, and
/// `template_name` + `template_content` create a template inline when no
/// `template_id` is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfigUpsert {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub config_type: String,
    pub status: Option<String>,
    pub account_data: Option<String>,
    pub template_id: Option<Uuid>,
    pub use_ai: Option<bool>,
    pub template_name: Option<String>,
    pub template_content: Option<String>,
    pub variants: Option<Vec<DeliveryVariantUpsert>>,
}

/// Update payload for `PUT /api/product-delivery/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfigUpdate {
    #[serde(rename = "type")]
    pub config_type: Option<String>,
    pub status: Option<String>,
    pub account_data: Option<String>,
    pub template_id: Option<Uuid>,
    pub use_ai: Option<bool>,
}

/// Create template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreate {
    pub store_id: Uuid,
    pub name: String,
    pub content: String,
}

/// Update template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_type_from_db() {
        assert_eq!(DeliveryType::from_db("ACCOUNT"), Some(DeliveryType::Account));
        assert_eq!(DeliveryType::from_db("VOUCHER"), Some(DeliveryType::Voucher));
        assert_eq!(DeliveryType::from_db("LINK"), Some(DeliveryType::Link));
        assert_eq!(DeliveryType::from_db("account"), None);
        assert_eq!(DeliveryType::from_db(""), None);
    }

    #[test]
    fn test_delivery_type_consumes() {
        assert!(DeliveryType::Account.consumes_ledger());
        assert!(DeliveryType::Voucher.consumes_ledger());
        assert!(!DeliveryType::Link.consumes_ledger());
    }

    #[test]
    fn test_config_status_round_trip() {
        for s in [ConfigStatus::Active, ConfigStatus::Used] {
            assert_eq!(ConfigStatus::from_db(s.as_db()), Some(s));
        }
        assert_eq!(ConfigStatus::from_db("expired"), None);
    }
}
