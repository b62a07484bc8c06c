//! Product and variant models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Whether AI chat replies are enabled for this product
    pub use_ai: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product variant entity (a specific SKU under a parent product)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product with its variants, as returned by list/detail endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithVariants {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub use_ai: Option<bool>,
    pub variants: Option<Vec<VariantPayload>>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub use_ai: Option<bool>,
}

/// Inline variant payload (used by product create)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub variant_id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub is_active: Option<bool>,
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCreate {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub is_active: Option<bool>,
}

/// Update variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}
