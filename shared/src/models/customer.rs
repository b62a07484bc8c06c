//! Customer model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer entity, unique per `(store_id, contact_id)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub store_id: Uuid,
    /// External contact handle (phone number, social account id)
    pub contact_id: String,
    /// Channel the contact belongs to (e.g. "whatsapp", "instagram")
    pub contact_type: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub store_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub contact_id: String,
    pub contact_type: String,
    pub name: String,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub contact_id: Option<String>,
    pub contact_type: Option<String>,
    pub name: Option<String>,
}
