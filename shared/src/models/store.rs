//! Store model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCreate {
    /// Client-supplied store id (the console pre-generates it); a fresh
    /// UUID is assigned when absent.
    pub store_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Update store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}
