//! User model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public user shape (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}
