//! Shared types for the BantuDagang platform
//!
//! Common types used across crates: the unified error system, the API
//! response envelope, domain models, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
