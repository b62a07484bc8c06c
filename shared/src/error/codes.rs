//! Unified error codes for the BantuDagang platform
//!
//! This module defines all error codes used across the API service and
//! frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Store errors
//! - 4xxx: Product errors
//! - 5xxx: Delivery errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// User not found
    UserNotFound = 1006,
    /// Email already registered
    EmailAlreadyRegistered = 1007,
    /// Password too short
    PasswordTooShort = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Caller does not own the target store
    StoreAccessDenied = 2002,

    // ==================== 3xxx: Store ====================
    /// Store not found
    StoreNotFound = 3001,
    /// Customer not found
    CustomerNotFound = 3101,
    /// Customer contact already registered for this store
    CustomerContactExists = 3102,

    // ==================== 4xxx: Product ====================
    /// Product not found
    ProductNotFound = 4001,
    /// Product variant not found
    VariantNotFound = 4002,

    // ==================== 5xxx: Delivery ====================
    /// Auto-delivery not configured for this product or variant
    DeliveryNotConfigured = 5001,
    /// Inventory ledger is empty
    OutOfStock = 5002,
    /// Delivery type is not ACCOUNT, VOUCHER or LINK
    InvalidDeliveryType = 5003,
    /// Delivery config not found
    DeliveryConfigNotFound = 5004,
    /// Delivery template not found
    TemplateNotFound = 5101,
    /// Delivery template is referenced by a delivery config
    TemplateInUse = 5102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StoreAccessDenied => "No access to this store",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerContactExists => "Customer contact already registered",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::VariantNotFound => "Product variant not found",

            // Delivery
            ErrorCode::DeliveryNotConfigured => {
                "Auto-delivery is not enabled for this product or variant"
            }
            ErrorCode::OutOfStock => "Product inventory is currently empty",
            ErrorCode::InvalidDeliveryType => "Invalid delivery type",
            ErrorCode::DeliveryConfigNotFound => "Delivery config not found",
            ErrorCode::TemplateNotFound => "Delivery template not found",
            ErrorCode::TemplateInUse => "Delivery template is in use by a delivery config",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::UserNotFound),
            1007 => Ok(ErrorCode::EmailAlreadyRegistered),
            1008 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::StoreAccessDenied),

            // Store
            3001 => Ok(ErrorCode::StoreNotFound),
            3101 => Ok(ErrorCode::CustomerNotFound),
            3102 => Ok(ErrorCode::CustomerContactExists),

            // Product
            4001 => Ok(ErrorCode::ProductNotFound),
            4002 => Ok(ErrorCode::VariantNotFound),

            // Delivery
            5001 => Ok(ErrorCode::DeliveryNotConfigured),
            5002 => Ok(ErrorCode::OutOfStock),
            5003 => Ok(ErrorCode::InvalidDeliveryType),
            5004 => Ok(ErrorCode::DeliveryConfigNotFound),
            5101 => Ok(ErrorCode::TemplateNotFound),
            5102 => Ok(ErrorCode::TemplateInUse),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::StoreNotFound.code(), 3001);
        assert_eq!(ErrorCode::OutOfStock.code(), 5002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::StoreAccessDenied,
            ErrorCode::DeliveryNotConfigured,
            ErrorCode::TemplateInUse,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(42), Err(InvalidErrorCode(42)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OutOfStock).unwrap();
        assert_eq!(json, "5002");
        let back: ErrorCode = serde_json::from_str("5002").unwrap();
        assert_eq!(back, ErrorCode::OutOfStock);
    }
}
