//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function  ── Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── CoreError::Validation ───────► VALIDATION_ERROR             │
//! │         ├── CoreError::EmptyCart ────────► CART_EMPTY                   │
//! │         ├── CoreError::DishNotFound ─────► NOT_FOUND                    │
//! │         ├── StorageError ────────────────► STORAGE_ERROR                │
//! │         ├── PaymentError ────────────────► PAYMENT_ERROR                │
//! │         └── anything else ───────────────► INTERNAL                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations themselves never fail; these errors come from checkout,
//! menu loading and the CLI.

use serde::Serialize;
use thiserror::Error;

use bunbo_core::CoreError;
use bunbo_storage::StorageError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CART_EMPTY",
///   "message": "Cart is empty, add a dish before checking out"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Checkout attempted with an empty cart
    CartEmpty,

    /// Dish or branch not found
    NotFound,

    /// Reading or writing local storage failed
    StorageError,

    /// Payment session could not be created
    PaymentError,

    /// Internal error
    Internal,
}

/// Failure reported by a payment gateway.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PaymentError {
    pub message: String,
}

impl PaymentError {
    pub fn new(message: impl Into<String>) -> Self {
        PaymentError {
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartEmpty, err.to_string()),
            CoreError::DishNotFound(id) => ApiError::not_found("Dish", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::UnknownPaymentMethod(_) => ApiError::validation(err.to_string()),
            CoreError::Menu(e) => {
                tracing::error!("Menu document rejected: {}", e);
                ApiError::internal("Menu could not be loaded")
            }
            CoreError::Snapshot(e) => {
                tracing::error!("Snapshot encoding failed: {}", e);
                ApiError::internal("Cart could not be serialized")
            }
        }
    }
}

/// Converts storage errors to API errors.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failure: {}", err);
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::new(ErrorCode::PaymentError, err.message)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Convenience alias for command results.
pub type ApiResult<T> = Result<T, ApiError>;
