//! Standardized API response envelopes.
//!
//! Success: `{ success: true, data?, message? }`.
//! Failure: `{ success: false, message, errors? }`.

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Error body. Never carries internal details such as queries or causes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,

    /// A short, human-readable summary.
    pub message: String,

    /// Individual field errors, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    // Common error constructors
    pub fn validation(errors: Vec<String>) -> Self {
        Self::new("Validation error").with_errors(errors)
    }

    pub fn invalid_id() -> Self {
        Self::new("Invalid UUID format")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
