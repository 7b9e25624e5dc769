//! Common error types used across all Shift Board crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all Shift Board operations
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ShiftBoardError {
    // Roster errors
    #[error("Roster load failed: {message}")]
    LoadFailure { message: String },

    // Request store errors
    #[error("{message}")]
    Remote { message: String },

    #[error("Missing required field: {field}")]
    Validation { field: String },

    // Transport errors
    #[error("Network request failed: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

impl ShiftBoardError {
    pub fn load_failure(message: impl Into<String>) -> Self {
        ShiftBoardError::LoadFailure {
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        ShiftBoardError::Remote {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>) -> Self {
        ShiftBoardError::Validation {
            field: field.into(),
        }
    }

    /// Re-labels a transport or parse failure as a roster load failure
    pub fn into_load_failure(self) -> Self {
        match self {
            err @ ShiftBoardError::LoadFailure { .. } => err,
            other => ShiftBoardError::load_failure(other.to_string()),
        }
    }

    /// Re-labels a transport or parse failure as a request store failure
    pub fn into_remote(self) -> Self {
        match self {
            err @ (ShiftBoardError::Remote { .. } | ShiftBoardError::Validation { .. }) => err,
            other => ShiftBoardError::remote(other.to_string()),
        }
    }
}

/// Result type alias for Shift Board operations
pub type ShiftBoardResult<T> = Result<T, ShiftBoardError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ShiftBoardError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: ShiftBoardError) -> Self {
        Self {
            success: false,
            error,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            context: None,
        }
    }

    /// Add context to the error response
    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for ShiftBoardError {
    fn from(err: serde_json::Error) -> Self {
        ShiftBoardError::Parse {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for ShiftBoardError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        ShiftBoardError::JsInterop {
            message: err
                .as_string()
                .unwrap_or_else(|| format!("{err:?}")),
        }
    }
}
