//! Typed error handling for list views
//!
//! Only two kinds of failure ever reach a caller: the data source failed
//! ([`TransportError`]) or a view configuration is unusable
//! ([`ConfigError`]). Malformed pagination metadata and out-of-range page
//! numbers are recovered locally and never show up here.
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.refresh().await {
//!     Ok(FetchOutcome::Applied { .. }) => {}
//!     Ok(FetchOutcome::Discarded { .. }) => {}
//!     Err(ListError::Transport(e)) => show_banner(&e.to_string()),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Result alias for list view operations
pub type ListResult<T> = std::result::Result<T, ListError>;

/// The main error type for list views
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// The data source call failed
    Transport(TransportError),

    /// The view configuration is invalid
    Config(ConfigError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Transport(e) => write!(f, "{}", e),
            ListError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Transport(e) => Some(e),
            ListError::Config(e) => Some(e),
        }
    }
}

/// Error payload handed to the view layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether re-triggering the request may succeed
    pub retryable: bool,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListError::Transport(e) => e.error_code(),
            ListError::Config(e) => e.error_code(),
        }
    }

    /// Transport failures are transient; the user retries by changing any state
    pub fn is_retryable(&self) -> bool {
        matches!(self, ListError::Transport(_))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListError::Transport(TransportError::RequestFailed {
                entity_type,
                sequence,
                ..
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "sequence": sequence
            })),
            ListError::Config(ConfigError::InvalidValue { field, value, .. }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failures of the external data source
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The fetch for a page failed or was rejected
    RequestFailed {
        entity_type: String,
        sequence: u64,
        message: String,
    },

    /// A one-off request (export) failed
    OneOffFailed {
        entity_type: String,
        message: String,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestFailed {
                entity_type,
                sequence,
                message,
            } => {
                write!(
                    f,
                    "Failed to fetch {} (request #{}): {}",
                    entity_type, sequence, message
                )
            }
            TransportError::OneOffFailed {
                entity_type,
                message,
            } => {
                write!(f, "Failed to fetch {}: {}", entity_type, message)
            }
        }
    }
}

impl std::error::Error for TransportError {}

impl TransportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::RequestFailed { .. } => "TRANSPORT_FAILURE",
            TransportError::OneOffFailed { .. } => "TRANSPORT_FAILURE",
        }
    }
}

impl From<TransportError> for ListError {
    fn from(err: TransportError) -> Self {
        ListError::Transport(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to view configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required field in configuration
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingField { field, context } => {
                write!(f, "Missing required field '{}' in {}", field, context)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

impl From<ConfigError> for ListError {
    fn from(err: ConfigError) -> Self {
        ListError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::RequestFailed {
            entity_type: "products".to_string(),
            sequence: 7,
            message: "connection reset".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("products"));
        assert!(display.contains("#7"));
        assert!(display.contains("connection reset"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            file: Some("views.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert!(err.to_string().contains("views.yaml"));

        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse config: bad indent");
    }

    #[test]
    fn test_list_error_conversion() {
        let err: ListError = ConfigError::FileNotFound {
            path: "views.yaml".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_FILE_NOT_FOUND");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        let err = ListError::Transport(TransportError::OneOffFailed {
            entity_type: "types".to_string(),
            message: "timeout".to_string(),
        });
        assert!(err.source().is_some());
        let err: ListError = ConfigError::IoError {
            message: "denied".to_string(),
        }
        .into();
        assert!(err.source().is_some());
    }
}
