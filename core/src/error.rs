//! Error types and handling for Folio Core

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Folio Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Route table construction errors
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Route table construction errors.
///
/// These are fatal: a router must not start with an invalid table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Duplicate route path: {path}")]
    DuplicatePath { path: String },

    #[error("Route path cannot be empty")]
    EmptyPath,

    #[error("View id cannot be empty (path: {path})")]
    EmptyView { path: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RouteError::DuplicatePath {
            path: "/about".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate route path: /about");

        let err: Error = err.into();
        assert_eq!(err.to_string(), "Route error: Duplicate route path: /about");

        let err: Error = ConfigError::InvalidValue {
            field: "exit_ms".to_string(),
            value: "0".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for field 'exit_ms': 0"
        );
    }

    #[test]
    fn test_generic_from_str() {
        let err: Error = "boom".into();
        assert!(matches!(err, Error::Generic(ref m) if m == "boom"));
    }
}
