//! Error types for the orders loader
//!
//! Every fallible operation in the crate returns `Result<T, Error>` with the
//! `Error` defined here. The binary maps any error to exit status 1.

use thiserror::Error;

/// The main error type for the orders loader
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Dataset Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Record {index} is not a JSON object")]
    InvalidRecord { index: usize },

    #[error("Record {index} is missing field '{field}'")]
    MissingField { index: usize, field: String },

    // ============================================================================
    // Table Errors
    // ============================================================================
    #[error("Cannot find table '{table}': {message}")]
    TableUnavailable { table: String, message: String },

    #[error("Batch write failed: {message}")]
    BatchWrite { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a table unavailable error
    pub fn table_unavailable(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableUnavailable {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a batch write error
    pub fn batch_write(message: impl Into<String>) -> Self {
        Self::BatchWrite {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(index: usize, field: impl Into<String>) -> Self {
        Self::MissingField {
            index,
            field: field.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for the orders loader
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
