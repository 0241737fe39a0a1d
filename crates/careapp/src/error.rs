//! Error types for careapp.
//!
//! Analytics operations never surface these to their callers; they are used by
//! the storage backends, configuration loading and the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for careapp operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to open or create the on-disk store.
    #[error("failed to open store at {path}: {source}")]
    StoreOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A store query failed.
    #[error("store query failed: {0}")]
    StoreQuery(#[from] rusqlite::Error),

    /// The store cannot be reached at all.
    #[error("store unavailable: {message}")]
    StoreUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to run store migrations.
    #[error("store migration failed: {message}")]
    StoreMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Recovery Model Errors ===
    /// A procedure key is not part of the catalog.
    #[error("unknown procedure '{key}'")]
    UnknownProcedure {
        /// The key that failed to resolve.
        key: String,
    },

    // === File System Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for careapp operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new store-unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Create an unknown-procedure error.
    #[must_use]
    pub fn unknown_procedure(key: impl Into<String>) -> Self {
        Self::UnknownProcedure { key: key.into() }
    }

    /// Check if this error means the store could not be reached.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::StoreOpen { .. } | Self::StoreUnavailable { .. } | Self::DirectoryCreate { .. }
        )
    }
}
