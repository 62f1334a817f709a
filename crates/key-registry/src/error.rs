//! Error types for the key registry.

use crate::record::RecordParseError;
use thiserror::Error;

/// Record store failures. None of these are retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Key store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: RecordParseError,
    },

    #[error("Record cannot be stored: {0}")]
    Unencodable(String),
}

/// Fatal registry errors, surfaced at the process boundary.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),
}

impl RegistryError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            RegistryError::Storage(_) => 4,
            RegistryError::Config(_) => 78,
        }
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
