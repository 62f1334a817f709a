//! Validation errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown key type: {0}")]
    UnknownKeyType(String),
}
