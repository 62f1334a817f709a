//! Key Registry - registers identifying keys against a financial institution.
//!
//! A registration goes through three gates before it is persisted:
//! - The key type must be one of the known tags (CPF, CNPJ, PHONE, EMAIL)
//! - The value must pass that type's format and check-digit rules
//! - The value must not already be registered, under any type
//!
//! Accepted keys are appended to a plain-text record file, one
//! `TYPE;value;institution` line per key.

pub mod config;
pub mod error;
pub mod record;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{RegistryError, StoreError};
pub use key_validators::KeyType;
pub use record::{KeyRecord, RecordParseError};
pub use service::{Outcome, RegistrationService};
pub use store::{FileStore, MemoryStore, Store};
