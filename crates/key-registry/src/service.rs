//! Registration workflow: type lookup, validation, duplicate check, persist.

use crate::error::RegistryResult;
use crate::record::KeyRecord;
use crate::store::Store;
use key_validators::KeyType;
use std::fmt;
use tracing::{info, instrument, warn};

/// Result of a registration attempt that did not fail on storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The key was validated and persisted.
    Registered(KeyRecord),

    /// The key type is not one of the known tags. Holds the upper-cased tag.
    InvalidType(String),

    /// The value failed the format or check-digit rule for its type.
    InvalidValue { key_type: KeyType, value: String },

    /// The value is already registered, possibly under another type.
    Duplicate { existing: KeyRecord },
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Registered(_) => 0,
            Outcome::InvalidType(_) => 1,
            Outcome::InvalidValue { .. } => 2,
            Outcome::Duplicate { .. } => 3,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Outcome::Registered(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Registered(record) => write!(
                f,
                "Key registered successfully: {} {} at {}",
                record.key_type, record.value, record.institution
            ),
            Outcome::InvalidType(tag) => write!(f, "Invalid key type: {}", tag),
            Outcome::InvalidValue { key_type, value } => {
                write!(f, "Invalid key: {:?} is not a valid {}", value, key_type)
            }
            Outcome::Duplicate { existing } => write!(
                f,
                "Key already registered at institution: {}",
                existing.institution
            ),
        }
    }
}

/// Registers keys against a record store.
#[derive(Debug)]
pub struct RegistrationService {
    store: Store,
}

impl RegistrationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The underlying record store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Register `value` as a key of type `key_type` owned by `institution`.
    ///
    /// Type and format rejections never touch the store. Uniqueness is
    /// checked on the exact value alone, ignoring type and institution.
    /// Storage failures are returned as errors and are not retried.
    #[instrument(skip(self))]
    pub fn register(
        &mut self,
        key_type: &str,
        value: &str,
        institution: &str,
    ) -> RegistryResult<Outcome> {
        let tag = key_type.to_uppercase();
        let Some(kind) = KeyType::from_tag(&tag) else {
            warn!(key_type = %tag, "Rejected unknown key type");
            return Ok(Outcome::InvalidType(tag));
        };

        if !kind.validate(value) {
            warn!(key_type = %kind, "Rejected invalid key");
            return Ok(Outcome::InvalidValue {
                key_type: kind,
                value: value.to_string(),
            });
        }

        let existing = self.store.load()?;
        if let Some(record) = existing.into_iter().find(|r| r.value == value) {
            warn!(
                key_type = %record.key_type,
                institution = %record.institution,
                "Attempted registration of an existing key"
            );
            return Ok(Outcome::Duplicate { existing: record });
        }

        let record = KeyRecord::new(kind, value, institution);
        self.store.append(&record)?;

        info!(key_type = %kind, institution = %institution, "Key registered");
        Ok(Outcome::Registered(record))
    }
}
