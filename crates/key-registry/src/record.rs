//! Persisted key records and their line format.

use crate::error::StoreError;
use key_validators::{KeyType, ValidationError};
use std::fmt;
use thiserror::Error;

/// Field separator in the record file.
pub const FIELD_SEPARATOR: char = ';';

/// Errors parsing a single record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("expected 3 fields separated by ';', found {0}")]
    FieldCount(usize),

    #[error(transparent)]
    KeyType(#[from] ValidationError),
}

/// A registered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Key type (stored as its upper-case tag)
    pub key_type: KeyType,

    /// The key exactly as submitted
    pub value: String,

    /// Institution that owns the key
    pub institution: String,
}

impl KeyRecord {
    pub fn new(key_type: KeyType, value: impl Into<String>, institution: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
            institution: institution.into(),
        }
    }

    /// Encode as `TYPE;value;institution` (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.key_type,
            self.value,
            self.institution,
            sep = FIELD_SEPARATOR
        )
    }

    /// Parse a `TYPE;value;institution` line.
    pub fn from_line(line: &str) -> Result<Self, RecordParseError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [key_type, value, institution] = fields[..] else {
            return Err(RecordParseError::FieldCount(fields.len()));
        };

        Ok(Self::new(key_type.parse()?, value, institution))
    }

    /// Reject records that would not survive a round trip through the file.
    ///
    /// The format has no escaping, so no field may contain the separator or a
    /// line break.
    pub fn ensure_encodable(&self) -> Result<(), StoreError> {
        let fields = [("value", &self.value), ("institution", &self.institution)];
        for (name, field) in fields {
            if field.contains([FIELD_SEPARATOR, '\n', '\r']) {
                return Err(StoreError::Unencodable(format!(
                    "{} {:?} contains ';' or a line break",
                    name, field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_line() {
        let record = KeyRecord::new(KeyType::Email, "a@b.com", "BankA");
        assert_eq!(record.to_line(), "EMAIL;a@b.com;BankA");
        assert_eq!(record.to_string(), "EMAIL;a@b.com;BankA");
    }

    #[test]
    fn test_from_line() {
        let record = KeyRecord::from_line("CNPJ;11.222.333/0001-81;Banco do Brasil").unwrap();
        assert_eq!(record.key_type, KeyType::Cnpj);
        assert_eq!(record.value, "11.222.333/0001-81");
        assert_eq!(record.institution, "Banco do Brasil");
    }

    #[test]
    fn test_from_line_accepts_lower_case_tag() {
        let record = KeyRecord::from_line("phone;+5511987654321;BankA").unwrap();
        assert_eq!(record.key_type, KeyType::Phone);
    }

    #[test]
    fn test_from_line_field_count() {
        assert_eq!(
            KeyRecord::from_line("EMAIL;a@b.com"),
            Err(RecordParseError::FieldCount(2))
        );
        assert_eq!(
            KeyRecord::from_line("EMAIL;a@b.com;Bank;A"),
            Err(RecordParseError::FieldCount(4))
        );
    }

    #[test]
    fn test_from_line_unknown_type() {
        let err = KeyRecord::from_line("FOO;a@b.com;BankA").unwrap_err();
        assert_eq!(
            err,
            RecordParseError::KeyType(ValidationError::UnknownKeyType("FOO".into()))
        );
    }

    #[test]
    fn test_from_line_keeps_empty_institution() {
        let record = KeyRecord::from_line("EMAIL;a@b.com;").unwrap();
        assert_eq!(record.institution, "");
    }

    #[test]
    fn test_ensure_encodable() {
        assert!(KeyRecord::new(KeyType::Email, "a@b.com", "Bank A")
            .ensure_encodable()
            .is_ok());

        let err = KeyRecord::new(KeyType::Email, "a@b.com", "Bank;A")
            .ensure_encodable()
            .unwrap_err();
        assert!(matches!(err, StoreError::Unencodable(_)));

        assert!(KeyRecord::new(KeyType::Email, "a@b.com", "Bank\nEMAIL;x@y.com;Evil")
            .ensure_encodable()
            .is_err());
    }
}
