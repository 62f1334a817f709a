//! Closed set of registrable key types.

use crate::contact::{is_valid_email, is_valid_phone};
use crate::error::ValidationError;
use crate::tax_id::{is_valid_cnpj, is_valid_cpf};
use std::fmt;
use std::str::FromStr;

/// Registrable key type.
///
/// The set is closed: adding a type means adding a variant here and a rule in
/// [`KeyType::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Individual tax ID (11 digits).
    Cpf,
    /// Organization tax ID (14 digits).
    Cnpj,
    /// International phone number.
    Phone,
    /// Email address.
    Email,
}

impl KeyType {
    /// Every key type, in lookup order.
    pub const ALL: [KeyType; 4] = [KeyType::Cpf, KeyType::Cnpj, KeyType::Phone, KeyType::Email];

    /// Upper-case tag used on the command line and in the record file.
    pub const fn tag(self) -> &'static str {
        match self {
            KeyType::Cpf => "CPF",
            KeyType::Cnpj => "CNPJ",
            KeyType::Phone => "PHONE",
            KeyType::Email => "EMAIL",
        }
    }

    /// Short human description with an example value.
    pub const fn describe(self) -> &'static str {
        match self {
            KeyType::Cpf => "individual tax ID, e.g. 529.982.247-25",
            KeyType::Cnpj => "organization tax ID, e.g. 11.222.333/0001-81",
            KeyType::Phone => "phone number with country code, e.g. +55 11 98765 4321",
            KeyType::Email => "email address, e.g. someone@example.com",
        }
    }

    /// Look up a key type by tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<KeyType> {
        let normalized = tag.to_ascii_uppercase();
        Self::ALL.into_iter().find(|kind| kind.tag() == normalized)
    }

    /// Check whether `value` is a well-formed key of this type.
    pub fn validate(self, value: &str) -> bool {
        match self {
            KeyType::Cpf => is_valid_cpf(value),
            KeyType::Cnpj => is_valid_cnpj(value),
            KeyType::Phone => is_valid_phone(value),
            KeyType::Email => is_valid_email(value),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for KeyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::from_tag(s).ok_or_else(|| ValidationError::UnknownKeyType(s.to_string()))
    }
}
