//! Key validators - format and check-digit rules for registrable keys.
//!
//! Every key type is a variant of the closed [`KeyType`] enum. Each variant
//! carries a pure `&str -> bool` validation rule:
//! - `CPF`: 11-digit individual tax ID, `DDD.DDD.DDD-DD` with two check digits
//! - `CNPJ`: 14-digit organization tax ID, `DD.DDD.DDD/DDDD-DD` with two check digits
//! - `PHONE`: international number with a mandatory leading `+`
//! - `EMAIL`: local part `@` domain with a 2 to 6 letter top-level label

mod contact;
mod error;
mod key_type;
mod tax_id;

pub use contact::{is_valid_email, is_valid_phone};
pub use error::ValidationError;
pub use key_type::KeyType;
pub use tax_id::{is_valid_cnpj, is_valid_cpf};
