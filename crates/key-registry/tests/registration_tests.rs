//! Integration tests for key registration against a record file.

use key_registry::{
    FileStore, KeyRecord, KeyType, Outcome, RegistrationService, RegistryError, Store, StoreError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Create a service over a fresh record file in a temp directory.
fn create_test_service() -> (TempDir, PathBuf, RegistrationService) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".keys");
    let service = RegistrationService::new(Store::file(&path));
    (dir, path, service)
}

fn run_cli(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_key-registry"))
        .arg("--store")
        .arg(store)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("KEY_REGISTRY_STORE__PERSIST")
        .output()
        .unwrap()
}

#[test]
fn test_register_into_empty_store() {
    let (_dir, path, mut service) = create_test_service();

    let outcome = service.register("EMAIL", "a@b.com", "BankA").unwrap();

    assert!(outcome.is_registered());
    assert_eq!(fs::read_to_string(&path).unwrap(), "EMAIL;a@b.com;BankA\n");
}

#[test]
fn test_registrations_append_in_order() {
    let (_dir, path, mut service) = create_test_service();

    service.register("cpf", "529.982.247-25", "BankA").unwrap();
    service
        .register("Cnpj", "11.222.333/0001-81", "Bank B")
        .unwrap();
    service
        .register("phone", "+55 11 98765 4321", "BankA")
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "CPF;529.982.247-25;BankA\n\
         CNPJ;11.222.333/0001-81;Bank B\n\
         PHONE;+55 11 98765 4321;BankA\n"
    );
}

#[test]
fn test_duplicate_across_invocations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".keys");

    // Each invocation builds a fresh service, like separate process runs.
    let first = RegistrationService::new(Store::file(&path))
        .register("EMAIL", "a@b.com", "BankA")
        .unwrap();
    assert!(first.is_registered());

    let second = RegistrationService::new(Store::file(&path))
        .register("EMAIL", "a@b.com", "BankB")
        .unwrap();

    match second {
        Outcome::Duplicate { existing } => {
            assert_eq!(existing.institution, "BankA");
        }
        other => panic!("expected duplicate, got {:?}", other),
    }
    assert_eq!(FileStore::new(&path).load().unwrap().len(), 1);
}

#[test]
fn test_duplicate_against_record_of_another_type() {
    let (_dir, path, mut service) = create_test_service();
    fs::write(&path, "PHONE;a@b.com;BankA\n").unwrap();

    let outcome = service.register("EMAIL", "a@b.com", "BankB").unwrap();

    assert_eq!(
        outcome,
        Outcome::Duplicate {
            existing: KeyRecord::new(KeyType::Phone, "a@b.com", "BankA")
        }
    );
}

#[test]
fn test_rejections_do_not_create_store() {
    let (_dir, path, mut service) = create_test_service();

    let unknown = service.register("FOO", "a@b.com", "BankA").unwrap();
    assert_eq!(unknown, Outcome::InvalidType("FOO".into()));

    let invalid = service.register("PHONE", "12345", "BankA").unwrap();
    assert!(matches!(invalid, Outcome::InvalidValue { .. }));

    let bad_cpf = service.register("CPF", "529.982.247-26", "BankA").unwrap();
    assert!(matches!(bad_cpf, Outcome::InvalidValue { .. }));

    assert!(!path.exists());
}

#[test]
fn test_register_after_unterminated_last_line() {
    let (_dir, path, mut service) = create_test_service();
    fs::write(&path, "EMAIL;c@d.com;BankB").unwrap();

    let outcome = service.register("EMAIL", "x@y.com", "BankC").unwrap();
    assert!(outcome.is_registered());

    let records = FileStore::new(&path).load().unwrap();
    assert_eq!(
        records,
        vec![
            KeyRecord::new(KeyType::Email, "c@d.com", "BankB"),
            KeyRecord::new(KeyType::Email, "x@y.com", "BankC"),
        ]
    );

    // The earlier key is still there to block a re-registration.
    let again = service.register("EMAIL", "c@d.com", "BankD").unwrap();
    assert!(matches!(again, Outcome::Duplicate { ref existing } if existing.institution == "BankB"));
}

#[test]
fn test_corrupt_store_is_fatal() {
    let (_dir, path, mut service) = create_test_service();
    fs::write(&path, "EMAIL;a@b.com\n").unwrap();

    let err = service.register("EMAIL", "c@d.com", "BankA").unwrap_err();

    assert!(matches!(
        err,
        RegistryError::Storage(StoreError::Corrupt { line: 1, .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "EMAIL;a@b.com\n");
}

#[test]
fn test_unreadable_store_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut service = RegistrationService::new(Store::file(dir.path()));

    let err = service.register("EMAIL", "a@b.com", "BankA").unwrap_err();

    assert!(matches!(err, RegistryError::Storage(StoreError::Io(_))));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_cli_success_and_duplicate() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join(".keys");

    let output = run_cli(&store, &["email", "a@b.com", "BankA"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Key registered successfully"));
    assert_eq!(fs::read_to_string(&store).unwrap(), "EMAIL;a@b.com;BankA\n");

    let output = run_cli(&store, &["EMAIL", "a@b.com", "BankB"]);
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Key already registered at institution: BankA\n"
    );
}

#[test]
fn test_cli_rejections() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join(".keys");

    let output = run_cli(&store, &["FOO", "a@b.com", "BankA"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Invalid key type: FOO\n"
    );

    let output = run_cli(&store, &["PHONE", "12345", "BankA"]);
    assert_eq!(output.status.code(), Some(2));

    assert!(!store.exists());
}

#[test]
fn test_cli_accepts_values_starting_with_hyphen() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join(".keys");

    let output = run_cli(&store, &["EMAIL", "-a@b.com", "-BankA"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&store).unwrap(), "EMAIL;-a@b.com;-BankA\n");
}

#[test]
fn test_cli_ignores_extra_arguments() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join(".keys");

    let output = run_cli(&store, &["EMAIL", "a@b.com", "BankA", "extra", "--more"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&store).unwrap(), "EMAIL;a@b.com;BankA\n");
}

#[test]
fn test_cli_usage_on_missing_arguments() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join(".keys");

    let output = run_cli(&store, &["EMAIL", "a@b.com"]);

    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage"));
    assert!(!store.exists());
}

#[test]
fn test_cli_storage_failure() {
    let dir = TempDir::new().unwrap();

    // The store path is a directory.
    let output = run_cli(dir.path(), &["EMAIL", "a@b.com", "BankA"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
}
