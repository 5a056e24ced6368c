// tests/config_tests.rs
mod common;
mod support;

use std::env;
use std::fs;
use std::path::PathBuf;

use encrypted_profile_vault::config::{
    KeyDerivation, ENV_DATABASE, ENV_INDEX_SECRET, ENV_PRIVATE_KEY_PATH, ENV_PRIVATE_KEY_PEM,
    ENV_STORAGE_SECRET,
};
use encrypted_profile_vault::{Config, CoreError, CryptoService, IdentifierRule};
use serial_test::serial;
use support::{INDEX_SECRET, STORAGE_SECRET, TRANSPORT_PRIVATE_KEY_PEM};
use tempfile::tempdir;

const ALL_VARS: [&str; 5] = [
    ENV_PRIVATE_KEY_PATH,
    ENV_PRIVATE_KEY_PEM,
    ENV_STORAGE_SECRET,
    ENV_INDEX_SECRET,
    ENV_DATABASE,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.keys.private_key_path, Some(PathBuf::from("private_key.pem")));
    assert_eq!(config.keys.fallback_private_key_path, PathBuf::from("certs/private_key.pem"));
    assert!(config.keys.storage_secret.is_none());
    assert!(config.keys.index_secret.is_none());
    assert_eq!(config.keys.derivation, KeyDerivation::Sha256);
    assert_eq!(config.validation.identifier_length, 13);
    assert_eq!(IdentifierRule::from_config(&config), IdentifierRule::default());
}

#[test]
fn test_parse_full_toml() {
    let config = Config::from_toml(
        r#"
        [keys]
        private_key_path = "/etc/vault/key.pem"
        storage_secret = "s"
        index_secret = "i"
        derivation = "hkdf-sha256"

        [paths]
        database = "/var/lib/vault/profiles.db"

        [validation]
        identifier_length = 9
        "#,
    )
    .unwrap();

    assert_eq!(config.keys.private_key_path, Some(PathBuf::from("/etc/vault/key.pem")));
    assert_eq!(config.keys.derivation, KeyDerivation::HkdfSha256);
    assert_eq!(config.keys.storage_secret.as_deref(), Some("s"));
    assert_eq!(config.paths.database, PathBuf::from("/var/lib/vault/profiles.db"));
    assert_eq!(config.validation.identifier_length, 9);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml("[validation]\nidentifier_length = 11\n").unwrap();
    assert_eq!(config.validation.identifier_length, 11);
    assert_eq!(config.keys.private_key_path, Some(PathBuf::from("private_key.pem")));
    assert_eq!(config.keys.derivation, KeyDerivation::Sha256);
}

#[test]
fn test_unknown_derivation_is_rejected() {
    let err = Config::from_toml("[keys]\nderivation = \"md5\"\n").unwrap_err();
    assert!(matches!(err, CoreError::Toml(_)));
}

#[test]
fn test_debug_redacts_secrets() {
    let config = Config::from_toml(
        "[keys]\nstorage_secret = \"hunter2-storage\"\nindex_secret = \"hunter2-index\"\n",
    )
    .unwrap();
    let shown = format!("{config:?}");
    assert!(!shown.contains("hunter2"));
    assert!(shown.contains("REDACTED"));
}

#[test]
#[serial]
fn test_zero_identifier_length_is_rejected() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile-vault.toml");
    fs::write(&path, "[validation]\nidentifier_length = 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    common::setup();
    clear_env();
    let dir = tempdir().unwrap();
    let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.validation.identifier_length, 13);
    assert!(config.keys.storage_secret.is_none());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile-vault.toml");
    fs::write(
        &path,
        "[keys]\nstorage_secret = \"from-file\"\n[paths]\ndatabase = \"file.db\"\n",
    )
    .unwrap();

    env::set_var(ENV_STORAGE_SECRET, "from-env");
    env::set_var(ENV_DATABASE, dir.path().join("env.db"));
    let config = Config::load_from(&path);
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.keys.storage_secret.as_deref(), Some("from-env"));
    assert_eq!(config.paths.database, dir.path().join("env.db"));
}

#[test]
#[serial]
fn test_empty_env_var_does_not_override() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile-vault.toml");
    fs::write(&path, "[keys]\nindex_secret = \"from-file\"\n").unwrap();

    env::set_var(ENV_INDEX_SECRET, "");
    let config = Config::load_from(&path);
    clear_env();

    assert_eq!(config.unwrap().keys.index_secret.as_deref(), Some("from-file"));
}

#[test]
#[serial]
fn test_crypto_service_from_env_only() {
    clear_env();
    let dir = tempdir().unwrap();

    env::set_var(ENV_PRIVATE_KEY_PATH, dir.path().join("no-such-key.pem"));
    env::set_var(ENV_PRIVATE_KEY_PEM, TRANSPORT_PRIVATE_KEY_PEM);
    env::set_var(ENV_STORAGE_SECRET, STORAGE_SECRET);
    env::set_var(ENV_INDEX_SECRET, INDEX_SECRET);
    let mut config = Config::load_from(dir.path().join("absent.toml"));
    clear_env();

    let config = config.as_mut().unwrap();
    config.keys.fallback_private_key_path = dir.path().join("no-fallback.pem");
    let crypto = CryptoService::from_config(config).unwrap();
    assert_eq!(
        crypto.public_key_fingerprint(),
        support::crypto_service().public_key_fingerprint()
    );
}

#[test]
#[serial]
fn test_crypto_service_without_secrets_fails() {
    clear_env();
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.keys.private_key_path = None;
    config.keys.fallback_private_key_path = dir.path().join("none.pem");
    config.keys.private_key_pem = Some(TRANSPORT_PRIVATE_KEY_PEM.to_string());

    let err = CryptoService::from_config(&config).err().unwrap();
    assert!(matches!(err, CoreError::MissingKeyMaterial { .. }));
}
