// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{KeyDerivation, Keys, Paths, Validation};
use crate::consts::{
    DEFAULT_DATABASE_FILE, DEFAULT_IDENTIFIER_LENGTH, DEFAULT_PRIVATE_KEY_PATH,
    FALLBACK_PRIVATE_KEY_PATH,
};

pub const ENV_CONFIG: &str = "EPV_CONFIG";
pub const ENV_PRIVATE_KEY_PATH: &str = "EPV_PRIVATE_KEY_PATH";
pub const ENV_PRIVATE_KEY_PEM: &str = "EPV_PRIVATE_KEY_PEM";
pub const ENV_STORAGE_SECRET: &str = "EPV_STORAGE_SECRET";
pub const ENV_INDEX_SECRET: &str = "EPV_INDEX_SECRET";
pub const ENV_DATABASE: &str = "EPV_DATABASE";

/// Key locations only. Secrets have no default.
pub fn default_keys() -> Keys {
    Keys {
        private_key_path: default_private_key_path(),
        fallback_private_key_path: default_fallback_private_key_path(),
        private_key_pem: None,
        storage_secret: None,
        index_secret: None,
        derivation: KeyDerivation::default(),
    }
}

pub fn default_private_key_path() -> Option<PathBuf> {
    Some(DEFAULT_PRIVATE_KEY_PATH.into())
}

pub fn default_fallback_private_key_path() -> PathBuf {
    FALLBACK_PRIVATE_KEY_PATH.into()
}

pub fn default_paths() -> Paths {
    Paths {
        database: default_database_path(),
    }
}

pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("encrypted-profile-vault").join(DEFAULT_DATABASE_FILE))
        .unwrap_or_else(|| DEFAULT_DATABASE_FILE.into())
}

pub fn default_validation() -> Validation {
    Validation {
        identifier_length: default_identifier_length(),
    }
}

pub fn default_identifier_length() -> usize {
    DEFAULT_IDENTIFIER_LENGTH
}
