// src/config/app.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_validation")]
    pub validation: Validation,
}

/// How an operator secret is turned into a fixed-length symmetric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDerivation {
    /// SHA-256 of the secret. Byte-compatible with existing stored data.
    #[default]
    Sha256,
    /// HKDF-SHA256 with a per-purpose info label. Not compatible with `Sha256` data.
    HkdfSha256,
}

#[derive(Clone, Deserialize)]
pub struct Keys {
    #[serde(default = "default_private_key_path")]
    pub private_key_path: Option<PathBuf>,
    #[serde(default = "default_fallback_private_key_path")]
    pub fallback_private_key_path: PathBuf,
    pub private_key_pem: Option<String>,
    pub storage_secret: Option<String>,
    pub index_secret: Option<String>,
    #[serde(default)]
    pub derivation: KeyDerivation,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Keys")
            .field("private_key_path", &self.private_key_path)
            .field("fallback_private_key_path", &self.fallback_private_key_path)
            .field("private_key_pem", &redact(&self.private_key_pem))
            .field("storage_secret", &redact(&self.storage_secret))
            .field("index_secret", &redact(&self.index_secret))
            .field("derivation", &self.derivation)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    #[serde(default = "default_database_path")]
    pub database: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Validation {
    #[serde(default = "default_identifier_length")]
    pub identifier_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            validation: default_validation(),
        }
    }
}

impl Config {
    /// Load config from `EPV_CONFIG` (or the default path), then apply env overrides.
    ///
    /// A missing file falls back to built-in defaults, which never contain secrets.
    pub fn load() -> Result<Config> {
        let config_path =
            std::env::var(ENV_CONFIG).unwrap_or_else(|_| crate::consts::DEFAULT_CONFIG_PATH.into());
        Self::load_from(config_path)
    }

    pub fn load_from<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config_path = config_path.as_ref();
        let mut conf = if config_path.exists() {
            debug!(path = %config_path.display(), "reading config file");
            Self::from_toml(&std::fs::read_to_string(config_path)?)?
        } else {
            warn!(path = %config_path.display(), "config file not found, using built-in defaults");
            Config::default()
        };
        conf.apply_env_overrides();
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_toml(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    /// Environment wins over the file for every key and path setting.
    pub fn apply_env_overrides(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(path) = var(ENV_PRIVATE_KEY_PATH) {
            self.keys.private_key_path = Some(path.into());
        }
        if let Some(pem) = var(ENV_PRIVATE_KEY_PEM) {
            self.keys.private_key_pem = Some(pem);
        }
        if let Some(secret) = var(ENV_STORAGE_SECRET) {
            self.keys.storage_secret = Some(secret);
        }
        if let Some(secret) = var(ENV_INDEX_SECRET) {
            self.keys.index_secret = Some(secret);
        }
        if let Some(db) = var(ENV_DATABASE) {
            self.paths.database = db.into();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.validation.identifier_length == 0 {
            return Err(CoreError::Config(
                "validation.identifier_length must be positive".into(),
            ));
        }
        Ok(())
    }
}
