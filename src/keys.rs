// src/keys.rs
//! Key material: the three service secrets and the loader that resolves them
//!
//! `TransportPrivateKey`, `StorageKey` and `IndexKey` are separate types, so
//! handing one to an API that expects another does not compile.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hkdf::Hkdf;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use secure_gate::SecureRandomExt;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::aliases::{IndexKey32, OperatorSecret, RandomSecret32, StorageKey32};
use crate::config::{self, Config, KeyDerivation};
use crate::consts::{DERIVED_KEY_LEN, HKDF_INFO_INDEX, HKDF_INFO_STORAGE_V1};
use crate::error::{CoreError, Result};

/// Asymmetric private key used to unwrap client session keys
pub struct TransportPrivateKey(RsaPrivateKey);

impl TransportPrivateKey {
    pub fn new(key: RsaPrivateKey) -> Self {
        Self(key)
    }

    /// Parse a PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1 (`BEGIN RSA PRIVATE KEY`) PEM
    pub fn from_pem(pem: &str) -> Result<Self> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|_| CoreError::InvalidKeyMaterial("transport private key is not a valid RSA PEM"))
    }

    pub(crate) fn expose_secret(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl fmt::Debug for TransportPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransportPrivateKey([REDACTED])")
    }
}

/// Data-encryption key for one storage envelope version
pub struct StorageKey(StorageKey32);

impl StorageKey {
    pub fn from_bytes(bytes: [u8; DERIVED_KEY_LEN]) -> Self {
        Self(StorageKey32::new(bytes))
    }

    pub fn derive(secret: &OperatorSecret, derivation: KeyDerivation) -> Result<Self> {
        derive_key(secret, derivation, HKDF_INFO_STORAGE_V1).map(Self::from_bytes)
    }

    pub(crate) fn expose_secret(&self) -> &[u8; DERIVED_KEY_LEN] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StorageKey([REDACTED])")
    }
}

/// HMAC key for the deterministic search index
pub struct IndexKey(IndexKey32);

impl IndexKey {
    pub fn from_bytes(bytes: [u8; DERIVED_KEY_LEN]) -> Self {
        Self(IndexKey32::new(bytes))
    }

    pub fn derive(secret: &OperatorSecret, derivation: KeyDerivation) -> Result<Self> {
        derive_key(secret, derivation, HKDF_INFO_INDEX).map(Self::from_bytes)
    }

    pub(crate) fn expose_secret(&self) -> &[u8; DERIVED_KEY_LEN] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IndexKey([REDACTED])")
    }
}

/// Turn an arbitrary-length operator secret into a 256-bit key.
///
/// `Sha256` ignores `info`: both key roles hash the raw secret, which keeps
/// byte-compatibility with data written before `HkdfSha256` existed.
pub fn derive_key(
    secret: &OperatorSecret,
    derivation: KeyDerivation,
    info: &[u8],
) -> Result<[u8; DERIVED_KEY_LEN]> {
    let ikm = secret.expose_secret().as_bytes();
    match derivation {
        KeyDerivation::Sha256 => Ok(Sha256::digest(ikm).into()),
        KeyDerivation::HkdfSha256 => {
            let mut okm = [0u8; DERIVED_KEY_LEN];
            Hkdf::<Sha256>::new(None, ikm)
                .expand(info, &mut okm)
                .map_err(|_| CoreError::InvalidKeyMaterial("HKDF output length"))?;
            Ok(okm)
        }
    }
}

/// Fresh random 256-bit operator secret, base64-encoded
pub fn generate_operator_secret() -> OperatorSecret {
    let bytes = RandomSecret32::new();
    OperatorSecret::new(STANDARD.encode(bytes.expose_secret()))
}

/// Named places the loader looks for each secret
pub struct KeySources {
    pub private_key_path: Option<PathBuf>,
    pub fallback_private_key_path: Option<PathBuf>,
    pub private_key_pem: Option<String>,
    pub storage_secret: Option<OperatorSecret>,
    pub index_secret: Option<OperatorSecret>,
    pub derivation: KeyDerivation,
}

impl KeySources {
    pub fn from_config(keys: &config::Keys) -> Self {
        KeySources {
            private_key_path: keys.private_key_path.clone(),
            fallback_private_key_path: Some(keys.fallback_private_key_path.clone()),
            private_key_pem: keys.private_key_pem.clone(),
            storage_secret: keys.storage_secret.clone().map(|s| OperatorSecret::new(s)),
            index_secret: keys.index_secret.clone().map(|s| OperatorSecret::new(s)),
            derivation: keys.derivation,
        }
    }
}

/// The service's secrets, loaded once and immutable afterwards
#[derive(Debug)]
pub struct KeyMaterial {
    transport: TransportPrivateKey,
    storage: StorageKey,
    index: IndexKey,
}

impl KeyMaterial {
    pub fn new(transport: TransportPrivateKey, storage: StorageKey, index: IndexKey) -> Self {
        Self {
            transport,
            storage,
            index,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::load(&KeySources::from_config(&config.keys))
    }

    /// Resolve all three secrets or fail naming the first one that is missing.
    pub fn load(sources: &KeySources) -> Result<Self> {
        let transport = load_private_key(sources)?;

        let storage_secret = require_secret(
            sources.storage_secret.as_ref(),
            "storage_secret (EPV_STORAGE_SECRET)",
        )?;
        let storage = StorageKey::derive(storage_secret, sources.derivation)?;

        let index_secret = require_secret(
            sources.index_secret.as_ref(),
            "index_secret (EPV_INDEX_SECRET)",
        )?;
        let index = IndexKey::derive(index_secret, sources.derivation)?;

        info!(derivation = ?sources.derivation, "key material loaded");
        Ok(Self::new(transport, storage, index))
    }

    pub fn transport(&self) -> &TransportPrivateKey {
        &self.transport
    }

    pub fn storage(&self) -> &StorageKey {
        &self.storage
    }

    pub fn index(&self) -> &IndexKey {
        &self.index
    }

    pub fn into_parts(self) -> (TransportPrivateKey, StorageKey, IndexKey) {
        (self.transport, self.storage, self.index)
    }
}

fn require_secret<'a>(
    secret: Option<&'a OperatorSecret>,
    source_name: &str,
) -> Result<&'a OperatorSecret> {
    secret
        .filter(|s| !s.expose_secret().is_empty())
        .ok_or_else(|| CoreError::MissingKeyMaterial {
            source_name: source_name.to_string(),
        })
}

/// Explicit path → fallback path → inline PEM. First source that parses wins.
fn load_private_key(sources: &KeySources) -> Result<TransportPrivateKey> {
    let mut checked = Vec::new();

    let paths = [
        sources.private_key_path.as_deref(),
        sources.fallback_private_key_path.as_deref(),
    ];
    for path in paths.into_iter().flatten() {
        checked.push(path.display().to_string());
        if let Some(key) = try_key_file(path) {
            return Ok(key);
        }
    }

    checked.push("private_key_pem (EPV_PRIVATE_KEY_PEM)".to_string());
    if let Some(pem) = sources.private_key_pem.as_deref().filter(|p| !p.trim().is_empty()) {
        match TransportPrivateKey::from_pem(pem) {
            Ok(key) => {
                info!("loaded transport private key from inline PEM");
                return Ok(key);
            }
            Err(_) => warn!("inline transport private key PEM is invalid"),
        }
    }

    Err(CoreError::MissingKeyMaterial {
        source_name: format!("transport private key (checked {})", checked.join(", ")),
    })
}

fn try_key_file(path: &Path) -> Option<TransportPrivateKey> {
    if !path.exists() {
        debug!(path = %path.display(), "no transport private key at path");
        return None;
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(CoreError::from)
        .and_then(|pem| TransportPrivateKey::from_pem(&pem));
    match parsed {
        Ok(key) => {
            info!(path = %path.display(), "loaded transport private key");
            Some(key)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "unusable transport private key, trying next source");
            None
        }
    }
}
