// src/crypto/service.rs
//! `CryptoService`: the four pipeline operations plus public-key export
//!
//! Built once from `KeyMaterial`; holds no per-request state and is `Send + Sync`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};
use tracing::info;

use super::index::{IndexHasher, IndexToken};
use super::storage::{CipherVariant, StorageCipher};
use super::transport::{TransportDecryptor, TransportEnvelope};
use crate::config::Config;
use crate::consts::FINGERPRINT_HEX_LEN;
use crate::error::{CoreError, Result};
use crate::keys::KeyMaterial;

pub struct CryptoService {
    transport: TransportDecryptor,
    storage: StorageCipher,
    index: IndexHasher,
    public_key_pem: String,
    fingerprint: String,
}

impl CryptoService {
    pub fn new(keys: KeyMaterial) -> Result<Self> {
        let (transport_key, storage_key, index_key) = keys.into_parts();
        let storage = StorageCipher::new(CipherVariant::v1(&storage_key));
        Self::with_storage(
            TransportDecryptor::new(transport_key),
            storage,
            IndexHasher::new(&index_key)?,
        )
    }

    /// Build with a caller-assembled envelope registry (e.g. extra read-only variants).
    pub fn with_storage(
        transport: TransportDecryptor,
        storage: StorageCipher,
        index: IndexHasher,
    ) -> Result<Self> {
        let public_key = transport.public_key();
        let der = public_key
            .to_public_key_der()
            .map_err(|_| CoreError::InvalidKeyMaterial("transport public key encoding"))?;
        let public_key_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|_| CoreError::InvalidKeyMaterial("transport public key encoding"))?;
        let mut fingerprint = hex::encode(Sha256::digest(der.as_bytes()));
        fingerprint.truncate(FINGERPRINT_HEX_LEN);

        info!(
            public_key = %fingerprint,
            storage_version = ?storage.current_version(),
            "crypto service ready"
        );
        Ok(Self {
            transport,
            storage,
            index,
            public_key_pem,
            fingerprint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(KeyMaterial::from_config(config)?)
    }

    pub fn decrypt_transport(&self, envelope: &TransportEnvelope) -> Result<String> {
        self.transport.decrypt(envelope)
    }

    /// Returns the base64 storage envelope.
    pub fn encrypt_for_storage(&self, plaintext: &str) -> Result<String> {
        let envelope = self.storage.encrypt(plaintext.as_bytes())?;
        Ok(STANDARD.encode(envelope))
    }

    pub fn decrypt_from_storage(&self, envelope_b64: &str) -> Result<String> {
        let envelope = STANDARD
            .decode(envelope_b64.trim())
            .map_err(|_| CoreError::MalformedEnvelope("envelope is not valid base64"))?;
        let plaintext = self.storage.decrypt(&envelope)?;
        String::from_utf8(plaintext)
            .map_err(|_| CoreError::MalformedEnvelope("envelope plaintext is not UTF-8"))
    }

    pub fn hash_for_index(&self, plaintext: &str) -> IndexToken {
        self.index.hash(plaintext)
    }

    /// PEM-encoded SubjectPublicKeyInfo for client-side sealing
    pub fn export_public_key(&self) -> &str {
        &self.public_key_pem
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.transport.public_key()
    }

    pub fn public_key_fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn storage(&self) -> &StorageCipher {
        &self.storage
    }
}
