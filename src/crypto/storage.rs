// src/crypto/storage.rs
//! Versioned storage envelopes
//!
//! Wire format: `version_tag(3) || nonce(12) || ciphertext || tag(16)`.
//!
//! `StorageCipher` is a closed registry of `CipherVariant`s. The first entry
//! is the only writer; every registered entry stays readable. Adding a format
//! means adding a variant here and registering it, old variants untouched.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use tracing::debug;

use crate::consts::{AES_GCM_NONCE_LEN, AES_GCM_TAG_LEN, ENVELOPE_V1_TAG};
use crate::error::{CoreError, Result};
use crate::keys::StorageKey;

/// Every envelope format this build understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EnvelopeVersion {
    /// AES-256-GCM, 96-bit random nonce, no AAD
    V1,
}

impl EnvelopeVersion {
    pub const fn tag(self) -> &'static [u8] {
        match self {
            EnvelopeVersion::V1 => ENVELOPE_V1_TAG,
        }
    }

    /// Smallest well-formed envelope: tag + nonce + empty ciphertext + auth tag
    pub const fn min_len(self) -> usize {
        match self {
            EnvelopeVersion::V1 => ENVELOPE_V1_TAG.len() + AES_GCM_NONCE_LEN + AES_GCM_TAG_LEN,
        }
    }
}

/// One independently keyed envelope format
pub enum CipherVariant {
    V1(Aes256Gcm),
}

impl CipherVariant {
    pub fn v1(key: &StorageKey) -> Self {
        CipherVariant::V1(Aes256Gcm::new(key.expose_secret().into()))
    }

    pub fn version(&self) -> EnvelopeVersion {
        match self {
            CipherVariant::V1(_) => EnvelopeVersion::V1,
        }
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            CipherVariant::V1(cipher) => {
                // Fresh OS-random nonce on every call
                let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
                let sealed = cipher
                    .encrypt(&nonce, plaintext)
                    .map_err(|_| CoreError::StorageEncryption)?;

                let tag = self.version().tag();
                let mut envelope = Vec::with_capacity(tag.len() + nonce.len() + sealed.len());
                envelope.extend_from_slice(tag);
                envelope.extend_from_slice(&nonce);
                envelope.extend_from_slice(&sealed);
                Ok(envelope)
            }
        }
    }

    fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let version = self.version();
        if envelope.len() < version.min_len() {
            return Err(CoreError::MalformedEnvelope("envelope shorter than minimum length"));
        }
        let body = &envelope[version.tag().len()..];

        match self {
            CipherVariant::V1(cipher) => {
                let (nonce, sealed) = body.split_at(AES_GCM_NONCE_LEN);
                cipher
                    .decrypt(Nonce::from_slice(nonce), sealed)
                    .map_err(|_| CoreError::StorageAuthentication)
            }
        }
    }
}

pub struct StorageCipher {
    variants: Vec<CipherVariant>,
}

impl StorageCipher {
    /// `current` encrypts all new data and is always readable.
    pub fn new(current: CipherVariant) -> Self {
        Self {
            variants: vec![current],
        }
    }

    /// Register a read-only variant for envelopes written by an older format or key.
    ///
    /// A variant whose version is already registered is rejected.
    pub fn with_reader(mut self, variant: CipherVariant) -> Result<Self> {
        if self.variants.iter().any(|v| v.version() == variant.version()) {
            return Err(CoreError::Config(format!(
                "storage envelope version {:?} registered twice",
                variant.version()
            )));
        }
        self.variants.push(variant);
        Ok(self)
    }

    pub fn current_version(&self) -> EnvelopeVersion {
        self.variants[0].version()
    }

    pub fn registered_versions(&self) -> Vec<EnvelopeVersion> {
        self.variants.iter().map(CipherVariant::version).collect()
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let writer = &self.variants[0];
        debug!(version = ?writer.version(), "encrypting storage envelope");
        writer.encrypt(plaintext)
    }

    /// Dispatch on the leading version tag only, preferring the longest match.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let variant = self
            .variants
            .iter()
            .filter(|v| envelope.starts_with(v.version().tag()))
            .max_by_key(|v| v.version().tag().len())
            .ok_or(CoreError::UnsupportedEnvelopeVersion)?;
        debug!(version = ?variant.version(), "decrypting storage envelope");
        variant.decrypt(envelope)
    }
}
