// src/crypto/transport.rs
//! Hybrid transport unwrap: RSA-OAEP(SHA-256) session key + AES-GCM payload
//!
//! Every failure, whether a bad wrap, a bad tag, a wrong IV length or a
//! non-UTF-8 plaintext, collapses into `CoreError::TransportDecryption`.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::{Oaep, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::aliases::{PlainText, SessionKey};
use crate::consts::AES_GCM_NONCE_LEN;
use crate::error::{CoreError, Result};
use crate::keys::TransportPrivateKey;

/// Binary hybrid-encrypted payload, consumed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportEnvelope {
    pub ciphertext: Vec<u8>,
    pub wrapped_key: Vec<u8>,
    pub iv: Vec<u8>,
}

/// Inbound submit payload as it crosses the boundary (base64 fields)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(alias = "encrypted_data")]
    pub identifier_ciphertext: String,
    #[serde(alias = "encrypted_key")]
    pub wrapped_key: String,
    pub iv: String,
}

impl SubmitRequest {
    pub fn to_envelope(&self) -> Result<TransportEnvelope> {
        TransportEnvelope::from_base64(&self.identifier_ciphertext, &self.wrapped_key, &self.iv)
    }
}

impl From<&TransportEnvelope> for SubmitRequest {
    fn from(envelope: &TransportEnvelope) -> Self {
        SubmitRequest {
            identifier_ciphertext: STANDARD.encode(&envelope.ciphertext),
            wrapped_key: STANDARD.encode(&envelope.wrapped_key),
            iv: STANDARD.encode(&envelope.iv),
        }
    }
}

impl TransportEnvelope {
    pub fn from_base64(ciphertext: &str, wrapped_key: &str, iv: &str) -> Result<Self> {
        let decode = |field: &str| {
            STANDARD
                .decode(field.trim())
                .map_err(|_| CoreError::TransportDecryption)
        };
        Ok(TransportEnvelope {
            ciphertext: decode(ciphertext)?,
            wrapped_key: decode(wrapped_key)?,
            iv: decode(iv)?,
        })
    }
}

pub struct TransportDecryptor {
    private_key: TransportPrivateKey,
}

impl TransportDecryptor {
    pub fn new(private_key: TransportPrivateKey) -> Self {
        Self { private_key }
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.expose_secret().to_public_key()
    }

    pub fn decrypt(&self, envelope: &TransportEnvelope) -> Result<String> {
        debug!(
            ciphertext_len = envelope.ciphertext.len(),
            wrapped_key_len = envelope.wrapped_key.len(),
            "decrypting transport payload"
        );

        let session_key = self
            .private_key
            .expose_secret()
            .decrypt(Oaep::new::<Sha256>(), &envelope.wrapped_key)
            .map(|bytes| SessionKey::new(bytes))
            .map_err(|_| CoreError::TransportDecryption)?;

        let plaintext = aead_open(session_key.expose_secret(), &envelope.iv, &envelope.ciphertext)?;

        let text = String::from_utf8(plaintext.expose_secret().clone())
            .map_err(|_| CoreError::TransportDecryption)?;
        debug!("transport payload decrypted");
        Ok(text)
    }
}

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Clients may wrap an AES-128, AES-192 or AES-256 key.
fn aead_open(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<PlainText> {
    if iv.len() != AES_GCM_NONCE_LEN {
        return Err(CoreError::TransportDecryption);
    }
    let nonce = Nonce::from_slice(iv);

    let opened = match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| CoreError::TransportDecryption)?
            .decrypt(nonce, ciphertext),
        24 => Aes192Gcm::new_from_slice(key)
            .map_err(|_| CoreError::TransportDecryption)?
            .decrypt(nonce, ciphertext),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| CoreError::TransportDecryption)?
            .decrypt(nonce, ciphertext),
        _ => return Err(CoreError::TransportDecryption),
    };
    opened
        .map(|bytes| PlainText::new(bytes))
        .map_err(|_| CoreError::TransportDecryption)
}

/// Client half of the protocol: wrap a fresh AES-256-GCM key for `public_key`.
pub fn seal_for_transport(public_key: &RsaPublicKey, plaintext: &str) -> Result<TransportEnvelope> {
    let session_key = Aes256Gcm::generate_key(&mut OsRng);
    let iv = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = Aes256Gcm::new(&session_key)
        .encrypt(&iv, plaintext.as_bytes())
        .map_err(|_| CoreError::InvalidKeyMaterial("transport session key"))?;
    let wrapped_key = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), session_key.as_slice())
        .map_err(|_| CoreError::InvalidKeyMaterial("transport public key"))?;

    Ok(TransportEnvelope {
        ciphertext,
        wrapped_key,
        iv: iv.to_vec(),
    })
}
