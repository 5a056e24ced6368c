// src/crypto/index.rs
//! Deterministic blind index: base64(HMAC-SHA256(index_key, utf8(plaintext)))

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{CoreError, Result};
use crate::keys::IndexKey;

type HmacSha256 = Hmac<Sha256>;

/// Search token stored next to each record; equal plaintexts give equal tokens
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndexToken(String);

impl IndexToken {
    /// Wrap a token read back from storage
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IndexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens are linkable across records; keep them out of logs.
        f.write_str("IndexToken(..)")
    }
}

pub struct IndexHasher {
    keyed: HmacSha256,
}

impl IndexHasher {
    pub fn new(key: &IndexKey) -> Result<Self> {
        let keyed = HmacSha256::new_from_slice(key.expose_secret())
            .map_err(|_| CoreError::InvalidKeyMaterial("index key length"))?;
        Ok(Self { keyed })
    }

    pub fn hash(&self, plaintext: &str) -> IndexToken {
        let mut mac = self.keyed.clone();
        mac.update(plaintext.as_bytes());
        IndexToken(STANDARD.encode(mac.finalize().into_bytes()))
    }
}
