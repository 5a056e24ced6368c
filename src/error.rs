// src/error.rs
//! Public error type for the entire crate
//!
//! Crypto failures carry fixed messages only. Nothing that reaches a caller
//! through this type contains key bytes, plaintext, or library error text.

use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("missing key material: {source_name}")]
    MissingKeyMaterial { source_name: String },

    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(&'static str),

    #[error("transport payload could not be decrypted")]
    TransportDecryption,

    #[error("invalid {field}: {reason}")]
    DomainValidation { field: &'static str, reason: String },

    #[error("unsupported storage envelope version")]
    UnsupportedEnvelopeVersion,

    #[error("malformed storage envelope: {0}")]
    MalformedEnvelope(&'static str),

    #[error("storage envelope failed authentication")]
    StorageAuthentication,

    #[error("identifier could not be sealed for storage")]
    StorageEncryption,

    #[error("identifier is already registered")]
    DuplicateIdentifier,

    #[error("persistence failure")]
    Persistence(#[source] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for CoreError {
    /// The single mapping from the store's conflict signal to the domain conflict.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => CoreError::DuplicateIdentifier,
            other => CoreError::Persistence(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
