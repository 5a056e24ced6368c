// src/crypto/mod.rs
//! Pure cryptographic operations, no I/O and no database
//!
//! All functions work exclusively on in-memory buffers.
mod index;
mod service;
mod storage;
mod transport;

pub use index::{IndexHasher, IndexToken};
pub use service::CryptoService;
pub use storage::{CipherVariant, EnvelopeVersion, StorageCipher};
pub use transport::{seal_for_transport, SubmitRequest, TransportDecryptor, TransportEnvelope};
