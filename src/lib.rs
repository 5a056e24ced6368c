// src/lib.rs
//! encrypted-profile-vault: encrypted identifier intake with blind-index search
//!
//! Features:
//! - Hybrid transport unwrap (RSA-OAEP-SHA256 + AES-GCM)
//! - Versioned, self-describing AES-256-GCM storage envelopes
//! - Deterministic HMAC-SHA256 blind index for equality search
//! - SQLite persistence with a uniqueness-backed duplicate check
//! - Full secure-gate integration for key material

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod domain;
pub mod error;
pub mod keys;
pub mod workflow;

// Re-export everything users need at the crate root
pub use config::Config;
pub use crypto::{seal_for_transport, CryptoService, IndexToken, SubmitRequest, TransportEnvelope};
pub use db::{ProfileStore, SqliteProfileStore, StoreError};
pub use domain::{IdentifierRule, ProfileMatch, SearchResults, SubmitReceipt};
pub use error::{CoreError, Result as CoreResult};
pub use keys::{KeyMaterial, KeySources};
pub use workflow::{search_profiles, submit_profile, submit_request};
