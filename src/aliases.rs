// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret containers used throughout encrypted-profile-vault.
//! Every alias zeroizes on drop. The aliases are structurally identical, so
//! `crate::keys` wraps them in distinct newtypes to keep key roles apart.

pub use secure_gate::{dynamic_alias, fixed_alias, random_alias};

// Fixed-size secrets
fixed_alias!(StorageKey32, 32); // 256-bit AES-GCM data-encryption key (one per envelope version)
fixed_alias!(IndexKey32, 32); // 256-bit HMAC-SHA256 blind-index key

// Dynamic secrets
dynamic_alias!(OperatorSecret, String); // Arbitrary-length secret as supplied by the operator
dynamic_alias!(SessionKey, Vec<u8>); // Unwrapped per-request AES key from the client
dynamic_alias!(PlainText, Vec<u8>); // Decrypted payload bytes before UTF-8 validation

// Random secrets
random_alias!(RandomSecret32, 32); // Fresh operator secret bytes, filled from the OS RNG
