// src/consts.rs
//! Shared constants: security parameters and defaults

/// AES-GCM nonce length (96 bits), used by both transport and storage ciphers
pub const AES_GCM_NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length, appended to every ciphertext
pub const AES_GCM_TAG_LEN: usize = 16;

/// Width of every storage envelope version tag (`b"v1:"`)
pub const ENVELOPE_TAG_LEN: usize = 3;

/// Version tag of the AES-256-GCM storage envelope
pub const ENVELOPE_V1_TAG: &[u8; ENVELOPE_TAG_LEN] = b"v1:";

/// Length of every derived symmetric key
pub const DERIVED_KEY_LEN: usize = 32;

/// HKDF `info` label binding the derived key to the v1 storage cipher
pub const HKDF_INFO_STORAGE_V1: &[u8] = b"profile-vault storage v1";

/// HKDF `info` label binding the derived key to the blind index
pub const HKDF_INFO_INDEX: &[u8] = b"profile-vault index";

/// National identifiers are exactly this many ASCII digits
pub const DEFAULT_IDENTIFIER_LENGTH: usize = 13;

/// Default config file location (override with `EPV_CONFIG`)
pub const DEFAULT_CONFIG_PATH: &str = "profile-vault.toml";

/// Primary private-key location checked first
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "private_key.pem";

/// Well-known fallback private-key location
pub const FALLBACK_PRIVATE_KEY_PATH: &str = "certs/private_key.pem";

/// Database file name, placed under the platform data dir when no path is configured
pub const DEFAULT_DATABASE_FILE: &str = "profiles.db";

/// Number of hex characters shown for the public-key fingerprint
pub const FINGERPRINT_HEX_LEN: usize = 16;
