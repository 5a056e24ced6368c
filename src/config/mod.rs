// src/config/mod.rs
//! Configuration system for encrypted-profile-vault
//!
//! TOML file + env overrides, loaded into an explicit value at startup.

pub use app::{Config, KeyDerivation, Keys, Paths, Validation};
pub use defaults::{
    ENV_CONFIG, ENV_DATABASE, ENV_INDEX_SECRET, ENV_PRIVATE_KEY_PATH, ENV_PRIVATE_KEY_PEM,
    ENV_STORAGE_SECRET,
};

mod app;
mod defaults;
