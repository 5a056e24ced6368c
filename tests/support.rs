// tests/support.rs
//! Test fixtures: fixed RSA keys and the services built from them

use encrypted_profile_vault::aliases::OperatorSecret;
use encrypted_profile_vault::config::KeyDerivation;
use encrypted_profile_vault::db::{ProfileStore, StoreError};
use encrypted_profile_vault::domain::ProfileRecord;
use encrypted_profile_vault::keys::{IndexKey, KeyMaterial, StorageKey, TransportPrivateKey};
use encrypted_profile_vault::{seal_for_transport, CryptoService, IndexToken, TransportEnvelope};

/// PKCS#8 key shared with the interop vectors in `tests/data/interop_vectors.json`
pub const TRANSPORT_PRIVATE_KEY_PEM: &str = include_str!("data/transport_private_key.pem");
#[allow(dead_code)]
pub const TRANSPORT_PUBLIC_KEY_PEM: &str = include_str!("data/transport_public_key.pem");
/// Unrelated PKCS#1 key, for wrong-key cases
#[allow(dead_code)]
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("data/other_private_key_pkcs1.pem");

pub const STORAGE_SECRET: &str = "MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTIzNDU2Nzg5MDE=";
pub const INDEX_SECRET: &str = "NmE0OWM1YjYyMDNmNDYyZDFjMmY0MjAxMGQwYzNiYjU=";

#[allow(dead_code)]
pub const NATIONAL_ID: &str = "1234567890123";

pub fn secret(value: &str) -> OperatorSecret {
    OperatorSecret::new(value.to_string())
}

pub fn key_material_with(storage_secret: &str, index_secret: &str) -> KeyMaterial {
    KeyMaterial::new(
        TransportPrivateKey::from_pem(TRANSPORT_PRIVATE_KEY_PEM).expect("fixture PEM parses"),
        StorageKey::derive(&secret(storage_secret), KeyDerivation::Sha256).unwrap(),
        IndexKey::derive(&secret(index_secret), KeyDerivation::Sha256).unwrap(),
    )
}

#[allow(dead_code)]
pub fn key_material() -> KeyMaterial {
    key_material_with(STORAGE_SECRET, INDEX_SECRET)
}

#[allow(dead_code)]
pub fn crypto_service() -> CryptoService {
    CryptoService::new(key_material()).expect("crypto service")
}

#[allow(dead_code)]
pub fn crypto_service_with(storage_secret: &str, index_secret: &str) -> CryptoService {
    CryptoService::new(key_material_with(storage_secret, index_secret)).expect("crypto service")
}

/// What a browser client would send for `identifier`
#[allow(dead_code)]
pub fn sealed(crypto: &CryptoService, identifier: &str) -> TransportEnvelope {
    seal_for_transport(&crypto.public_key(), identifier).expect("seal")
}

/// A store whose backend is always down
#[allow(dead_code)]
pub struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn save(&self, _: &str, _: &IndexToken) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn find_by_token(&self, _: &IndexToken) -> Result<Vec<ProfileRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
