// tests/vector_tests.rs
//! Fixed interop vectors produced by an independent implementation.
//! Stored envelopes and tokens written elsewhere must keep decoding here.

mod common;
mod support;

use encrypted_profile_vault::config::KeyDerivation;
use encrypted_profile_vault::consts::{HKDF_INFO_INDEX, HKDF_INFO_STORAGE_V1};
use encrypted_profile_vault::keys::derive_key;
use encrypted_profile_vault::SubmitRequest;
use serde::Deserialize;
use support::{crypto_service_with, secret};

#[derive(Debug, Deserialize)]
struct Vectors {
    storage_secret: String,
    index_secret: String,
    plaintext: String,
    storage_key_sha256_hex: String,
    index_key_sha256_hex: String,
    storage_envelope: String,
    index_tokens: Vec<TokenVector>,
    public_key_fingerprint: String,
    transport: Vec<TransportVector>,
    hkdf_same_secret: HkdfVector,
}

#[derive(Debug, Deserialize)]
struct TokenVector {
    plaintext: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct TransportVector {
    session_key_bits: u32,
    #[serde(flatten)]
    request: SubmitRequest,
}

#[derive(Debug, Deserialize)]
struct HkdfVector {
    secret: String,
    storage_v1_hex: String,
    index_hex: String,
}

fn vectors() -> Vectors {
    serde_json::from_str(include_str!("data/interop_vectors.json")).expect("vector file parses")
}

#[test]
fn test_sha256_key_derivation_matches_vectors() {
    let v = vectors();
    let storage = derive_key(&secret(&v.storage_secret), KeyDerivation::Sha256, HKDF_INFO_STORAGE_V1).unwrap();
    let index = derive_key(&secret(&v.index_secret), KeyDerivation::Sha256, HKDF_INFO_INDEX).unwrap();

    assert_eq!(hex::encode(storage), v.storage_key_sha256_hex);
    assert_eq!(hex::encode(index), v.index_key_sha256_hex);
}

#[test]
fn test_hkdf_derivation_matches_vectors_and_separates_roles() {
    let v = vectors();
    let s = secret(&v.hkdf_same_secret.secret);
    let storage = derive_key(&s, KeyDerivation::HkdfSha256, HKDF_INFO_STORAGE_V1).unwrap();
    let index = derive_key(&s, KeyDerivation::HkdfSha256, HKDF_INFO_INDEX).unwrap();

    assert_eq!(hex::encode(storage), v.hkdf_same_secret.storage_v1_hex);
    assert_eq!(hex::encode(index), v.hkdf_same_secret.index_hex);
    assert_ne!(storage, index);
}

#[test]
fn test_existing_storage_envelope_still_decrypts() {
    common::setup();
    let v = vectors();
    let crypto = crypto_service_with(&v.storage_secret, &v.index_secret);

    let plaintext = crypto.decrypt_from_storage(&v.storage_envelope).unwrap();
    assert_eq!(plaintext, v.plaintext);
}

#[test]
fn test_index_tokens_match_vectors() {
    let v = vectors();
    let crypto = crypto_service_with(&v.storage_secret, &v.index_secret);

    for tv in &v.index_tokens {
        assert_eq!(crypto.hash_for_index(&tv.plaintext).as_str(), tv.token, "{}", tv.plaintext);
    }
}

#[test]
fn test_public_key_fingerprint_matches_vector() {
    let v = vectors();
    let crypto = crypto_service_with(&v.storage_secret, &v.index_secret);
    assert_eq!(crypto.public_key_fingerprint(), v.public_key_fingerprint);
}

#[test]
fn test_transport_vectors_decrypt_for_every_session_key_size() {
    common::setup();
    let v = vectors();
    let crypto = crypto_service_with(&v.storage_secret, &v.index_secret);

    let mut sizes: Vec<u32> = v.transport.iter().map(|t| t.session_key_bits).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![128, 192, 256]);

    for tv in &v.transport {
        let envelope = tv.request.to_envelope().unwrap();
        let plaintext = crypto.decrypt_transport(&envelope).unwrap();
        assert_eq!(plaintext, v.plaintext, "session key {} bits", tv.session_key_bits);
    }
}
