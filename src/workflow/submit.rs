// src/workflow/submit.rs
//! Submit: transport-decrypt → validate → seal + hash → persist
//!
//! Nothing is written unless every earlier step succeeded, and the store's
//! single-row insert is atomic, so a failed submit leaves zero rows behind.

use tracing::{info, warn};

use crate::crypto::{CryptoService, SubmitRequest, TransportEnvelope};
use crate::db::ProfileStore;
use crate::domain::{IdentifierRule, SubmitReceipt};
use crate::error::{CoreError, Result};

pub fn submit_profile<S: ProfileStore>(
    crypto: &CryptoService,
    store: &S,
    rule: &IdentifierRule,
    envelope: &TransportEnvelope,
) -> Result<SubmitReceipt> {
    // 1. Transport unwrap
    let identifier = crypto.decrypt_transport(envelope)?;

    // 2. Shape check before any side effect
    rule.validate(&identifier)?;

    // 3. Storage envelope + blind index
    let storage_envelope = crypto.encrypt_for_storage(&identifier)?;
    let index_token = crypto.hash_for_index(&identifier);

    // 4. Persist; the store's conflict signal becomes DuplicateIdentifier
    match store.save(&storage_envelope, &index_token) {
        Ok(id) => {
            info!(id, "profile stored");
            Ok(SubmitReceipt { id })
        }
        Err(err) => {
            let err = CoreError::from(err);
            warn!(%err, "profile not stored");
            Err(err)
        }
    }
}

/// Boundary convenience: decode the base64 request first.
pub fn submit_request<S: ProfileStore>(
    crypto: &CryptoService,
    store: &S,
    rule: &IdentifierRule,
    request: &SubmitRequest,
) -> Result<SubmitReceipt> {
    submit_profile(crypto, store, rule, &request.to_envelope()?)
}
