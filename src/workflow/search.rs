// src/workflow/search.rs
use tracing::{info, warn};

use crate::crypto::CryptoService;
use crate::db::ProfileStore;
use crate::domain::{ProfileMatch, SearchResults, UnreadableRecord};
use crate::error::Result;

/// Find every stored profile whose identifier equals `query`.
///
/// No match is an empty result, not an error. A row that fails to decrypt is
/// reported in `SearchResults::unreadable` and does not abort the others.
pub fn search_profiles<S: ProfileStore>(
    crypto: &CryptoService,
    store: &S,
    query: &str,
) -> Result<SearchResults> {
    let index_token = crypto.hash_for_index(query);
    let records = store.find_by_token(&index_token)?;

    let mut results = SearchResults::default();
    for record in records {
        match crypto.decrypt_from_storage(&record.storage_envelope) {
            Ok(identifier) => results.matches.push(ProfileMatch {
                id: record.id,
                identifier,
            }),
            Err(error) => {
                warn!(id = record.id, %error, "stored profile could not be decrypted");
                results.unreadable.push(UnreadableRecord {
                    id: record.id,
                    error,
                });
            }
        }
    }

    info!(
        matches = results.matches.len(),
        unreadable = results.unreadable.len(),
        "search complete"
    );
    Ok(results)
}
