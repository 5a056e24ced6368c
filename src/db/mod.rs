// src/db/mod.rs
//! Persistence collaborator
//!
//! The workflows only see `ProfileStore`. `SqliteProfileStore` is the bundled
//! implementation; anything that can signal `StoreError::UniqueViolation` on a
//! duplicate token can stand in for it.

use thiserror::Error;

use crate::crypto::IndexToken;
use crate::domain::ProfileRecord;

pub mod profile_db_conn;
pub mod profile_db_ops;

pub use profile_db_conn::{open_profile_db, open_profile_db_in_memory};
pub use profile_db_ops::SqliteProfileStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violation on index token")]
    UniqueViolation,

    #[error("database error: {0}")]
    Sql(rusqlite::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::UniqueViolation
            }
            _ => StoreError::Sql(err),
        }
    }
}

pub trait ProfileStore {
    /// Insert one row atomically; returns the new row id.
    fn save(&self, storage_envelope: &str, index_token: &IndexToken) -> Result<i64, StoreError>;

    /// All rows carrying `index_token`, ordered by id.
    fn find_by_token(&self, index_token: &IndexToken) -> Result<Vec<ProfileRecord>, StoreError>;
}

impl<S: ProfileStore + ?Sized> ProfileStore for &S {
    fn save(&self, storage_envelope: &str, index_token: &IndexToken) -> Result<i64, StoreError> {
        (**self).save(storage_envelope, index_token)
    }

    fn find_by_token(&self, index_token: &IndexToken) -> Result<Vec<ProfileRecord>, StoreError> {
        (**self).find_by_token(index_token)
    }
}

impl<S: ProfileStore + ?Sized> ProfileStore for std::sync::Arc<S> {
    fn save(&self, storage_envelope: &str, index_token: &IndexToken) -> Result<i64, StoreError> {
        (**self).save(storage_envelope, index_token)
    }

    fn find_by_token(&self, index_token: &IndexToken) -> Result<Vec<ProfileRecord>, StoreError> {
        (**self).find_by_token(index_token)
    }
}
