//! SQLite-backed `ProfileStore`
//!
//! Uniqueness of `index_token` is enforced by the schema, so two racing
//! submits of the same identifier resolve inside SQLite: one insert wins,
//! the other surfaces `StoreError::UniqueViolation`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use super::profile_db_conn::{open_profile_db, open_profile_db_in_memory};
use super::{ProfileStore, StoreError};
use crate::crypto::IndexToken;
use crate::domain::ProfileRecord;

pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
}

impl SqliteProfileStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        Ok(Self::from_connection(open_profile_db(db_path)?))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(open_profile_db_in_memory()?))
    }

    /// Wrap an already-initialised connection (see `open_profile_db`).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Total number of stored profiles
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM user_profiles", [], |row| row.get(0))?;
        Ok(count)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".into()))
    }
}

impl ProfileStore for SqliteProfileStore {
    fn save(&self, storage_envelope: &str, index_token: &IndexToken) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO user_profiles (storage_envelope, index_token, created_at)
             VALUES (?1, ?2, ?3)",
            params![storage_envelope, index_token.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_token(&self, index_token: &IndexToken) -> Result<Vec<ProfileRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, storage_envelope, index_token, created_at
             FROM user_profiles
             WHERE index_token = ?1
             ORDER BY id",
        )?;

        let rows = stmt.query_map([index_token.as_str()], |row| {
            let created_at: String = row.get(3)?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
            Ok(ProfileRecord {
                id: row.get(0)?,
                storage_envelope: row.get(1)?,
                index_token: row.get(2)?,
                created_at,
            })
        })?;

        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
