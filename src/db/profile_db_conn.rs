// src/db/profile_db_conn.rs
use rusqlite::{Connection, Result};
use std::{fs, path::Path, time::Duration};
use tracing::{debug, warn};

/// Open (creating if needed) the profile database at `db_path` and ensure the schema.
pub fn open_profile_db<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), %err, "could not create database directory");
        }
    }

    let conn = Connection::open(db_path)?;
    debug!(path = %db_path.display(), "opened profile database");
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_profile_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            storage_envelope TEXT NOT NULL,
            index_token      TEXT NOT NULL UNIQUE,
            created_at       TEXT NOT NULL
        );
        "#,
    )
}
