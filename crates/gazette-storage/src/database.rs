// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection setup: PRAGMAs, WAL mode and the persona table.

use std::path::Path;

use gazette_core::GazetteError;
use tokio_rusqlite::Connection;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS personas (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    id           TEXT NOT NULL UNIQUE,
    name         TEXT NOT NULL,
    prompt_text  TEXT NOT NULL,
    portrait_uri TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL
);
";

/// Owned handle to the persona database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file and ensures the schema exists.
    ///
    /// Parent directories are created when missing.
    pub async fn open(path: &str) -> Result<Self, GazetteError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| GazetteError::Storage {
                        source: Box::new(e),
                    })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| GazetteError::Storage {
                source: format!("failed to open {path}: {e}").into(),
            })?;
        let db = Self { conn };
        db.prepare(true).await?;
        debug!(path, "persona database opened");
        Ok(db)
    }

    /// In-memory database, used by tests.
    pub async fn open_in_memory() -> Result<Self, GazetteError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| GazetteError::Storage {
                source: format!("failed to open in-memory database: {e}").into(),
            })?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn prepare(&self, wal: bool) -> Result<(), GazetteError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal {
                    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                }
                conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Convert tokio-rusqlite errors to [`GazetteError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> GazetteError {
    GazetteError::Storage {
        source: e.to_string().into(),
    }
}
