// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`PersonaRepository`] backed by the `personas` table.

use async_trait::async_trait;
use chrono::Utc;
use gazette_config::model::StorageConfig;
use gazette_core::{
    AdapterType, GazetteError, HealthStatus, PersonaRepository, PluginAdapter, types::Persona,
};
use rusqlite::OptionalExtension;
use tracing::{debug, info};

use crate::database::{Database, map_tr_err};

/// Append-only persona list in SQLite.
pub struct SqlitePersonaStore {
    db: Database,
}

impl SqlitePersonaStore {
    /// Opens the store at `config.database_path`.
    pub async fn open(config: &StorageConfig) -> Result<Self, GazetteError> {
        let db = Database::open(&config.database_path).await?;
        Ok(Self { db })
    }

    pub async fn open_in_memory() -> Result<Self, GazetteError> {
        Ok(Self {
            db: Database::open_in_memory().await?,
        })
    }

    /// Number of stored personas.
    pub async fn count(&self) -> Result<usize, GazetteError> {
        self.db
            .connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                let n: i64 = conn.query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))?;
                Ok(n as usize)
            })
            .await
            .map_err(map_tr_err)
    }
}

fn row_to_persona(row: &rusqlite::Row<'_>) -> Result<Persona, rusqlite::Error> {
    Ok(Persona {
        id: row.get(0)?,
        name: row.get(1)?,
        prompt_text: row.get(2)?,
        portrait_uri: row.get(3)?,
    })
}

#[async_trait]
impl PluginAdapter for SqlitePersonaStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GazetteError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PersonaRepository for SqlitePersonaStore {
    async fn list(&self) -> Result<Vec<Persona>, GazetteError> {
        self.db
            .connection()
            .call(|conn| -> Result<Vec<Persona>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, name, prompt_text, portrait_uri FROM personas ORDER BY seq ASC",
                )?;
                let rows = stmt.query_map([], row_to_persona)?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn append(&self, persona: &Persona) -> Result<(), GazetteError> {
        let p = persona.clone();
        let created_at = Utc::now().to_rfc3339();
        let inserted = self
            .db
            .connection()
            .call(move |conn| -> Result<bool, rusqlite::Error> {
                let changed = conn.execute(
                    "INSERT OR IGNORE INTO personas (id, name, prompt_text, portrait_uri, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![p.id, p.name, p.prompt_text, p.portrait_uri, created_at],
                )?;
                Ok(changed == 1)
            })
            .await
            .map_err(map_tr_err)?;

        if !inserted {
            debug!(id = %persona.id, "persona id already taken");
            return Err(GazetteError::PersonaExists(persona.id.clone()));
        }
        info!(id = %persona.id, name = %persona.name, "persona appended");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Persona>, GazetteError> {
        let id = id.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<Option<Persona>, rusqlite::Error> {
                conn.query_row(
                    "SELECT id, name, prompt_text, portrait_uri FROM personas WHERE id = ?1",
                    rusqlite::params![id],
                    row_to_persona,
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(id: &str, name: &str) -> Persona {
        Persona {
            id: id.to_string(),
            name: name.to_string(),
            prompt_text: format!("You are {name}."),
            portrait_uri: format!("https://img.example/{id}.png"),
        }
    }

    #[tokio::test]
    async fn append_then_list_keeps_creation_order() {
        let store = SqlitePersonaStore::open_in_memory().await.unwrap();
        store.append(&persona("gandhi", "Mahatma Gandhi")).await.unwrap();
        store.append(&persona("churchill", "Winston Churchill")).await.unwrap();
        store.append(&persona("ashoka", "Ashoka")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["gandhi", "churchill", "ashoka"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = SqlitePersonaStore::open_in_memory().await.unwrap();
        store.append(&persona("gandhi", "Mahatma Gandhi")).await.unwrap();

        let err = store
            .append(&persona("gandhi", "Someone Else"))
            .await
            .unwrap_err();
        assert!(matches!(err, GazetteError::PersonaExists(id) if id == "gandhi"));

        let stored = store.get("gandhi").await.unwrap().unwrap();
        assert_eq!(stored.name, "Mahatma Gandhi");
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = SqlitePersonaStore::open_in_memory().await.unwrap();
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gazette.db");
        let config = StorageConfig {
            database_path: path.display().to_string(),
        };

        {
            let store = SqlitePersonaStore::open(&config).await.unwrap();
            assert!(dir.path().join("nested").is_dir());
            store.append(&persona("lincoln", "Abraham Lincoln")).await.unwrap();
        }

        let reopened = SqlitePersonaStore::open(&config).await.unwrap();
        let all = reopened.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], persona("lincoln", "Abraham Lincoln"));
        assert_eq!(
            reopened.health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }
}
