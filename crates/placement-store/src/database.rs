//! SQLite-backed document store.
//!
//! The [`SqliteStore`] keeps every collection in one `documents` table with a
//! JSON body per row.  The connection sits behind a mutex and every operation
//! runs on tokio's blocking pool so callers never block an async worker.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::client::DocumentStore;
use crate::document::{merge, Document, Fields, Precondition, Query};
use crate::error::{Result, StoreError};
use crate::migrations;

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/placement-desk/placement.db`
    /// - macOS:   `~/Library/Application Support/com.placement.placement-desk/placement.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\placement\placement-desk\data\placement.db`
    pub fn new() -> Result<Self> {
        Self::open_at(&default_path()?)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "opening document database");

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory database, gone when the last clone is dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Filesystem path of the open database, if it is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {e}")))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}

/// Default database location in the platform data directory.
pub fn default_path() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("com", "placement", "placement-desk").ok_or(StoreError::NoDataDir)?;
    Ok(project_dirs.data_dir().join("placement.db"))
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let (collection, id) = (collection.to_string(), id.to_string());
        self.with_conn(move |conn| {
            let body = select_body(conn, &collection, &id)?;
            Ok(body.map(|fields| Document::new(id, fields)))
        })
        .await
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        let query = query.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, body FROM documents
                 WHERE collection = ?1
                 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(params![query.collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut docs = Vec::new();
            for row in rows {
                let (id, body) = row?;
                let fields = parse_body(&body)?;
                if query.matches(&fields) {
                    docs.push(Document::new(id, fields));
                }
            }
            Ok(docs)
        })
        .await
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String> {
        let collection = collection.to_string();
        self.with_conn(move |conn| {
            let id = Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO documents (collection, id, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    collection,
                    id,
                    serde_json::to_string(&fields)?,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(id)
        })
        .await
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let (collection, id) = (collection.to_string(), id.to_string());
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (collection, id)
                 DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![
                    collection,
                    id,
                    serde_json::to_string(&fields)?,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<()> {
        let (collection, id) = (collection.to_string(), id.to_string());
        self.with_conn(move |conn| patch_document(conn, &collection, &id, None, patch))
            .await
    }

    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        precondition: &Precondition,
        patch: Fields,
    ) -> Result<()> {
        let (collection, id) = (collection.to_string(), id.to_string());
        let precondition = precondition.clone();
        self.with_conn(move |conn| {
            patch_document(conn, &collection, &id, Some(&precondition), patch)
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn select_body(conn: &Connection, collection: &str, id: &str) -> Result<Option<Fields>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;
    body.map(|b| parse_body(&b)).transpose()
}

fn parse_body(body: &str) -> Result<Fields> {
    Ok(serde_json::from_str(body)?)
}

// Read-check-write inside one transaction so the precondition holds at write time
fn patch_document(
    conn: &mut Connection,
    collection: &str,
    id: &str,
    precondition: Option<&Precondition>,
    patch: Fields,
) -> Result<()> {
    let tx = conn.transaction()?;

    let mut body =
        select_body(&tx, collection, id)?.ok_or_else(|| StoreError::not_found(collection, id))?;
    if let Some(precondition) = precondition {
        precondition.check(collection, id, &body)?;
    }
    merge(&mut body, patch);

    tx.execute(
        "UPDATE documents SET body = ?3, updated_at = ?4
         WHERE collection = ?1 AND id = ?2",
        params![
            collection,
            id,
            serde_json::to_string(&body)?,
            Utc::now().to_rfc3339(),
        ],
    )?;
    tx.commit()?;
    Ok(())
}
