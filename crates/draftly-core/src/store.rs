//! Unified storage interface
//!
//! The `Store` owns the SQLite connection and serves two roles:
//! - host content store: the `documents` table and its lookups
//! - secret store: the `document_secrets` table behind the sharing toggle
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Creates or loads existing
//!
//! // Add a document
//! store.add_document(&doc)?;
//!
//! // Attach a share secret (insert-if-absent)
//! store.attach_secret(doc.id, "aZ3f9Q")?;
//! ```

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Document, DocumentStatus};
use crate::storage::schema::{init_schema, needs_init};
use crate::storage::{StorageError, StorageResult};

/// Visibility handling for document lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    /// Restricted statuses are excluded (the unauthenticated view)
    Enforced,
    /// All statuses are returned (the override re-fetch)
    Bypassed,
}

/// Result of attaching a share secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The secret was stored; this caller minted it
    Inserted,
    /// A secret already existed; nothing was written
    AlreadyShared,
}

/// Result of clearing a share secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The secret was deleted
    Removed,
    /// No secret existed; nothing to do
    NotShared,
}

/// Unified storage interface for Draftly
pub struct Store {
    conn: Connection,
    config: Config,
}

impl Store {
    /// Open the store at the configured location, creating it if needed
    pub fn open() -> anyhow::Result<Self> {
        use anyhow::Context;

        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config).context("Failed to open database")
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> StorageResult<Self> {
        let path = config.sqlite_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path)?;
        Self::from_connection(conn, config)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory(config: Config) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, config)
    }

    fn from_connection(conn: Connection, config: Config) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        if needs_init(&conn) {
            debug!("initializing database schema");
            init_schema(&conn)?;
        }

        Ok(Self { conn, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Document Operations ====================

    /// Add a new document
    pub fn add_document(&mut self, doc: &Document) -> StorageResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO documents (id, title, slug, body, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                doc.id.to_string(),
                doc.title,
                doc.slug,
                doc.body,
                doc.status.as_str(),
                doc.created_at.timestamp_millis(),
                doc.updated_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// Update an existing document
    pub fn update_document(&mut self, doc: &Document) -> StorageResult<()> {
        let changed = self.conn.execute(
            r#"
            UPDATE documents
            SET title = ?, slug = ?, body = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                doc.title,
                doc.slug,
                doc.body,
                doc.status.as_str(),
                doc.updated_at.timestamp_millis(),
                doc.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StorageError::DocumentNotFound { id: doc.id });
        }
        Ok(())
    }

    /// Delete a document
    ///
    /// Any share secret is removed with it via the foreign key cascade.
    pub fn delete_document(&mut self, id: Uuid) -> StorageResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?", params![id.to_string()])?;

        if changed == 0 {
            return Err(StorageError::DocumentNotFound { id });
        }
        Ok(())
    }

    /// Get a document by ID
    pub fn get_document(&self, id: Uuid) -> StorageResult<Option<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, slug, body, status, created_at, updated_at
             FROM documents WHERE id = ?",
        )?;

        let row = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(DocumentRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    slug: row.get(2)?,
                    body: row.get(3)?,
                    status: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })
            .optional()?;

        row.map(decode_document).transpose()
    }

    /// Get all documents, newest first
    pub fn get_all_documents(&self) -> StorageResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, slug, body, status, created_at, updated_at
             FROM documents ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DocumentRow {
                id: row.get(0)?,
                title: row.get(1)?,
                slug: row.get(2)?,
                body: row.get(3)?,
                status: row.get(4)?,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            })
        })?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(decode_document(row?)?);
        }
        Ok(documents)
    }

    /// Get count of documents
    pub fn document_count(&self) -> StorageResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Single-document fetch, the host capability the access gate re-invokes
    ///
    /// With `VisibilityFilter::Enforced` a restricted document yields an
    /// empty result; `Bypassed` returns it regardless of status.
    pub fn primary_lookup(
        &self,
        id: Uuid,
        filter: VisibilityFilter,
    ) -> StorageResult<Vec<Document>> {
        let doc = self.get_document(id)?;
        Ok(match doc {
            Some(doc) if filter == VisibilityFilter::Bypassed || !doc.status.is_restricted() => {
                vec![doc]
            }
            _ => Vec::new(),
        })
    }

    // ==================== Secret Operations ====================

    /// Get the share secret for a document, if any
    ///
    /// An empty secret would be indistinguishable from "not shared"; the
    /// schema forbids storing one, and this read treats it as absent
    /// rather than as a distinct state.
    pub fn secret_for(&self, id: Uuid) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT secret FROM document_secrets WHERE document_id = ?")?;

        let secret: Option<String> = stmt
            .query_row(params![id.to_string()], |row| row.get(0))
            .optional()?;

        Ok(secret.filter(|s| !s.is_empty()))
    }

    /// Store a share secret only if none exists yet (insert-if-absent)
    ///
    /// Never overwrites: under concurrent attaches for the same document,
    /// exactly one caller wins and the rest observe `AlreadyShared`.
    pub fn attach_secret(&mut self, id: Uuid, secret: &str) -> StorageResult<AttachOutcome> {
        if secret.is_empty() {
            return Err(StorageError::EmptySecret);
        }

        if self.get_document(id)?.is_none() {
            return Err(StorageError::DocumentNotFound { id });
        }

        let changed = self.conn.execute(
            r#"
            INSERT INTO document_secrets (document_id, secret, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(document_id) DO NOTHING
            "#,
            params![id.to_string(), secret, Utc::now().timestamp_millis()],
        )?;

        Ok(if changed == 0 {
            AttachOutcome::AlreadyShared
        } else {
            AttachOutcome::Inserted
        })
    }

    /// Delete the share secret for a document, if any
    pub fn clear_secret(&mut self, id: Uuid) -> StorageResult<ClearOutcome> {
        let changed = self.conn.execute(
            "DELETE FROM document_secrets WHERE document_id = ?",
            params![id.to_string()],
        )?;

        Ok(if changed == 0 {
            ClearOutcome::NotShared
        } else {
            ClearOutcome::Removed
        })
    }
}

// ==================== Internal structs ====================

struct DocumentRow {
    id: String,
    title: String,
    slug: String,
    body: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

fn decode_document(row: DocumentRow) -> StorageResult<Document> {
    let id = Uuid::parse_str(&row.id).map_err(|e| StorageError::InvalidRow {
        table: "documents",
        details: format!("invalid UUID '{}': {}", row.id, e),
    })?;

    let status: DocumentStatus = row.status.parse().map_err(|e| StorageError::InvalidRow {
        table: "documents",
        details: e,
    })?;

    let created_at =
        chrono::DateTime::from_timestamp_millis(row.created_at).unwrap_or_else(Utc::now);
    let updated_at =
        chrono::DateTime::from_timestamp_millis(row.updated_at).unwrap_or_else(Utc::now);

    Ok(Document {
        id,
        title: row.title,
        slug: row.slug,
        body: row.body,
        status,
        created_at,
        updated_at,
    })
}
