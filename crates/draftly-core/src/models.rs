//! Data models for Draftly
//!
//! Defines the core data structures: Document and DocumentStatus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a document
///
/// Every status except `Published` is restricted: the document is
/// invisible to unauthenticated readers unless a matching share secret
/// is presented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Work in progress, owner-only
    Draft,
    /// Awaiting review, owner-only
    Pending,
    /// Publication scheduled for a future date, owner-only
    Scheduled,
    /// Publicly visible
    Published,
}

impl DocumentStatus {
    /// Whether this status hides the document from unauthenticated readers
    pub fn is_restricted(&self) -> bool {
        !matches!(self, DocumentStatus::Published)
    }

    /// Status name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Scheduled => "scheduled",
            DocumentStatus::Published => "published",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "pending" => Ok(DocumentStatus::Pending),
            "scheduled" => Ok(DocumentStatus::Scheduled),
            "published" => Ok(DocumentStatus::Published),
            _ => Err(format!(
                "Unknown document status: '{}'. Valid: draft, pending, scheduled, published",
                s
            )),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document with a visibility state and a canonical address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// URL slug, set at creation from the title
    pub slug: String,
    /// Document body content
    pub body: String,
    /// Publication state
    pub status: DocumentStatus,
    /// When this document was created
    pub created_at: DateTime<Utc>,
    /// When this document was last updated
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new draft document with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let id = Uuid::new_v4();
        let slug = match slugify(&title) {
            s if s.is_empty() => id.to_string(),
            s => s,
        };
        let now = Utc::now();
        Self {
            id,
            title,
            slug,
            body: String::new(),
            status: DocumentStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a document with a specific ID (for loading from storage)
    pub fn with_id(id: Uuid, title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = match slugify(&title) {
            s if s.is_empty() => id.to_string(),
            s => s,
        };
        let now = Utc::now();
        Self {
            id,
            title,
            slug,
            body: String::new(),
            status: DocumentStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the title
    ///
    /// The slug is not rewritten; share URLs stay stable across edits.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Update the body
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.updated_at = Utc::now();
    }

    /// Update the publication status
    pub fn set_status(&mut self, status: DocumentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Canonical address of this document under the given site root
    pub fn permalink(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.slug)
    }
}

/// Derive a URL slug from a title
///
/// Lowercases, maps runs of non-alphanumeric characters to a single '-',
/// and trims leading/trailing dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
