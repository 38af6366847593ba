//! CLI command handlers

pub mod config;
pub mod doc;
pub mod fetch;
pub mod share;

use anyhow::{bail, Result};
use uuid::Uuid;

use draftly_core::Store;

/// Parse a document ID (supports full UUID or prefix)
pub fn parse_document_id(id: &str, store: &Store) -> Result<Uuid> {
    // Try full UUID first
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    // Try prefix match
    let documents = store.get_all_documents()?;
    let matches: Vec<_> = documents
        .iter()
        .filter(|d| d.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No document found matching: {}", id),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple documents match '{}':", id);
            for doc in &matches {
                eprintln!("  {} - {}", doc.id, doc.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
