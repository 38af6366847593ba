//! Document command handlers

use anyhow::{Context, Result};

use draftly_core::{Document, DocumentStatus, SharingService, SharingStatus, Store};

use crate::commands::parse_document_id;
use crate::output::{DocumentListing, Output};

/// Create a new document
pub fn create(
    store: &mut Store,
    title: String,
    body: Option<String>,
    status: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut doc = Document::new(title);
    if let Some(body) = body {
        doc.set_body(body);
    }
    if let Some(status) = status {
        let status: DocumentStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        doc.set_status(status);
    }

    store
        .add_document(&doc)
        .context("Failed to create document")?;

    if output.is_json() {
        output.print_document(&doc);
    } else if output.is_quiet() {
        println!("{}", doc.id);
    } else {
        output.success(&format!(
            "Created {} document: {}",
            doc.status,
            &doc.id.to_string()[..8]
        ));
    }

    Ok(())
}

/// List all documents, decorating shared ones with their public link
pub fn list(store: &mut Store, output: &Output) -> Result<()> {
    let documents = store.get_all_documents()?;

    let service = SharingService::new(store);
    let mut listings = Vec::new();
    for document in documents {
        let share_url = match service.status(document.id)? {
            SharingStatus::Public { url } => Some(url),
            SharingStatus::Private => None,
        };
        listings.push(DocumentListing {
            document,
            share_url,
        });
    }

    output.print_listings(&listings);
    Ok(())
}

/// Show document details
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;

    let doc = store
        .get_document(document_id)?
        .ok_or_else(|| anyhow::anyhow!("Document not found: {}", id))?;

    output.print_document(&doc);
    Ok(())
}

/// Delete a document
///
/// Any share secret goes with it; the link dies when the document does.
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;

    let doc = store
        .get_document(document_id)?
        .ok_or_else(|| anyhow::anyhow!("Document not found: {}", id))?;

    // Confirm deletion
    if output.should_prompt() {
        println!("Delete document: {} - {}", &doc.id.to_string()[..8], doc.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .delete_document(document_id)
        .context("Failed to delete document")?;

    output.success(&format!("Deleted document: {}", &document_id.to_string()[..8]));

    Ok(())
}

/// Ask a yes/no question on stdin
fn confirm(question: &str) -> Result<bool> {
    use std::io::{self, Write};

    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
