//! Fetch command handler
//!
//! Reads a document the way an unauthenticated visitor would: through the
//! access gate, with whatever secret the request carries.

use anyhow::{bail, Result};

use draftly_core::{AccessGate, ReadRequest, Store};

use crate::commands::parse_document_id;
use crate::output::Output;

/// Fetch a document through the access gate
pub fn fetch(store: &Store, id: String, secret: Option<String>, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;

    let mut request = ReadRequest::new(document_id);
    if let Some(secret) = secret {
        request = request.with_secret(secret);
    }

    let gate = AccessGate::new(store);
    match gate.fetch_document(&request)? {
        Some(doc) => {
            output.print_document(&doc);
            Ok(())
        }
        // Same answer whether the document is restricted, the secret is
        // wrong, or no secret exists at all.
        None => bail!("Document not available."),
    }
}
