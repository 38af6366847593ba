//! Sharing command handlers
//!
//! In JSON mode these emit the same `ShareResponse` envelope the command
//! endpoint returns, failures included; human mode propagates errors.

use anyhow::Result;

use draftly_core::{ShareCommand, SharingService, SharingStatus, Store};

use crate::commands::parse_document_id;
use crate::output::Output;

/// Make a document publicly reachable and print the share URL
pub fn public(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;
    let mut service = SharingService::new(store);

    if output.is_json() {
        let response = service.dispatch(ShareCommand::Public { document_id });
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let url = service.request_public(document_id)?;
    if output.is_quiet() {
        println!("{}", url);
    } else {
        output.success(&format!("Document is now public: {}", url));
    }

    Ok(())
}

/// Revoke a document's share secret
pub fn private(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;
    let mut service = SharingService::new(store);

    if output.is_json() {
        let response = service.dispatch(ShareCommand::Private { document_id });
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    service.request_private(document_id)?;
    output.success("Document is now private.");

    Ok(())
}

/// Show the current sharing state
pub fn status(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let document_id = parse_document_id(&id, store)?;
    let service = SharingService::new(store);
    let status = service.status(document_id)?;

    if output.is_json() {
        let json = match &status {
            SharingStatus::Public { url } => {
                serde_json::json!({"shared": true, "url": url})
            }
            SharingStatus::Private => serde_json::json!({"shared": false}),
        };
        println!("{}", json);
        return Ok(());
    }

    match status {
        SharingStatus::Public { url } => {
            if output.is_quiet() {
                println!("{}", url);
            } else {
                println!("Public: {}", url);
            }
        }
        SharingStatus::Private => {
            if !output.is_quiet() {
                println!("Private");
            }
        }
    }

    Ok(())
}
