//! Owner-facing sharing controls
//!
//! The toggle between Private (no secret on file) and Public (secret on
//! file) for a document. Both transitions are idempotent and safe to
//! re-issue: repeating make-public returns the same URL, repeating
//! make-private is a no-op reported as success.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::secret;
use crate::storage::StorageError;
use crate::store::{AttachOutcome, ClearOutcome, Store};

/// Errors surfaced by the sharing toggle
#[derive(Error, Debug)]
pub enum ShareError {
    /// The command referenced a document that does not exist
    #[error("Document not found: {id}")]
    DocumentNotFound { id: Uuid },

    /// The underlying store failed; the command may simply be re-issued
    #[error("Unable to update sharing state. Please try again.")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ShareError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DocumentNotFound { id } => ShareError::DocumentNotFound { id },
            other => ShareError::Storage(other),
        }
    }
}

/// Current sharing state of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingStatus {
    /// No secret on file; normal visibility rules apply
    Private,
    /// A secret is on file; the document is reachable at `url`
    Public { url: String },
}

/// Wire command accepted from the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ShareCommand {
    /// Make the document publicly reachable via a secret link
    Public {
        #[serde(rename = "documentId")]
        document_id: Uuid,
    },
    /// Revoke the secret link
    Private {
        #[serde(rename = "documentId")]
        document_id: Uuid,
    },
}

/// Wire response returned to the presentation layer
///
/// Every command resolves to one of these; no error escapes the command
/// boundary as a panic or silent failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ShareResponse {
    fn ok() -> Self {
        Self {
            success: true,
            permalink: None,
            message: None,
        }
    }

    fn ok_with_permalink(permalink: String) -> Self {
        Self {
            success: true,
            permalink: Some(permalink),
            message: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            permalink: None,
            message: Some(message),
        }
    }
}

/// Stateless sharing service over the store
///
/// Construct one wherever a handler needs it; all durable state lives in
/// the store.
pub struct SharingService<'a> {
    store: &'a mut Store,
}

impl<'a> SharingService<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Make a document publicly reachable, returning the share URL
    ///
    /// Mints a fresh secret and attaches it insert-if-absent. If a secret
    /// is already on file (an earlier call, or a concurrent one that won
    /// the insert), that secret is adopted and the call still succeeds:
    /// two rapid toggles must never surface an error.
    pub fn request_public(&mut self, id: Uuid) -> Result<String, ShareError> {
        let doc = self
            .store
            .get_document(id)?
            .ok_or(ShareError::DocumentNotFound { id })?;
        let length = self.store.config().secret_length;

        let secret = loop {
            let candidate = secret::generate(length);
            match self.store.attach_secret(id, &candidate)? {
                AttachOutcome::Inserted => {
                    info!(document_id = %id, "document made public");
                    break candidate;
                }
                AttachOutcome::AlreadyShared => {
                    if let Some(existing) = self.store.secret_for(id)? {
                        break existing;
                    }
                    // The winning secret was cleared before we could read
                    // it back; mint again.
                }
            }
        };

        let permalink = doc.permalink(&self.store.config().base_url);
        Ok(share_url(&permalink, &secret))
    }

    /// Revoke a document's share secret
    ///
    /// Clearing an absent secret means the document is already private;
    /// both outcomes report success. A later make-public mints a new
    /// secret, so revoked links stay dead.
    pub fn request_private(&mut self, id: Uuid) -> Result<(), ShareError> {
        if self.store.get_document(id)?.is_none() {
            return Err(ShareError::DocumentNotFound { id });
        }

        if self.store.clear_secret(id)? == ClearOutcome::Removed {
            info!(document_id = %id, "document made private");
        }
        Ok(())
    }

    /// Current sharing state, with the share URL when public
    pub fn status(&self, id: Uuid) -> Result<SharingStatus, ShareError> {
        let doc = self
            .store
            .get_document(id)?
            .ok_or(ShareError::DocumentNotFound { id })?;

        Ok(match self.store.secret_for(id)? {
            Some(secret) => {
                let permalink = doc.permalink(&self.store.config().base_url);
                SharingStatus::Public {
                    url: share_url(&permalink, &secret),
                }
            }
            None => SharingStatus::Private,
        })
    }

    /// Whether the document currently has a share secret
    pub fn is_public(&self, id: Uuid) -> Result<bool, ShareError> {
        Ok(matches!(self.status(id)?, SharingStatus::Public { .. }))
    }

    /// Dispatch a presentation-layer command
    ///
    /// The two actions are independent code paths; each resolves to an
    /// explicit success/failure response.
    pub fn dispatch(&mut self, command: ShareCommand) -> ShareResponse {
        match command {
            ShareCommand::Public { document_id } => match self.request_public(document_id) {
                Ok(url) => ShareResponse::ok_with_permalink(url),
                Err(err) => ShareResponse::failure(err.to_string()),
            },
            ShareCommand::Private { document_id } => match self.request_private(document_id) {
                Ok(()) => ShareResponse::ok(),
                Err(err) => ShareResponse::failure(err.to_string()),
            },
        }
    }
}

/// Append the secret to a permalink as the `secret` query parameter
fn share_url(permalink: &str, secret: &str) -> String {
    let separator = if permalink.contains('?') { '&' } else { '?' };
    format!("{}{}secret={}", permalink, separator, secret)
}
