//! Request-time access gate
//!
//! Decides, once per incoming read, whether a restricted document should
//! be force-included because the request presents a secret matching the
//! one on file. The gate only ever adds visibility: a result set is
//! either returned untouched or replaced by an unfiltered re-fetch of the
//! one requested document.

use tracing::debug;
use uuid::Uuid;

use crate::models::Document;
use crate::storage::StorageResult;
use crate::store::{Store, VisibilityFilter};

/// One incoming read, with its context made explicit
///
/// `primary_lookup` marks the request as a direct single-item fetch for
/// `document_id`. List and collection queries must leave it false so the
/// override can never leak into sibling documents of a batched result.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// The document identity being requested
    pub document_id: Uuid,
    /// The presented secret, if any
    pub secret: Option<String>,
    /// Whether this request is the single primary lookup for `document_id`
    pub primary_lookup: bool,
}

impl ReadRequest {
    /// A primary single-document read with no secret
    pub fn new(document_id: Uuid) -> Self {
        Self {
            document_id,
            secret: None,
            primary_lookup: true,
        }
    }

    /// Attach a presented secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Mark this request as part of a list/collection query
    pub fn as_collection(mut self) -> Self {
        self.primary_lookup = false;
        self
    }
}

/// Extract the `secret` parameter from a raw URL query string
pub fn secret_param(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "secret")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Read-path hook consulted on every document fetch
pub struct AccessGate<'a> {
    store: &'a Store,
}

impl<'a> AccessGate<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Apply the override rules to an already-filtered result set
    ///
    /// Returns the input unchanged unless the request is a primary lookup
    /// carrying a secret that matches the stored one; in that case the
    /// underlying fetch is re-run with the visibility filter bypassed and
    /// its result substituted. Wrong and absent secrets take the same
    /// path, so the response never reveals whether a secret exists.
    pub fn resolve(
        &self,
        request: &ReadRequest,
        results: Vec<Document>,
    ) -> StorageResult<Vec<Document>> {
        let Some(presented) = request.secret.as_deref() else {
            return Ok(results);
        };

        if !request.primary_lookup {
            return Ok(results);
        }

        let Some(stored) = self.store.secret_for(request.document_id)? else {
            return Ok(results);
        };

        // Plain equality. The secret is a share URL, not a credential, so
        // a constant-time comparison is deliberately not used here.
        if stored != presented {
            return Ok(results);
        }

        debug!(document_id = %request.document_id, "secret matched, bypassing visibility filter");
        self.store
            .primary_lookup(request.document_id, VisibilityFilter::Bypassed)
    }

    /// Single-document read through the gate
    ///
    /// Runs the normal filtered fetch, then applies the override rules.
    pub fn fetch_document(&self, request: &ReadRequest) -> StorageResult<Option<Document>> {
        let visible = self
            .store
            .primary_lookup(request.document_id, VisibilityFilter::Enforced)?;
        let resolved = self.resolve(request, visible)?;
        Ok(resolved.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::DocumentStatus;

    fn store_with_draft(secret: Option<&str>) -> (Store, Document) {
        let mut store = Store::open_in_memory(Config::default()).unwrap();
        let doc = Document::new("Hidden Draft");
        store.add_document(&doc).unwrap();
        if let Some(secret) = secret {
            store.attach_secret(doc.id, secret).unwrap();
        }
        (store, doc)
    }

    #[test]
    fn test_matching_secret_reveals_draft() {
        let (store, doc) = store_with_draft(Some("aZ3f9Q"));
        let gate = AccessGate::new(&store);

        let request = ReadRequest::new(doc.id).with_secret("aZ3f9Q");
        let fetched = gate.fetch_document(&request).unwrap();
        assert_eq!(fetched.map(|d| d.id), Some(doc.id));
    }

    #[test]
    fn test_wrong_secret_behaves_like_no_secret() {
        let (store, doc) = store_with_draft(Some("aZ3f9Q"));
        let gate = AccessGate::new(&store);

        let wrong = gate
            .fetch_document(&ReadRequest::new(doc.id).with_secret("wrong"))
            .unwrap();
        let absent = gate.fetch_document(&ReadRequest::new(doc.id)).unwrap();

        assert!(wrong.is_none());
        assert!(absent.is_none());
    }

    #[test]
    fn test_no_record_behaves_like_wrong_secret() {
        // No distinguishing signal for "a secret exists but is different"
        // vs "no secret exists at all"
        let (store, doc) = store_with_draft(None);
        let gate = AccessGate::new(&store);

        let fetched = gate
            .fetch_document(&ReadRequest::new(doc.id).with_secret("aZ3f9Q"))
            .unwrap();
        assert!(fetched.is_none());
    }

    #[test]
    fn test_collection_requests_never_override() {
        let (store, doc) = store_with_draft(Some("aZ3f9Q"));
        let gate = AccessGate::new(&store);

        let request = ReadRequest::new(doc.id)
            .with_secret("aZ3f9Q")
            .as_collection();
        let resolved = gate.resolve(&request, Vec::new()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_override_does_not_leak_to_siblings() {
        let mut store = Store::open_in_memory(Config::default()).unwrap();
        let doc_a = Document::new("A");
        let doc_b = Document::new("B");
        store.add_document(&doc_a).unwrap();
        store.add_document(&doc_b).unwrap();
        store.attach_secret(doc_a.id, "secret-a").unwrap();

        let gate = AccessGate::new(&store);

        // Presenting A's secret while requesting B reveals nothing
        let fetched = gate
            .fetch_document(&ReadRequest::new(doc_b.id).with_secret("secret-a"))
            .unwrap();
        assert!(fetched.is_none());

        // A match substitutes only the requested document
        let resolved = gate
            .resolve(
                &ReadRequest::new(doc_a.id).with_secret("secret-a"),
                Vec::new(),
            )
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, doc_a.id);
    }

    #[test]
    fn test_gate_never_hides_visible_documents() {
        let mut store = Store::open_in_memory(Config::default()).unwrap();
        let mut doc = Document::new("Live Post");
        doc.set_status(DocumentStatus::Published);
        store.add_document(&doc).unwrap();

        let gate = AccessGate::new(&store);

        // Wrong secret on an already-visible document changes nothing
        let fetched = gate
            .fetch_document(&ReadRequest::new(doc.id).with_secret("wrong"))
            .unwrap();
        assert_eq!(fetched.map(|d| d.id), Some(doc.id));
    }

    #[test]
    fn test_unknown_document_stays_hidden() {
        let (store, _doc) = store_with_draft(Some("aZ3f9Q"));
        let gate = AccessGate::new(&store);

        let fetched = gate
            .fetch_document(&ReadRequest::new(Uuid::new_v4()).with_secret("aZ3f9Q"))
            .unwrap();
        assert!(fetched.is_none());
    }

    #[test]
    fn test_secret_param_extraction() {
        assert_eq!(secret_param("secret=aZ3f9Q"), Some("aZ3f9Q".to_string()));
        assert_eq!(
            secret_param("?page=2&secret=aZ3f9Q"),
            Some("aZ3f9Q".to_string())
        );
        assert_eq!(secret_param("page=2"), None);
        assert_eq!(secret_param("secret="), None);
        assert_eq!(secret_param(""), None);
    }
}
