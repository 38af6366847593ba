//! Draftly Core Library
//!
//! This crate provides the core functionality for Draftly, a secret-link
//! sharing system for draft documents: an owner toggles a document public
//! or private, and while public the document is readable by anyone holding
//! a URL carrying its secret.
//!
//! # Architecture
//!
//! - **Store**: SQLite-backed document and secret persistence
//! - **AccessGate**: per-request visibility override when a presented
//!   secret matches the stored one
//! - **SharingService**: the public/private toggle and share-URL builder
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! let doc = Document::new("My Draft");
//! store.add_document(&doc)?;
//!
//! // Share it
//! let url = SharingService::new(&mut store).request_public(doc.id)?;
//!
//! // Read it back the way a visitor would
//! let request = ReadRequest::new(doc.id).with_secret(secret);
//! let fetched = AccessGate::new(&store).fetch_document(&request)?;
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Document data structures
//! - `gate`: Request-time access gate
//! - `share`: Owner-facing sharing toggle
//! - `secret`: Share secret generation
//! - `storage`: SQLite schema and error types
//! - `config`: Application configuration

pub mod config;
pub mod gate;
pub mod models;
pub mod secret;
pub mod share;
pub mod storage;
pub mod store;

pub use config::Config;
pub use gate::{secret_param, AccessGate, ReadRequest};
pub use models::{Document, DocumentStatus};
pub use share::{ShareCommand, ShareError, ShareResponse, SharingService, SharingStatus};
pub use storage::{StorageError, StorageResult};
pub use store::{AttachOutcome, ClearOutcome, Store, VisibilityFilter};
