//! SQLite persistence
//!
//! - `error`: Typed errors for storage operations
//! - `schema`: Database schema and versioning

pub mod error;
pub mod schema;

pub use error::{StorageError, StorageResult};
