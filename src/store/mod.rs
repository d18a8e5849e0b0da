//! Document-store interface used to share match records between clients.
//!
//! The store only needs four operations: create a document, read it, merge
//! a set of top-level fields into it, and subscribe to its changes. Writes
//! are unconditional (last writer wins); there is no compare-and-swap.

mod error;
mod memory;
mod subscription;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use subscription::Subscription;

use async_trait::async_trait;

/// A schemaless document: top-level field names mapped to JSON values.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Backend holding shared match records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a new document and returns its generated identifier.
    async fn create_record(&self, initial: Document) -> Result<String, StoreError>;

    /// Reads a document. `Ok(None)` means it does not exist.
    async fn get_record(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrites the given top-level fields, leaving the others untouched.
    async fn update_fields(&self, id: &str, fields: Document) -> Result<(), StoreError>;

    /// Subscribes to a document. The current document is delivered first,
    /// then the full document after every change, in mutation order.
    async fn subscribe(&self, id: &str) -> Result<Subscription, StoreError>;
}
