//! Document store abstraction.
//!
//! One logical collection per `ResourceKind`. The store enforces no foreign
//! keys; cross-collection consistency is the validation pipeline's job. What
//! the store does own: identifier assignment, identifier syntax, unique
//! indexes, and whatever document constraints the backend applies on write.

mod memory;

pub use memory::MemoryStore;

use crate::resources::ResourceKind;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the document.
    #[error("duplicate value for unique field `{field}`")]
    UniqueViolation { field: &'static str },

    /// The store's own document constraints rejected the payload.
    #[error("document rejected by store: {0}")]
    SchemaRejected(String),

    /// Backend failure: lost connection, corrupted page, anything the store
    /// cannot attribute to the document itself.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Trait for document stores.
///
/// Identifiers are opaque strings; only the store knows what a
/// syntactically valid one looks like. Implementations must be safe to
/// share across concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether `id` is syntactically valid for this store's addressing
    /// scheme. Purely local, never touches storage.
    fn is_valid_identifier(&self, id: &str) -> bool;

    /// Whether a document with this id exists.
    async fn exists(&self, kind: ResourceKind, id: &str) -> Result<bool, StoreError>;

    /// How many of `ids` name an existing document, in one batched query.
    /// Callers pass distinct ids; duplicates would inflate nothing but the
    /// comparison is against the distinct count.
    async fn count_by_ids(&self, kind: ResourceKind, ids: &[&str]) -> Result<usize, StoreError>;

    /// Persist a new document, assigning it an identifier. Returns the
    /// stored document including the assigned `_id`.
    async fn create(&self, kind: ResourceKind, payload: Value) -> Result<Value, StoreError>;

    async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Option<Value>, StoreError>;

    /// Replace a document wholesale, keeping its identifier. `None` when no
    /// document has this id.
    async fn replace_by_id(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: Value,
    ) -> Result<Option<Value>, StoreError>;

    /// Returns whether a document was deleted.
    async fn delete_by_id(&self, kind: ResourceKind, id: &str) -> Result<bool, StoreError>;

    /// Every document of a kind, in insertion order.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, StoreError>;
}
