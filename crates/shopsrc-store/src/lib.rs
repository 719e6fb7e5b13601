//! Destination node store: typed collections of JSON nodes keyed by id.
//!
//! Normalizers only see the [`NodeStore`] capability trait. [`MemoryStore`]
//! is the bundled implementation; it can be exported as a [`Snapshot`].

pub mod handle;
pub mod memory;
pub mod reference;
pub mod snapshot;

use serde_json::Value;
use thiserror::Error;

pub use handle::CollectionHandle;
pub use memory::MemoryStore;
pub use reference::Reference;
pub use snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("node added to {type_name} has no string `id` field")]
    MissingNodeId { type_name: String },

    #[error("failed to serialize node for {type_name}: {source}")]
    Serialize {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write snapshot to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability interface the ingestion engine writes through.
///
/// Implementations must be safe to share: creating an existing collection
/// is a no-op, and adding a node to a collection that already holds the id
/// replaces it (last write wins).
pub trait NodeStore: Send + Sync {
    /// Creates `type_name` if absent. Returns `true` when it was created.
    fn ensure_collection(&self, type_name: &str) -> bool;

    fn has_collection(&self, type_name: &str) -> bool;

    /// Stores `node` under `id` in `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CollectionNotFound`] if the collection was never
    /// created.
    fn insert_node(&self, type_name: &str, id: &str, node: Value) -> Result<(), StoreError>;

    fn get_node(&self, type_name: &str, id: &str) -> Option<Value>;

    /// Number of nodes in `type_name`, or `None` if it does not exist.
    fn node_count(&self, type_name: &str) -> Option<usize>;

    /// Names of every created collection, sorted.
    fn collection_names(&self) -> Vec<String>;
}

impl<'s> dyn NodeStore + 's {
    /// Creates (or reuses) the collection and returns a handle to it.
    pub fn add_collection(&self, type_name: &str) -> CollectionHandle<'_> {
        if self.ensure_collection(type_name) {
            tracing::debug!(type_name, "created collection");
        }
        CollectionHandle::new(self, type_name)
    }

    /// Handle to a collection created earlier in this run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CollectionNotFound`] if it was never created.
    pub fn get_collection(&self, type_name: &str) -> Result<CollectionHandle<'_>, StoreError> {
        if self.has_collection(type_name) {
            Ok(CollectionHandle::new(self, type_name))
        } else {
            Err(StoreError::CollectionNotFound(type_name.to_owned()))
        }
    }
}
