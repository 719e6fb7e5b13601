use serde::Serialize;

use crate::reference::node_id;
use crate::{NodeStore, Reference, StoreError};

/// Write handle for one collection, obtained from
/// `dyn NodeStore::add_collection` or `dyn NodeStore::get_collection`.
#[derive(Clone)]
pub struct CollectionHandle<'a> {
    store: &'a dyn NodeStore,
    type_name: String,
}

impl<'a> CollectionHandle<'a> {
    pub(crate) fn new(store: &'a dyn NodeStore, type_name: &str) -> Self {
        Self {
            store,
            type_name: type_name.to_owned(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Serializes `node` and stores it under its `id` field.
    ///
    /// Returns a reference to the stored node.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Serialize`] if `node` cannot be turned into JSON.
    /// - [`StoreError::MissingNodeId`] if the JSON has no string `id`.
    /// - [`StoreError::CollectionNotFound`] if the collection vanished.
    pub fn add_node<N: Serialize + ?Sized>(&self, node: &N) -> Result<Reference, StoreError> {
        let value = serde_json::to_value(node).map_err(|source| StoreError::Serialize {
            type_name: self.type_name.clone(),
            source,
        })?;
        let id = node_id(&value)
            .ok_or_else(|| StoreError::MissingNodeId {
                type_name: self.type_name.clone(),
            })?
            .to_owned();
        self.store.insert_node(&self.type_name, &id, value)?;
        Ok(Reference::new(self.type_name.as_str(), id))
    }

    /// Reference to `id` inside this collection. The node need not exist yet.
    #[must_use]
    pub fn reference(&self, id: &str) -> Reference {
        Reference::new(self.type_name.as_str(), id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.node_count(&self.type_name).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CollectionHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionHandle")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
