//! In-process [`NodeStore`] backed by ordered maps.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde_json::Value;

use crate::{NodeStore, Snapshot, StoreError};

/// Nodes of one collection in insertion order, indexed by id.
#[derive(Debug, Default)]
struct CollectionData {
    nodes: Vec<Value>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, CollectionData>,
    overwrites: usize,
}

/// Thread-safe in-memory store. Collection creation and node writes happen
/// under one write lock, so concurrent normalizers cannot race on a shared
/// collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a node replaced an existing node with the same id.
    #[must_use]
    pub fn overwrite_count(&self) -> usize {
        self.read().overwrites
    }

    /// Nodes of `type_name` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CollectionNotFound`] if it was never created.
    pub fn nodes(&self, type_name: &str) -> Result<Vec<Value>, StoreError> {
        self.read()
            .collections
            .get(type_name)
            .map(|c| c.nodes.clone())
            .ok_or_else(|| StoreError::CollectionNotFound(type_name.to_owned()))
    }

    /// Copies every collection into a timestamped [`Snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.read();
        let collections = inner
            .collections
            .iter()
            .map(|(name, data)| (name.clone(), data.nodes.clone()))
            .collect();
        Snapshot {
            generated_at: Utc::now(),
            collections,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NodeStore for MemoryStore {
    fn ensure_collection(&self, type_name: &str) -> bool {
        let mut inner = self.write();
        if inner.collections.contains_key(type_name) {
            return false;
        }
        inner
            .collections
            .insert(type_name.to_owned(), CollectionData::default());
        true
    }

    fn has_collection(&self, type_name: &str) -> bool {
        self.read().collections.contains_key(type_name)
    }

    fn insert_node(&self, type_name: &str, id: &str, node: Value) -> Result<(), StoreError> {
        let mut guard = self.write();
        let inner = &mut *guard;
        let collection = inner
            .collections
            .get_mut(type_name)
            .ok_or_else(|| StoreError::CollectionNotFound(type_name.to_owned()))?;

        if let Some(&position) = collection.index.get(id) {
            collection.nodes[position] = node;
            inner.overwrites += 1;
            tracing::warn!(type_name, id, "node id already stored, replacing it");
            return Ok(());
        }

        collection.index.insert(id.to_owned(), collection.nodes.len());
        collection.nodes.push(node);
        Ok(())
    }

    fn get_node(&self, type_name: &str, id: &str) -> Option<Value> {
        let inner = self.read();
        let collection = inner.collections.get(type_name)?;
        collection
            .index
            .get(id)
            .and_then(|&position| collection.nodes.get(position))
            .cloned()
    }

    fn node_count(&self, type_name: &str) -> Option<usize> {
        self.read().collections.get(type_name).map(|c| c.nodes.len())
    }

    fn collection_names(&self) -> Vec<String> {
        self.read().collections.keys().cloned().collect()
    }
}
