use shopsrc_core::{EntityKind, IncludedKinds, TypeNames};
use shopsrc_store::{CollectionHandle, NodeStore, Reference, StoreError};

use crate::raw::RawImage;

/// What a normalizer may touch: the store, collection naming and the
/// run's inclusion filter.
pub struct NormalizeContext<'a> {
    store: &'a dyn NodeStore,
    type_names: TypeNames,
    included: IncludedKinds,
}

impl<'a> NormalizeContext<'a> {
    #[must_use]
    pub fn new(store: &'a dyn NodeStore, type_names: TypeNames, included: IncludedKinds) -> Self {
        Self {
            store,
            type_names,
            included,
        }
    }

    #[must_use]
    pub fn store(&self) -> &'a dyn NodeStore {
        self.store
    }

    #[must_use]
    pub fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    #[must_use]
    pub fn includes(&self, kind: EntityKind) -> bool {
        self.included.contains(kind)
    }

    /// Creates (or reuses) the collection for `kind`.
    #[must_use]
    pub fn collection(&self, kind: EntityKind) -> CollectionHandle<'a> {
        let store = self.store;
        store.add_collection(&self.type_names.kind(kind))
    }

    /// # Errors
    ///
    /// [`StoreError::CollectionNotFound`] if the shared collections were not
    /// set up.
    pub fn images(&self) -> Result<CollectionHandle<'a>, StoreError> {
        let store = self.store;
        store.get_collection(&self.type_names.image())
    }

    /// # Errors
    ///
    /// As [`NormalizeContext::images`].
    pub fn prices(&self) -> Result<CollectionHandle<'a>, StoreError> {
        let store = self.store;
        store.get_collection(&self.type_names.price())
    }

    /// References to `ids` in the collection of `kind`, or `None` when that
    /// kind is excluded from the run.
    pub fn relation<'i, I>(&self, kind: EntityKind, ids: I) -> Option<Vec<Reference>>
    where
        I: IntoIterator<Item = &'i str>,
    {
        if !self.includes(kind) {
            return None;
        }
        let type_name = self.type_names.kind(kind);
        Some(
            ids.into_iter()
                .map(|id| Reference::new(type_name.as_str(), id))
                .collect(),
        )
    }

    /// Writes `image` into the shared image collection unless a node with
    /// its id is already there, and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`] from the write.
    pub fn link_image(
        &self,
        images: &CollectionHandle<'_>,
        image: &RawImage,
    ) -> Result<Reference, StoreError> {
        if self.store.get_node(images.type_name(), &image.id).is_some() {
            return Ok(images.reference(&image.id));
        }
        images.add_node(image)
    }
}
