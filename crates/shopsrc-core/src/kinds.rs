//! Entity kinds the connector knows how to ingest, and the inclusion set that
//! decides which of them a run fetches.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A configurable entity kind.
///
/// Shared sub-entity collections (images, prices, variants) are not kinds of
/// their own: they are created on demand by the kinds that embed them.
///
/// Variant order is the fixed ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    ProductType,
    ProductTag,
    Collection,
    Product,
    Blog,
    Article,
    Page,
}

impl EntityKind {
    /// Every known kind, in ingestion order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::ProductType,
        EntityKind::ProductTag,
        EntityKind::Collection,
        EntityKind::Product,
        EntityKind::Blog,
        EntityKind::Article,
        EntityKind::Page,
    ];

    /// Kinds that have localized content, in translation-pass order.
    pub const TRANSLATABLE: [EntityKind; 5] = [
        EntityKind::Collection,
        EntityKind::Product,
        EntityKind::Blog,
        EntityKind::Article,
        EntityKind::Page,
    ];

    /// Canonical name, also the suffix used when building collection type names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::ProductType => "ProductType",
            EntityKind::ProductTag => "ProductTag",
            EntityKind::Collection => "Collection",
            EntityKind::Product => "Product",
            EntityKind::Blog => "Blog",
            EntityKind::Article => "Article",
            EntityKind::Page => "Page",
        }
    }

    #[must_use]
    pub fn is_translatable(self) -> bool {
        Self::TRANSLATABLE.contains(&self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ConfigError;

    /// Parses a kind name case-insensitively, ignoring `_`, `-` and spaces,
    /// so `"product_type"`, `"ProductType"` and `"product type"` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == folded)
            .ok_or_else(|| ConfigError::UnknownEntityKind(s.trim().to_owned()))
    }
}

/// The set of kinds a run ingests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedKinds(BTreeSet<EntityKind>);

impl IncludedKinds {
    /// Builds the inclusion set from configured kinds. An empty list means
    /// every known kind.
    #[must_use]
    pub fn from_configured(kinds: &[EntityKind]) -> Self {
        if kinds.is_empty() {
            Self::all()
        } else {
            Self(kinds.iter().copied().collect())
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self(EntityKind::ALL.into_iter().collect())
    }

    #[must_use]
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.0.contains(&kind)
    }

    /// Included kinds in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.0.iter().copied()
    }

    /// Included kinds that take part in the translation pass, in pass order.
    pub fn translatable(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.iter().filter(|kind| kind.is_translatable())
    }
}
