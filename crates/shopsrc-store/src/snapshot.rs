use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::StoreError;

/// Point-in-time copy of a store, handed to the site build as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub collections: BTreeMap<String, Vec<Value>>,
}

impl Snapshot {
    #[must_use]
    pub fn node_total(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if a node cannot be rendered.
    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|source| StoreError::Serialize {
            type_name: "snapshot".to_owned(),
            source,
        })
    }

    /// Writes the snapshot as pretty-printed JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
