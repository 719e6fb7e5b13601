use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StoreError;

/// Typed pointer from one stored node to another.
///
/// Resolved lazily by whoever reads the store; a reference may point at a
/// node that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub type_name: String,
    pub id: String,
}

impl Reference {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }

    /// Reference to an already-built node, taking its `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingNodeId`] if `node` has no string `id`.
    pub fn to_node(type_name: &str, node: &Value) -> Result<Self, StoreError> {
        node_id(node)
            .map(|id| Self::new(type_name, id))
            .ok_or_else(|| StoreError::MissingNodeId {
                type_name: type_name.to_owned(),
            })
    }
}

pub(crate) fn node_id(node: &Value) -> Option<&str> {
    node.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_type_name_and_id() {
        let reference = Reference::new("ShopifyImage", "img-1");
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({ "typeName": "ShopifyImage", "id": "img-1" })
        );
    }

    #[test]
    fn to_node_reads_id_field() {
        let reference = Reference::to_node("ShopifyBlog", &json!({ "id": "b1", "title": "News" }))
            .unwrap();
        assert_eq!(reference, Reference::new("ShopifyBlog", "b1"));
    }

    #[test]
    fn to_node_without_id_fails() {
        let err = Reference::to_node("ShopifyBlog", &json!({ "title": "News" })).unwrap_err();
        assert!(matches!(err, StoreError::MissingNodeId { .. }));
    }
}
