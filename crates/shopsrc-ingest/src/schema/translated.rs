use serde_json::Value;
use shopsrc_core::{canonical_locale, TypeNames};
use shopsrc_store::NodeStore;

use super::ResolveError;
use crate::identity::{derive, Role};
use crate::normalize::translation::translatable_fields;

/// Reads `field` of the `base` node `node_id`, preferring its `locale` copy.
///
/// Falls back to the base value when `locale` is empty, the field is not
/// translatable for `base`, or no translation (or no translated value)
/// exists. Returns `None` only when the base node itself is missing.
///
/// # Errors
///
/// - [`ResolveError::Store`] if the base collection was never created.
/// - [`ResolveError::Identity`] if `node_id` cannot carry a locale suffix.
pub fn resolve_translated_field(
    store: &dyn NodeStore,
    type_names: &TypeNames,
    base: &str,
    node_id: &str,
    field: &str,
    locale: &str,
) -> Result<Option<Value>, ResolveError> {
    let base_collection = store.get_collection(&type_names.create(base))?;
    let Some(node) = store.get_node(base_collection.type_name(), node_id) else {
        return Ok(None);
    };
    let base_value = node.get(field).cloned().unwrap_or(Value::Null);

    let locale = canonical_locale(locale);
    if locale.is_empty() || !translatable_fields(base).iter().any(|name| *name == field) {
        return Ok(Some(base_value));
    }

    let translation_id = derive(node_id, &Role::Locale(locale))?;
    let translated = store
        .get_node(&type_names.translation(base), &translation_id)
        .and_then(|translation| translation.get(field).cloned())
        .filter(|value| !value.is_null());

    Ok(Some(translated.unwrap_or(base_value)))
}
