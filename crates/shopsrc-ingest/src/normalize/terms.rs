//! Product types and product tags: plain string lists.

use shopsrc_core::EntityKind;
use shopsrc_storefront::queries::{PRODUCT_TAGS, PRODUCT_TYPES};
use shopsrc_storefront::PageQuery;

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::nodes::TermNode;

fn query_for(kind: EntityKind) -> Option<&'static PageQuery> {
    match kind {
        EntityKind::ProductType => Some(&PRODUCT_TYPES),
        EntityKind::ProductTag => Some(&PRODUCT_TAGS),
        _ => None,
    }
}

/// # Errors
///
/// Any paginator error, or [`StepError::Normalization`] when `kind` is not a
/// term kind or a term is not a string.
pub async fn fetch(fetcher: &Fetcher<'_>, kind: EntityKind) -> Result<Vec<String>, StepError> {
    let query = query_for(kind).ok_or_else(|| StepError::Normalization {
        node_id: kind.to_string(),
        reason: "not a term kind".to_owned(),
    })?;
    fetcher.list(query, &[]).await
}

/// Writes one node per non-empty term; returns the number written.
///
/// # Errors
///
/// Any [`StoreError`](shopsrc_store::StoreError) from the writes.
pub fn normalize(
    kind: EntityKind,
    terms: Vec<String>,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError> {
    let collection = ctx.collection(kind);
    let mut written = 0;
    for term in terms {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        collection.add_node(&TermNode {
            id: term.to_owned(),
            title: term.to_owned(),
        })?;
        written += 1;
    }
    Ok(written)
}
