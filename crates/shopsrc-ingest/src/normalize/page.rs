use shopsrc_core::EntityKind;
use shopsrc_storefront::queries::PAGES;

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::nodes::PageNode;
use crate::raw::RawPage;

/// # Errors
///
/// Any paginator or decode error.
pub async fn fetch(
    fetcher: &Fetcher<'_>,
    extra_headers: &[(String, String)],
) -> Result<Vec<RawPage>, StepError> {
    fetcher.list(&PAGES, extra_headers).await
}

/// # Errors
///
/// Any store error.
pub fn normalize(pages: Vec<RawPage>, ctx: &NormalizeContext<'_>) -> Result<usize, StepError> {
    let collection = ctx.collection(EntityKind::Page);
    let count = pages.len();
    for page in pages {
        collection.add_node(&PageNode {
            id: page.id,
            title: page.title,
            handle: page.handle,
            body: page.body,
            body_summary: page.body_summary,
            created_at: page.created_at,
            updated_at: page.updated_at,
        })?;
    }
    Ok(count)
}
