use shopsrc_core::EntityKind;
use shopsrc_storefront::queries::BLOGS;

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::nodes::BlogNode;
use crate::raw::RawBlog;

/// # Errors
///
/// Any paginator or decode error.
pub async fn fetch(
    fetcher: &Fetcher<'_>,
    extra_headers: &[(String, String)],
) -> Result<Vec<RawBlog>, StepError> {
    fetcher.list(&BLOGS, extra_headers).await
}

/// # Errors
///
/// Any store error.
pub fn normalize(blogs: Vec<RawBlog>, ctx: &NormalizeContext<'_>) -> Result<usize, StepError> {
    let collection = ctx.collection(EntityKind::Blog);
    let count = blogs.len();
    for blog in blogs {
        collection.add_node(&BlogNode {
            id: blog.id,
            title: blog.title,
            handle: blog.handle,
            url: blog.url,
            authors: blog.authors,
        })?;
    }
    Ok(count)
}
