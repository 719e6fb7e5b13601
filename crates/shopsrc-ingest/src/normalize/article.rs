use shopsrc_core::EntityKind;
use shopsrc_storefront::queries::{ARTICLES, ARTICLE_COMMENTS};

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::nodes::ArticleNode;
use crate::raw::RawArticle;

/// Fetches every article. With `with_comments`, comment lists longer than
/// the embedded page are completed with a follow-up query.
///
/// # Errors
///
/// Any paginator or decode error.
pub async fn fetch(
    fetcher: &Fetcher<'_>,
    with_comments: bool,
    extra_headers: &[(String, String)],
) -> Result<Vec<RawArticle>, StepError> {
    let mut articles: Vec<RawArticle> = fetcher.list(&ARTICLES, extra_headers).await?;
    if with_comments {
        for article in &mut articles {
            fetcher
                .complete_in_place(
                    &ARTICLE_COMMENTS,
                    &article.id,
                    &mut article.comments,
                    extra_headers,
                )
                .await?;
        }
    }
    Ok(articles)
}

/// Writes articles, linking each to its blog (when blogs are part of the
/// run) and to its image.
///
/// # Errors
///
/// Any store error; the image collection must exist.
pub fn normalize(
    articles: Vec<RawArticle>,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError> {
    let collection = ctx.collection(EntityKind::Article);
    let images = ctx.images()?;
    let count = articles.len();

    for article in articles {
        let image = article
            .image
            .as_ref()
            .map(|image| ctx.link_image(&images, image))
            .transpose()?;
        let blog = article
            .blog
            .as_ref()
            .and_then(|blog| ctx.relation(EntityKind::Blog, [blog.id.as_str()]))
            .and_then(|mut refs| refs.pop());

        collection.add_node(&ArticleNode {
            id: article.id,
            title: article.title,
            handle: article.handle,
            content: article.content,
            content_html: article.content_html,
            excerpt: article.excerpt,
            excerpt_html: article.excerpt_html,
            published_at: article.published_at,
            url: article.url,
            tags: article.tags,
            author: article.author,
            seo: article.seo,
            comments: article.comments.into_nodes(),
            image,
            blog,
        })?;
    }
    Ok(count)
}
