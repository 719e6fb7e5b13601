use shopsrc_core::EntityKind;
use shopsrc_storefront::queries::{COLLECTIONS, COLLECTION_PRODUCTS};

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::nodes::CollectionNode;
use crate::raw::{RawCollection, RawId};

/// A collection with its complete product id list.
#[derive(Debug, Clone)]
pub struct CollectionRecord {
    pub collection: RawCollection,
    pub products: Vec<RawId>,
}

/// Fetches every collection. With `with_products`, product lists longer
/// than the embedded page are completed with a follow-up query; otherwise
/// only the embedded page is kept.
///
/// # Errors
///
/// Any paginator or decode error.
pub async fn fetch(
    fetcher: &Fetcher<'_>,
    with_products: bool,
    extra_headers: &[(String, String)],
) -> Result<Vec<CollectionRecord>, StepError> {
    let raw: Vec<RawCollection> = fetcher.list(&COLLECTIONS, extra_headers).await?;
    let mut records = Vec::with_capacity(raw.len());
    for mut collection in raw {
        let embedded = std::mem::take(&mut collection.products);
        let products = if with_products {
            fetcher
                .complete(&COLLECTION_PRODUCTS, &collection.id, embedded, extra_headers)
                .await?
        } else {
            embedded.into_nodes()
        };
        records.push(CollectionRecord {
            collection,
            products,
        });
    }
    Ok(records)
}

/// # Errors
///
/// Any store error; the image collection must exist.
pub fn normalize(
    records: Vec<CollectionRecord>,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError> {
    let collections = ctx.collection(EntityKind::Collection);
    let images = ctx.images()?;
    let mut written = 0;

    for CollectionRecord {
        collection,
        products,
    } in records
    {
        let image = collection
            .image
            .as_ref()
            .map(|image| ctx.link_image(&images, image))
            .transpose()?;
        let products = ctx.relation(EntityKind::Product, products.iter().map(|p| p.id.as_str()));

        collections.add_node(&CollectionNode {
            id: collection.id,
            title: collection.title,
            handle: collection.handle,
            description: collection.description,
            description_html: collection.description_html,
            updated_at: collection.updated_at,
            image,
            products,
        })?;
        written += 1;
    }
    Ok(written)
}
