//! Products: prices, images and variants are split into their own
//! collections and linked back by reference.

use shopsrc_core::EntityKind;
use shopsrc_store::{CollectionHandle, Reference};
use shopsrc_storefront::queries::{
    PRODUCTS, PRODUCT_COLLECTIONS, PRODUCT_IMAGES, PRODUCT_METAFIELDS, PRODUCT_VARIANTS,
    VARIANT_METAFIELDS,
};

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::fetch::Fetcher;
use crate::identity::{derive, Role};
use crate::nodes::{PriceNode, PriceRangeRefs, ProductNode, VariantNode};
use crate::raw::{RawId, RawImage, RawMoney, RawPriceRange, RawProduct, RawVariant};

/// A product with its complete nested lists.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub product: RawProduct,
    pub collections: Vec<RawId>,
    pub images: Vec<RawImage>,
    pub variants: Vec<RawVariant>,
}

/// Which nested lists a product fetch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductPass {
    /// Everything that is stored: images, variants and metafields, plus
    /// collections when `with_collections`.
    Base { with_collections: bool },
    /// Variants only; the rest of a localized copy is discarded.
    Localized,
}

/// Fetches every product and completes the nested lists `pass` needs.
///
/// # Errors
///
/// Any paginator or decode error.
pub async fn fetch(
    fetcher: &Fetcher<'_>,
    pass: ProductPass,
    extra_headers: &[(String, String)],
) -> Result<Vec<ProductRecord>, StepError> {
    let raw: Vec<RawProduct> = fetcher.list(&PRODUCTS, extra_headers).await?;
    let mut records = Vec::with_capacity(raw.len());
    for mut product in raw {
        let embedded_variants = std::mem::take(&mut product.variants);
        let mut variants = fetcher
            .complete(&PRODUCT_VARIANTS, &product.id, embedded_variants, extra_headers)
            .await?;

        let embedded_collections = std::mem::take(&mut product.collections);
        let embedded_images = std::mem::take(&mut product.images);
        let (collections, images) = match pass {
            ProductPass::Localized => (
                embedded_collections.into_nodes(),
                embedded_images.into_nodes(),
            ),
            ProductPass::Base { with_collections } => {
                let collections = if with_collections {
                    fetcher
                        .complete(
                            &PRODUCT_COLLECTIONS,
                            &product.id,
                            embedded_collections,
                            extra_headers,
                        )
                        .await?
                } else {
                    embedded_collections.into_nodes()
                };
                let images = fetcher
                    .complete(&PRODUCT_IMAGES, &product.id, embedded_images, extra_headers)
                    .await?;

                fetcher
                    .complete_in_place(
                        &PRODUCT_METAFIELDS,
                        &product.id,
                        &mut product.metafields,
                        extra_headers,
                    )
                    .await?;
                for variant in &mut variants {
                    fetcher
                        .complete_in_place(
                            &VARIANT_METAFIELDS,
                            &variant.id,
                            &mut variant.metafields,
                            extra_headers,
                        )
                        .await?;
                }
                (collections, images)
            }
        };

        records.push(ProductRecord {
            product,
            collections,
            images,
            variants,
        });
    }
    Ok(records)
}

/// # Errors
///
/// [`StepError::Identity`] if a product or variant id cannot carry derived
/// price ids, or any store error.
pub fn normalize(records: Vec<ProductRecord>, ctx: &NormalizeContext<'_>) -> Result<usize, StepError> {
    let products = ctx.collection(EntityKind::Product);
    let store = ctx.store();
    let variants = store.add_collection(&ctx.type_names().product_variant());
    let images = ctx.images()?;
    let prices = ctx.prices()?;
    let mut written = 0;
    let mut variant_count = 0;

    for record in records {
        let ProductRecord {
            product,
            collections,
            images: product_images,
            variants: product_variants,
        } = record;

        let product_ref = products.reference(&product.id);

        let price_range = product
            .price_range
            .as_ref()
            .map(|range| {
                price_range_refs(
                    &prices,
                    &product.id,
                    range,
                    Role::PriceRangeMin,
                    Role::PriceRangeMax,
                )
            })
            .transpose()?;
        let compare_at_price_range = product
            .compare_at_price_range
            .as_ref()
            .map(|range| {
                price_range_refs(
                    &prices,
                    &product.id,
                    range,
                    Role::CompareAtPriceRangeMin,
                    Role::CompareAtPriceRangeMax,
                )
            })
            .transpose()?;

        let image_refs = product_images
            .iter()
            .map(|image| ctx.link_image(&images, image))
            .collect::<Result<Vec<_>, _>>()?;

        let mut variant_refs = Vec::with_capacity(product_variants.len());
        for variant in product_variants {
            variant_refs.push(normalize_variant(
                ctx,
                &variants,
                &images,
                &prices,
                &product_ref,
                variant,
            )?);
        }
        variant_count += variant_refs.len();

        let collections = ctx.relation(
            EntityKind::Collection,
            collections.iter().map(|c| c.id.as_str()),
        );

        products.add_node(&ProductNode {
            id: product.id,
            title: product.title,
            handle: product.handle,
            description: product.description,
            description_html: product.description_html,
            product_type: product.product_type,
            vendor: product.vendor,
            tags: product.tags,
            available_for_sale: product.available_for_sale,
            created_at: product.created_at,
            updated_at: product.updated_at,
            published_at: product.published_at,
            online_store_url: product.online_store_url,
            options: product.options,
            metafields: product.metafields.into_nodes(),
            price_range,
            compare_at_price_range,
            collections,
            images: image_refs,
            variants: variant_refs,
        })?;
        written += 1;
    }

    tracing::debug!(products = written, variants = variant_count, "normalized products");
    Ok(written)
}

fn normalize_variant(
    ctx: &NormalizeContext<'_>,
    variants: &CollectionHandle<'_>,
    images: &CollectionHandle<'_>,
    prices: &CollectionHandle<'_>,
    product: &Reference,
    variant: RawVariant,
) -> Result<Reference, StepError> {
    let image = variant
        .image
        .as_ref()
        .map(|image| ctx.link_image(images, image))
        .transpose()?;
    let price = write_optional_price(prices, &variant.id, Role::Price, variant.price.as_ref())?;
    let unit_price =
        write_optional_price(prices, &variant.id, Role::UnitPrice, variant.unit_price.as_ref())?;
    let compare_at_price = write_optional_price(
        prices,
        &variant.id,
        Role::CompareAtPrice,
        variant.compare_at_price.as_ref(),
    )?;

    Ok(variants.add_node(&VariantNode {
        id: variant.id,
        product: product.clone(),
        title: variant.title,
        sku: variant.sku,
        available_for_sale: variant.available_for_sale,
        requires_shipping: variant.requires_shipping,
        weight: variant.weight,
        weight_unit: variant.weight_unit,
        image,
        price,
        unit_price,
        compare_at_price,
        selected_options: variant.selected_options,
        metafields: variant.metafields.into_nodes(),
    })?)
}

fn price_range_refs(
    prices: &CollectionHandle<'_>,
    owner_id: &str,
    range: &RawPriceRange,
    min_role: Role,
    max_role: Role,
) -> Result<PriceRangeRefs, StepError> {
    Ok(PriceRangeRefs {
        min_variant_price: write_price(prices, owner_id, &min_role, &range.min_variant_price)?,
        max_variant_price: write_price(prices, owner_id, &max_role, &range.max_variant_price)?,
    })
}

fn write_optional_price(
    prices: &CollectionHandle<'_>,
    owner_id: &str,
    role: Role,
    money: Option<&RawMoney>,
) -> Result<Option<Reference>, StepError> {
    money
        .map(|money| write_price(prices, owner_id, &role, money))
        .transpose()
}

/// Stores `money` under the id derived from its owner and role.
fn write_price(
    prices: &CollectionHandle<'_>,
    owner_id: &str,
    role: &Role,
    money: &RawMoney,
) -> Result<Reference, StepError> {
    let id = derive(owner_id, role)?;
    Ok(prices.add_node(&PriceNode {
        id,
        amount: money.amount.clone(),
        currency_code: money.currency_code.clone(),
    })?)
}
