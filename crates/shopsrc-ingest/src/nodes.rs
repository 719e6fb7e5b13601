//! Flattened node shapes written to the destination store.
//!
//! Embedded sub-entities are replaced by [`Reference`]s. Relations to a kind
//! excluded from the run are `None` and left out of the serialized node.

use serde::Serialize;
use shopsrc_store::Reference;

use crate::raw::{ArticleAuthor, Author, Comment, Metafield, ProductOption, Seo, SelectedOption};

/// Product type or product tag. The term is its own id.
#[derive(Debug, Clone, Serialize)]
pub struct TermNode {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceNode {
    pub id: String,
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeRefs {
    pub min_variant_price: Reference,
    pub max_variant_price: Reference,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    pub id: String,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub updated_at: Option<String>,
    pub image: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Reference>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub product_type: Option<String>,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    pub available_for_sale: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub published_at: Option<String>,
    pub online_store_url: Option<String>,
    pub options: Vec<ProductOption>,
    pub metafields: Vec<Metafield>,
    pub price_range: Option<PriceRangeRefs>,
    pub compare_at_price_range: Option<PriceRangeRefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<Reference>>,
    pub images: Vec<Reference>,
    pub variants: Vec<Reference>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub product: Reference,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub available_for_sale: Option<bool>,
    pub requires_shipping: Option<bool>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub image: Option<Reference>,
    pub price: Option<Reference>,
    pub unit_price: Option<Reference>,
    pub compare_at_price: Option<Reference>,
    pub selected_options: Vec<SelectedOption>,
    pub metafields: Vec<Metafield>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogNode {
    pub id: String,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub url: Option<String>,
    pub authors: Vec<Author>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleNode {
    pub id: String,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_html: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub author: Option<ArticleAuthor>,
    pub seo: Option<Seo>,
    pub comments: Vec<Comment>,
    pub image: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<Reference>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    pub id: String,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub body: Option<String>,
    pub body_summary: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
