//! Locale copies of translatable entities.
//!
//! Each translatable raw type declares a table of its translatable fields
//! with a typed accessor per field. A translation node carries only those
//! fields, plus the locale and a reference back to the base node, under the
//! id derived from `(original id, locale)`.

use std::collections::BTreeMap;

use serde::Serialize;
use shopsrc_store::Reference;

use crate::context::NormalizeContext;
use crate::error::StepError;
use crate::identity::{derive, Role};
use crate::raw::{RawArticle, RawBlog, RawCollection, RawPage, RawProduct, RawVariant};

/// A field whose value may differ per locale.
pub struct TranslatableField<T> {
    pub name: &'static str,
    pub get: fn(&T) -> Option<&str>,
}

pub trait Translatable: Sized + 'static {
    /// Bare collection name of the base entity, e.g. `Product`.
    const BASE: &'static str;
    const FIELDS: &'static [TranslatableField<Self>];

    fn id(&self) -> &str;
}

/// Names of the translatable fields of the base collection `base`, or an
/// empty list when `base` has none.
#[must_use]
pub fn translatable_fields(base: &str) -> Vec<&'static str> {
    fn names<T: Translatable>() -> Vec<&'static str> {
        T::FIELDS.iter().map(|f| f.name).collect()
    }
    match base {
        RawCollection::BASE => names::<RawCollection>(),
        RawProduct::BASE => names::<RawProduct>(),
        RawVariant::BASE => names::<RawVariant>(),
        RawBlog::BASE => names::<RawBlog>(),
        RawArticle::BASE => names::<RawArticle>(),
        RawPage::BASE => names::<RawPage>(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslationNode<'r> {
    id: String,
    locale: &'r str,
    original_id: &'r str,
    original: Reference,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, &'r str>,
}

/// Writes one translation node per record into `{Base}Translation`.
///
/// # Errors
///
/// [`StepError::Identity`] if a record id cannot be derived from, or any
/// store error.
pub fn write_translations<'r, T, I>(
    records: I,
    locale: &str,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError>
where
    T: Translatable + 'r,
    I: IntoIterator<Item = &'r T>,
{
    let type_names = ctx.type_names();
    let base_type = type_names.create(T::BASE);
    let store = ctx.store();
    let collection = store.add_collection(&type_names.translation(T::BASE));
    let role = Role::Locale(locale.to_owned());
    let mut written = 0;

    for record in records {
        let original_id = record.id();
        let fields = T::FIELDS
            .iter()
            .filter_map(|field| (field.get)(record).map(|value| (field.name, value)))
            .collect();
        collection.add_node(&TranslationNode {
            id: derive(original_id, &role)?,
            locale,
            original_id,
            original: Reference::new(base_type.as_str(), original_id),
            fields,
        })?;
        written += 1;
    }
    Ok(written)
}

impl Translatable for RawCollection {
    const BASE: &'static str = "Collection";
    const FIELDS: &'static [TranslatableField<Self>] = &[
        TranslatableField {
            name: "title",
            get: |c| c.title.as_deref(),
        },
        TranslatableField {
            name: "description",
            get: |c| c.description.as_deref(),
        },
        TranslatableField {
            name: "descriptionHtml",
            get: |c| c.description_html.as_deref(),
        },
        TranslatableField {
            name: "handle",
            get: |c| c.handle.as_deref(),
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for RawProduct {
    const BASE: &'static str = "Product";
    const FIELDS: &'static [TranslatableField<Self>] = &[
        TranslatableField {
            name: "title",
            get: |p| p.title.as_deref(),
        },
        TranslatableField {
            name: "description",
            get: |p| p.description.as_deref(),
        },
        TranslatableField {
            name: "descriptionHtml",
            get: |p| p.description_html.as_deref(),
        },
        TranslatableField {
            name: "handle",
            get: |p| p.handle.as_deref(),
        },
        TranslatableField {
            name: "productType",
            get: |p| p.product_type.as_deref(),
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for RawVariant {
    const BASE: &'static str = "ProductVariant";
    const FIELDS: &'static [TranslatableField<Self>] = &[TranslatableField {
        name: "title",
        get: |v| v.title.as_deref(),
    }];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for RawBlog {
    const BASE: &'static str = "Blog";
    const FIELDS: &'static [TranslatableField<Self>] = &[
        TranslatableField {
            name: "title",
            get: |b| b.title.as_deref(),
        },
        TranslatableField {
            name: "handle",
            get: |b| b.handle.as_deref(),
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for RawArticle {
    const BASE: &'static str = "Article";
    const FIELDS: &'static [TranslatableField<Self>] = &[
        TranslatableField {
            name: "title",
            get: |a| a.title.as_deref(),
        },
        TranslatableField {
            name: "content",
            get: |a| a.content.as_deref(),
        },
        TranslatableField {
            name: "contentHtml",
            get: |a| a.content_html.as_deref(),
        },
        TranslatableField {
            name: "excerpt",
            get: |a| a.excerpt.as_deref(),
        },
        TranslatableField {
            name: "excerptHtml",
            get: |a| a.excerpt_html.as_deref(),
        },
        TranslatableField {
            name: "handle",
            get: |a| a.handle.as_deref(),
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for RawPage {
    const BASE: &'static str = "Page";
    const FIELDS: &'static [TranslatableField<Self>] = &[
        TranslatableField {
            name: "title",
            get: |p| p.title.as_deref(),
        },
        TranslatableField {
            name: "body",
            get: |p| p.body.as_deref(),
        },
        TranslatableField {
            name: "bodySummary",
            get: |p| p.body_summary.as_deref(),
        },
        TranslatableField {
            name: "handle",
            get: |p| p.handle.as_deref(),
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }
}
