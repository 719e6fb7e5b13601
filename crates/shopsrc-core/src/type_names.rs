//! Destination collection naming.

use crate::EntityKind;

/// Prefix applied when the configured prefix is empty but the bare name
/// would collide with a build-pipeline built-in.
const FALLBACK_PREFIX: &str = "Shopify";

/// Bare names reserved by the build pipeline.
const RESERVED_NAMES: [&str; 2] = ["Page", "Image"];

/// Converts space, `_` or `-` separated words into `PascalCase`.
///
/// Only the first character of each word is upper-cased; the rest of the
/// word is kept as-is, so `"Shopify ProductType"` becomes
/// `"ShopifyProductType"`.
#[must_use]
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Builds collection type names from the configured prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNames {
    prefix: String,
}

impl TypeNames {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim().to_owned(),
        }
    }

    /// `PascalCase("{prefix} {name}")`, falling back to the `Shopify`
    /// prefix for reserved names when no prefix is configured.
    #[must_use]
    pub fn create(&self, name: &str) -> String {
        let prefix = if self.prefix.is_empty() && RESERVED_NAMES.contains(&name) {
            FALLBACK_PREFIX
        } else {
            self.prefix.as_str()
        };
        pascal_case(&format!("{prefix} {name}"))
    }

    #[must_use]
    pub fn kind(&self, kind: EntityKind) -> String {
        self.create(kind.as_str())
    }

    #[must_use]
    pub fn image(&self) -> String {
        self.create("Image")
    }

    #[must_use]
    pub fn price(&self) -> String {
        self.create("Price")
    }

    #[must_use]
    pub fn product_variant(&self) -> String {
        self.create("ProductVariant")
    }

    /// Collection holding locale copies of `base` (e.g. `ShopifyProductTranslation`).
    #[must_use]
    pub fn translation(&self, base: &str) -> String {
        format!("{}Translation", self.create(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_keeps_inner_capitals() {
        assert_eq!(pascal_case("shopify ProductType"), "ShopifyProductType");
        assert_eq!(pascal_case("price_range/min"), "PriceRange/min");
        assert_eq!(pascal_case("  locale  FR "), "LocaleFR");
    }

    #[test]
    fn prefixes_every_kind() {
        let names = TypeNames::new("Shopify");
        assert_eq!(names.kind(EntityKind::Product), "ShopifyProduct");
        assert_eq!(names.kind(EntityKind::ProductType), "ShopifyProductType");
        assert_eq!(names.image(), "ShopifyImage");
        assert_eq!(names.product_variant(), "ShopifyProductVariant");
    }

    #[test]
    fn custom_prefix_is_pascal_cased() {
        let names = TypeNames::new("my store");
        assert_eq!(names.kind(EntityKind::Blog), "MyStoreBlog");
    }

    #[test]
    fn empty_prefix_still_guards_reserved_names() {
        let names = TypeNames::new("");
        assert_eq!(names.kind(EntityKind::Product), "Product");
        assert_eq!(names.price(), "Price");
        assert_eq!(names.kind(EntityKind::Page), "ShopifyPage");
        assert_eq!(names.image(), "ShopifyImage");
    }

    #[test]
    fn translation_collection_names() {
        let names = TypeNames::new("Shopify");
        assert_eq!(names.translation("Article"), "ShopifyArticleTranslation");
        assert_eq!(
            TypeNames::new("").translation("Page"),
            "ShopifyPageTranslation"
        );
    }
}
