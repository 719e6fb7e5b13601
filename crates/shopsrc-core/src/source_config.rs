use serde::Deserialize;

use crate::{ConfigError, EntityKind, IncludedKinds, TypeNames};

pub const DEFAULT_TYPE_NAME: &str = "Shopify";
pub const DEFAULT_PER_PAGE: u32 = 100;
/// Largest page the Storefront API serves.
pub const MAX_PER_PAGE: u32 = 250;
pub const DEFAULT_API_VERSION: &str = "2020-10";

/// Raw connector options as written in a config file or assembled from the
/// environment. Validated into a [`SourceConfig`] before use.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceOptions {
    pub store_name: Option<String>,
    pub store_url: Option<String>,
    pub storefront_token: Option<String>,
    pub type_name: Option<String>,
    pub types: Vec<String>,
    pub per_page: Option<u32>,
    pub locales: Vec<String>,
    pub api_version: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_backoff_base_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl SourceOptions {
    /// Validates the options and resolves defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingStoreEndpoint`] when neither a store name nor a
    ///   store URL is set.
    /// - [`ConfigError::MissingAccessToken`] when no storefront token is set.
    /// - [`ConfigError::UnknownEntityKind`] for an unrecognised entry in `types`.
    /// - [`ConfigError::InvalidPageSize`] when `perPage` is outside `1..=250`.
    pub fn validate(self) -> Result<SourceConfig, ConfigError> {
        let store_url = match (non_blank(self.store_name), non_blank(self.store_url)) {
            (Some(name), _) => format!("https://{name}.myshopify.com"),
            (None, Some(url)) => url.trim_end_matches('/').to_owned(),
            (None, None) => return Err(ConfigError::MissingStoreEndpoint),
        };

        let storefront_token =
            non_blank(self.storefront_token).ok_or(ConfigError::MissingAccessToken)?;

        let types = self
            .types
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.parse::<EntityKind>())
            .collect::<Result<Vec<_>, _>>()?;

        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ConfigError::InvalidPageSize(per_page));
        }

        Ok(SourceConfig {
            store_url,
            storefront_token,
            type_name: self
                .type_name
                .unwrap_or_else(|| DEFAULT_TYPE_NAME.to_owned()),
            types,
            per_page,
            locales: normalize_locales(&self.locales),
            api_version: non_blank(self.api_version)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
            request_timeout_secs: self.request_timeout_secs.unwrap_or(30),
            max_retries: self.max_retries.unwrap_or(3),
            retry_backoff_base_secs: self.retry_backoff_base_secs.unwrap_or(5),
            log_level: non_blank(self.log_level).unwrap_or_else(|| "info".to_owned()),
        })
    }
}

/// Validated, immutable connector configuration.
#[derive(Clone)]
pub struct SourceConfig {
    /// Store origin without trailing slash, e.g. `https://demo.myshopify.com`.
    pub store_url: String,
    pub storefront_token: String,
    /// Prefix for every destination collection name.
    pub type_name: String,
    /// Configured kinds; empty means all.
    pub types: Vec<EntityKind>,
    pub per_page: u32,
    /// Canonical (see [`canonical_locale`]), de-duplicated locales for the
    /// translation pass.
    pub locales: Vec<String>,
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub log_level: String,
}

impl SourceConfig {
    #[must_use]
    pub fn included_kinds(&self) -> IncludedKinds {
        IncludedKinds::from_configured(&self.types)
    }

    #[must_use]
    pub fn type_names(&self) -> TypeNames {
        TypeNames::new(&self.type_name)
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("store_url", &self.store_url)
            .field("storefront_token", &"[redacted]")
            .field("type_name", &self.type_name)
            .field("types", &self.types)
            .field("per_page", &self.per_page)
            .field("locales", &self.locales)
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trimmed, lower-cased locale with `_` separators written as `-`, so
/// `pt_BR` and `pt-br` name the same locale.
#[must_use]
pub fn canonical_locale(locale: &str) -> String {
    locale.trim().to_lowercase().replace('_', "-")
}

fn normalize_locales(locales: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(locales.len());
    for locale in locales {
        let locale = canonical_locale(locale);
        if !locale.is_empty() && !out.contains(&locale) {
            out.push(locale);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SourceOptions {
        SourceOptions {
            store_url: Some("https://demo.myshopify.com/".to_owned()),
            storefront_token: Some("token".to_owned()),
            ..SourceOptions::default()
        }
    }

    #[test]
    fn validate_applies_defaults() {
        let cfg = minimal().validate().unwrap();
        assert_eq!(cfg.store_url, "https://demo.myshopify.com");
        assert_eq!(cfg.type_name, "Shopify");
        assert_eq!(cfg.per_page, 100);
        assert!(cfg.types.is_empty());
        assert!(cfg.locales.is_empty());
        assert_eq!(cfg.api_version, "2020-10");
    }

    #[test]
    fn store_name_wins_over_store_url() {
        let mut opts = minimal();
        opts.store_name = Some("acme".to_owned());
        let cfg = opts.validate().unwrap();
        assert_eq!(cfg.store_url, "https://acme.myshopify.com");
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let mut opts = minimal();
        opts.store_url = Some("   ".to_owned());
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::MissingStoreEndpoint)
        ));
    }

    #[test]
    fn missing_token_is_rejected() {
        let mut opts = minimal();
        opts.storefront_token = None;
        assert!(matches!(opts.validate(), Err(ConfigError::MissingAccessToken)));
    }

    #[test]
    fn page_size_bounds() {
        let mut opts = minimal();
        opts.per_page = Some(0);
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::InvalidPageSize(0))
        ));

        let mut opts = minimal();
        opts.per_page = Some(251);
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::InvalidPageSize(251))
        ));

        let mut opts = minimal();
        opts.per_page = Some(250);
        assert_eq!(opts.validate().unwrap().per_page, 250);
    }

    #[test]
    fn locales_are_trimmed_lowercased_and_deduplicated() {
        let mut opts = minimal();
        opts.locales = vec![
            " FR ".to_owned(),
            "de".to_owned(),
            "fr".to_owned(),
            String::new(),
        ];
        let cfg = opts.validate().unwrap();
        assert_eq!(cfg.locales, vec!["fr", "de"]);
    }

    #[test]
    fn locale_separators_are_canonicalised_before_dedup() {
        let mut opts = minimal();
        opts.locales = vec![
            "pt_BR".to_owned(),
            "pt-br".to_owned(),
            "ptbr".to_owned(),
        ];
        let cfg = opts.validate().unwrap();
        assert_eq!(cfg.locales, vec!["pt-br", "ptbr"]);
    }

    #[test]
    fn types_are_parsed_into_kinds() {
        let mut opts = minimal();
        opts.types = vec!["Product".to_owned(), "collection".to_owned()];
        let cfg = opts.validate().unwrap();
        assert_eq!(cfg.types, vec![EntityKind::Product, EntityKind::Collection]);
        assert!(cfg.included_kinds().contains(EntityKind::Product));
        assert!(!cfg.included_kinds().contains(EntityKind::Blog));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = minimal().validate().unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("\"token\""));
    }
}
