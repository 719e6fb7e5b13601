//! Store URL handling for the Storefront client.

use reqwest::Url;

use crate::error::SourceError;

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://demo.myshopify.com/collections/all"`, returns
/// `"https://demo.myshopify.com"`, so the GraphQL endpoint is always built
/// from the store root.
#[must_use]
pub fn extract_store_origin(store_url: &str) -> String {
    Url::parse(store_url).map_or_else(
        |e| {
            tracing::warn!(
                store_url,
                error = %e,
                "could not parse store url, falling back to string split for origin extraction"
            );
            store_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Builds `{origin}/api/{api_version}/graphql.json`.
///
/// # Errors
///
/// Returns [`SourceError::InvalidEndpoint`] if the origin is not a valid URL base.
pub fn graphql_endpoint(store_url: &str, api_version: &str) -> Result<Url, SourceError> {
    let origin = extract_store_origin(store_url);
    let endpoint = format!("{origin}/api/{api_version}/graphql.json");
    Url::parse(&endpoint).map_err(|e| SourceError::InvalidEndpoint {
        endpoint,
        reason: e.to_string(),
    })
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.to_string(), str::to_owned)
}
