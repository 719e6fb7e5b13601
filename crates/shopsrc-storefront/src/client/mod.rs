//! HTTP client for the Shopify Storefront GraphQL API.

mod origin;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use shopsrc_core::SourceConfig;

use crate::error::SourceError;
use crate::rate_limit::retry_with_backoff;
use crate::transport::{GraphqlResponse, GraphqlTransport};

pub use origin::{extract_store_origin, graphql_endpoint};

/// Header carrying the public storefront token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

const USER_AGENT: &str = concat!("shopsrc/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a store's Storefront GraphQL endpoint.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient errors (429, 5xx, network failures) are retried
/// with exponential backoff up to `max_retries` additional attempts.
///
/// GraphQL `errors` in a 200 response are returned to the caller untouched;
/// deciding that they fail the request is the caller's job.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a client for `store_url` using the given API version,
    /// timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidEndpoint`] if the
    /// store URL does not yield a valid endpoint.
    pub fn new(
        store_url: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: graphql_endpoint(store_url, api_version)?,
            access_token: access_token.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from validated connector configuration.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        Self::new(
            &config.store_url,
            &config.api_version,
            &config.storefront_token,
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post_once(
        &self,
        body: &Value,
        extra_headers: &[(String, String)],
    ) -> Result<GraphqlResponse, SourceError> {
        let url = self.endpoint.to_string();

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(body);
        for (name, value) in extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(SourceError::RateLimited {
                domain: origin::extract_domain(&self.endpoint),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound { url });
        }

        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<GraphqlResponse>(&text).map_err(|e| SourceError::Deserialize {
            context: format!("graphql response from {url}"),
            source: e,
        })
    }
}

#[async_trait]
impl GraphqlTransport for StorefrontClient {
    async fn request(
        &self,
        query: &str,
        variables: &Value,
        extra_headers: &[(String, String)],
    ) -> Result<GraphqlResponse, SourceError> {
        let body = json!({ "query": query, "variables": variables });
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.post_once(&body, extra_headers)
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
