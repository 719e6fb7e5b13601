//! The request/response contract every GraphQL source satisfies.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

/// Header used to ask the Storefront API for a localized view.
pub const LOCALE_HEADER: &str = "Accept-Language";

/// Envelope returned by a GraphQL endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl GraphqlResponse {
    /// Wraps a successful payload.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Wraps a failed response carrying the given error messages.
    #[must_use]
    pub fn failed<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(
                messages
                    .into_iter()
                    .map(|m| GraphqlError { message: m.into() })
                    .collect(),
            ),
        }
    }

    /// First reported error message. An empty `errors` array is not a failure.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(<[GraphqlError]>::first)
            .map(|e| e.message.as_str())
    }
}

/// Opaque `request(query, variables) -> {data, errors}` operation.
///
/// Implementations own retries, timeouts and TLS; callers treat any
/// non-empty `errors` array as a failed request.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn request(
        &self,
        query: &str,
        variables: &Value,
        extra_headers: &[(String, String)],
    ) -> Result<GraphqlResponse, SourceError>;
}

/// Extra headers for a locale-scoped request.
#[must_use]
pub fn locale_headers(locale: &str) -> Vec<(String, String)> {
    vec![(LOCALE_HEADER.to_owned(), locale.to_owned())]
}
