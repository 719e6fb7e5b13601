//! Cursor pagination over GraphQL connections.
//!
//! Every list query returns a connection of the shape
//!
//! ```text
//! { pageInfo { hasNextPage }, edges [ { cursor, node } ] }
//! ```
//!
//! found at a fixed path inside `data`. The [`Paginator`] requests pages with
//! `first` (and `after` from the second page on) until `hasNextPage` is
//! false, accumulating nodes in source order.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::transport::GraphqlTransport;

/// Untyped record for one entity occurrence, as returned by the source.
pub type RawNode = Value;

/// Upper bound on pages per fetch. Guards against cycling cursors.
pub const MAX_PAGES: usize = 1_000;

/// A paginated GraphQL document plus where its connection lives in `data`.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    /// Operation name, used in logs and errors.
    pub name: &'static str,
    pub document: &'static str,
    /// Object keys leading from `data` to the connection.
    pub connection_path: &'static [&'static str],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T = RawNode> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: T,
}

/// One page of a connection. Also used for connections embedded in a parent
/// node, where `pageInfo` may be absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T = RawNode> {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            page_info: PageInfo::default(),
            edges: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    /// A single final page holding `nodes`, as left behind once an embedded
    /// connection has been completed.
    #[must_use]
    pub fn from_nodes(nodes: Vec<T>) -> Self {
        Self {
            page_info: PageInfo::default(),
            edges: nodes
                .into_iter()
                .map(|node| Edge { cursor: None, node })
                .collect(),
        }
    }

    /// Cursor of the last edge, the resume point for the next page.
    #[must_use]
    pub fn last_cursor(&self) -> Option<&str> {
        self.edges.last().and_then(|e| e.cursor.as_deref())
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

/// Drives a [`PageQuery`] to exhaustion against a transport.
///
/// Never retries: a page carrying GraphQL errors fails the whole fetch and
/// nodes gathered from earlier pages are dropped.
pub struct Paginator<'a> {
    transport: &'a dyn GraphqlTransport,
    page_size: u32,
    max_pages: usize,
}

impl<'a> Paginator<'a> {
    #[must_use]
    pub fn new(transport: &'a dyn GraphqlTransport, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
            max_pages: MAX_PAGES,
        }
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches every node of `query`, starting from the first page.
    ///
    /// `base_variables` are sent with every page; `first` and `after` are
    /// managed here. `extra_headers` are forwarded untouched (used for
    /// locale-scoped requests).
    ///
    /// # Errors
    ///
    /// - [`SourceError::Query`] with the first message if any page reports errors.
    /// - [`SourceError::MalformedPage`] if a page lacks the connection, or
    ///   claims another page without a cursor to resume from.
    /// - [`SourceError::PaginationLimit`] after [`MAX_PAGES`] pages.
    /// - Any transport error.
    pub async fn fetch_all(
        &self,
        query: &PageQuery,
        base_variables: Map<String, Value>,
        extra_headers: &[(String, String)],
    ) -> Result<Vec<RawNode>, SourceError> {
        self.fetch_from(query, base_variables, None, extra_headers)
            .await
    }

    /// Fetches the pages of `query` that follow `after`.
    ///
    /// Used to complete a connection whose first page arrived embedded in a
    /// parent node.
    ///
    /// # Errors
    ///
    /// Same as [`Paginator::fetch_all`].
    pub async fn fetch_after(
        &self,
        query: &PageQuery,
        base_variables: Map<String, Value>,
        after: &str,
        extra_headers: &[(String, String)],
    ) -> Result<Vec<RawNode>, SourceError> {
        self.fetch_from(query, base_variables, Some(after.to_owned()), extra_headers)
            .await
    }

    async fn fetch_from(
        &self,
        query: &PageQuery,
        base_variables: Map<String, Value>,
        mut cursor: Option<String>,
        extra_headers: &[(String, String)],
    ) -> Result<Vec<RawNode>, SourceError> {
        let mut nodes: Vec<RawNode> = Vec::new();
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.max_pages {
                return Err(SourceError::PaginationLimit {
                    query: query.name.to_owned(),
                    max_pages: self.max_pages,
                });
            }

            let mut variables = base_variables.clone();
            variables.insert("first".to_owned(), Value::from(self.page_size));
            if let Some(after) = &cursor {
                variables.insert("after".to_owned(), Value::String(after.clone()));
            }

            let response = self
                .transport
                .request(query.document, &Value::Object(variables), extra_headers)
                .await?;

            if let Some(message) = response.first_error() {
                return Err(SourceError::Query {
                    message: message.to_owned(),
                });
            }

            let page = extract_connection(query, response.data)?;
            let has_next_page = page.has_next_page();
            let next_cursor = page.last_cursor().map(str::to_owned);

            tracing::debug!(
                query = query.name,
                page = page_count,
                edges = page.edges.len(),
                has_next_page,
                "fetched page"
            );

            nodes.extend(page.into_nodes());

            if !has_next_page {
                break;
            }

            cursor = Some(next_cursor.ok_or_else(|| SourceError::MalformedPage {
                query: query.name.to_owned(),
                reason: "hasNextPage is true but the last edge has no cursor".to_owned(),
            })?);
        }

        Ok(nodes)
    }
}

/// Walks `connection_path` inside `data` and decodes the connection found there.
fn extract_connection(query: &PageQuery, data: Option<Value>) -> Result<Connection, SourceError> {
    let malformed = |reason: String| SourceError::MalformedPage {
        query: query.name.to_owned(),
        reason,
    };

    let mut current = data.ok_or_else(|| malformed("response carries no data".to_owned()))?;
    for key in query.connection_path {
        current = match current {
            Value::Object(mut map) => map
                .remove(*key)
                .filter(|v| !v.is_null())
                .ok_or_else(|| malformed(format!("missing `{key}` in response data")))?,
            _ => return Err(malformed(format!("expected an object above `{key}`"))),
        };
    }

    serde_json::from_value::<Connection>(current).map_err(|e| SourceError::Deserialize {
        context: format!("connection page of {}", query.name),
        source: e,
    })
}
