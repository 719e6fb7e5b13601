//! Paginated fetching of top-level lists and their nested connections.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shopsrc_storefront::queries::NESTED_PAGE_SIZE;
use shopsrc_storefront::{Connection, GraphqlTransport, PageQuery, Paginator, SourceError};

use crate::error::StepError;
use crate::raw::{decode_node, decode_nodes};

/// A list paginator sized by configuration plus a nested-connection
/// paginator sized to the Storefront maximum.
pub struct Fetcher<'a> {
    list: Paginator<'a>,
    nested: Paginator<'a>,
}

impl<'a> Fetcher<'a> {
    #[must_use]
    pub fn new(transport: &'a dyn GraphqlTransport, page_size: u32) -> Self {
        Self {
            list: Paginator::new(transport, page_size),
            nested: Paginator::new(transport, NESTED_PAGE_SIZE),
        }
    }

    /// Every node of a top-level list query, decoded.
    ///
    /// # Errors
    ///
    /// Any [`SourceError`] from the paginator, or [`StepError::Normalization`]
    /// for a node that does not decode.
    pub async fn list<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
        extra_headers: &[(String, String)],
    ) -> Result<Vec<T>, StepError> {
        let raw = self.list.fetch_all(query, Map::new(), extra_headers).await?;
        decode_nodes(raw)
    }

    /// Returns the full edge list of a connection embedded in `parent_id`.
    ///
    /// When the embedded first page reports more pages, `query` is resumed
    /// from its last cursor and the remaining nodes are appended in order.
    ///
    /// # Errors
    ///
    /// [`SourceError::MalformedPage`] if more pages are reported without a
    /// cursor, otherwise as [`Fetcher::list`].
    pub async fn complete<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
        parent_id: &str,
        connection: Connection<T>,
        extra_headers: &[(String, String)],
    ) -> Result<Vec<T>, StepError> {
        if !connection.has_next_page() {
            return Ok(connection.into_nodes());
        }

        let after = connection
            .last_cursor()
            .ok_or_else(|| SourceError::MalformedPage {
                query: query.name.to_owned(),
                reason: format!("embedded connection of {parent_id} has more pages but no cursor"),
            })?
            .to_owned();

        let mut variables = Map::new();
        variables.insert("id".to_owned(), Value::String(parent_id.to_owned()));
        let rest = self
            .nested
            .fetch_after(query, variables, &after, extra_headers)
            .await?;

        tracing::debug!(
            query = query.name,
            parent_id,
            extra = rest.len(),
            "completed nested connection"
        );

        let mut nodes = connection.into_nodes();
        nodes.reserve(rest.len());
        for raw in rest {
            nodes.push(decode_node(raw)?);
        }
        Ok(nodes)
    }

    /// Completes an embedded connection where it sits, leaving a single
    /// final page with every node.
    ///
    /// # Errors
    ///
    /// As [`Fetcher::complete`].
    pub async fn complete_in_place<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
        parent_id: &str,
        connection: &mut Connection<T>,
        extra_headers: &[(String, String)],
    ) -> Result<(), StepError> {
        if !connection.has_next_page() {
            return Ok(());
        }
        let embedded = std::mem::take(connection);
        let nodes = self.complete(query, parent_id, embedded, extra_headers).await?;
        *connection = Connection::from_nodes(nodes);
        Ok(())
    }
}
