pub mod client;
pub mod error;
pub mod pagination;
pub mod queries;
mod rate_limit;
pub mod transport;

pub use client::StorefrontClient;
pub use error::SourceError;
pub use pagination::{Connection, Edge, PageInfo, PageQuery, Paginator, RawNode};
pub use transport::{locale_headers, GraphqlError, GraphqlResponse, GraphqlTransport};
