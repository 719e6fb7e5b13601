//! Pagination and normalization engine for Shopify Storefront data.
//!
//! [`Ingestion`] walks every configured entity kind through the paginator,
//! splits shared sub-entities (images, prices, variants) into their own
//! collections, links everything by [`Reference`](shopsrc_store::Reference)
//! and writes the result into a [`NodeStore`](shopsrc_store::NodeStore).

pub mod context;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod nodes;
pub mod normalize;
pub mod orchestrator;
pub mod raw;
pub mod schema;

pub use context::NormalizeContext;
pub use error::{IdentityError, IngestError, StepError};
pub use identity::{derive, Role};
pub use orchestrator::{run, run_with_transport, IngestReport, Ingestion, Step, StepReport};
