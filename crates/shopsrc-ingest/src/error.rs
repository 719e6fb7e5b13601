use shopsrc_core::ConfigError;
use shopsrc_store::StoreError;
use shopsrc_storefront::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identifier \"{id}\": {reason}")]
    InvalidIdentifier { id: String, reason: String },
}

/// Failure inside one ingestion step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed node {node_id}: {reason}")]
    Normalization { node_id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("failed to build storefront client: {0}")]
    Client(#[source] SourceError),

    /// Names the step that aborted the run.
    #[error("ingestion step {step} failed: {source}")]
    Step {
        step: String,
        #[source]
        source: StepError,
    },
}
