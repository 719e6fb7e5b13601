pub mod config;
pub mod kinds;
pub mod source_config;
pub mod type_names;

use thiserror::Error;

pub use config::{
    load_source_config, load_source_config_from_env, load_source_options_file,
    load_source_options_from_env,
};
pub use kinds::{EntityKind, IncludedKinds};
pub use source_config::{canonical_locale, SourceConfig, SourceOptions};
pub use type_names::{pascal_case, TypeNames};

/// Errors raised while loading or validating connector configuration.
///
/// Every variant is fatal and is surfaced before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing store name or url")]
    MissingStoreEndpoint,

    #[error("missing storefront access token")]
    MissingAccessToken,

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown entity kind '{0}'")]
    UnknownEntityKind(String),

    #[error("page size {0} is out of range; must be between 1 and 250")]
    InvalidPageSize(u32),

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    FileParse(#[from] serde_yaml::Error),
}
