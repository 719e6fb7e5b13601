use std::path::Path;

use crate::source_config::{SourceConfig, SourceOptions};
use crate::ConfigError;

/// Load connector configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_source_config() -> Result<SourceConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_source_config_from_env()
}

/// Load connector configuration from environment variables already in the process.
///
/// Unlike [`load_source_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_source_config_from_env() -> Result<SourceConfig, ConfigError> {
    load_source_options_from_env()?.validate()
}

/// Read unvalidated connector options from the process environment.
///
/// Does NOT load `.env` files; callers that want them call
/// `dotenvy::dotenv()` first.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var does not parse.
pub fn load_source_options_from_env() -> Result<SourceOptions, ConfigError> {
    build_source_options(|key| std::env::var(key))
}

/// Read connector options from a YAML file.
///
/// The result is not validated; callers may overlay CLI flags before calling
/// [`SourceOptions::validate`].
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_source_options_file(path: &Path) -> Result<SourceOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let options: SourceOptions = serde_yaml::from_str(&content)?;
    Ok(options)
}

/// Build connector options using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
pub(crate) fn build_source_options<F>(lookup: F) -> Result<SourceOptions, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> { lookup(var).ok() };

    let list = |var: &str| -> Vec<String> {
        lookup(var)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    };

    let parse_u32 = |var: &str| -> Result<Option<u32>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    };

    let parse_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    };

    Ok(SourceOptions {
        store_name: optional("SHOPSRC_STORE_NAME"),
        store_url: optional("SHOPSRC_STORE_URL"),
        storefront_token: optional("SHOPSRC_STOREFRONT_TOKEN"),
        type_name: optional("SHOPSRC_TYPE_NAME"),
        types: list("SHOPSRC_TYPES"),
        per_page: parse_u32("SHOPSRC_PER_PAGE")?,
        locales: list("SHOPSRC_LOCALES"),
        api_version: optional("SHOPSRC_API_VERSION"),
        request_timeout_secs: parse_u64("SHOPSRC_REQUEST_TIMEOUT_SECS")?,
        max_retries: parse_u32("SHOPSRC_MAX_RETRIES")?,
        retry_backoff_base_secs: parse_u64("SHOPSRC_RETRY_BACKOFF_BASE_SECS")?,
        log_level: optional("SHOPSRC_LOG_LEVEL"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
