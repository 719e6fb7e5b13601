//! The `ingest` command: live Storefront API into a JSON snapshot.

use std::path::Path;

use anyhow::Context;
use shopsrc_core::SourceConfig;
use shopsrc_ingest::run_with_transport;
use shopsrc_store::MemoryStore;
use shopsrc_storefront::StorefrontClient;

/// Runs a full ingestion and writes the store snapshot to `output`.
///
/// Nothing is written when any step fails.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the run fails, or the
/// snapshot cannot be written.
pub(crate) async fn run(config: &SourceConfig, output: &Path) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config).context("failed to build storefront client")?;
    tracing::info!(endpoint = %client.endpoint(), "connecting to storefront");

    let store = MemoryStore::new();
    let report = run_with_transport(config, &client, &store).await?;

    let snapshot = store.snapshot();
    snapshot
        .write_json(output)
        .with_context(|| format!("failed to write snapshot to {}", output.display()))?;

    if store.overwrite_count() > 0 {
        tracing::warn!(
            overwrites = store.overwrite_count(),
            "nodes were overwritten during ingestion"
        );
    }
    tracing::info!(
        path = %output.display(),
        collections = snapshot.collections.len(),
        nodes = snapshot.node_total(),
        "snapshot written"
    );

    for step in &report.steps {
        println!("{:<32} {:>8}", step.step.to_string(), step.nodes);
    }
    println!("{:<32} {:>8}", "total", report.total_nodes());
    Ok(())
}
