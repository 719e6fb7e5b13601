mod ingest;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use shopsrc_core::{SourceConfig, SourceOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopsrc")]
#[command(about = "Shopify Storefront source connector")]
struct Cli {
    /// YAML options file; environment variables are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every configured entity kind and write a JSON snapshot
    Ingest {
        /// Where the snapshot is written
        #[arg(long, default_value = "shopify-snapshot.json")]
        output: PathBuf,

        /// Restrict ingestion to these kinds (comma separated)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        /// Locales for the translation pass (comma separated)
        #[arg(long, value_delimiter = ',')]
        locales: Vec<String>,
    },
    /// Print the resolved configuration with the token redacted
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            output,
            types,
            locales,
        } => {
            let mut options = load_options(cli.config.as_deref())?;
            overlay(&mut options, types, locales);
            let config = options.validate()?;
            init_tracing(&config)?;
            ingest::run(&config, &output).await?;
        }
        Commands::ShowConfig => {
            let config = load_options(cli.config.as_deref())?.validate()?;
            println!("{config:#?}");
        }
    }

    Ok(())
}

fn load_options(path: Option<&Path>) -> anyhow::Result<SourceOptions> {
    let options = match path {
        Some(path) => shopsrc_core::load_source_options_file(path)?,
        None => shopsrc_core::load_source_options_from_env()?,
    };
    Ok(options)
}

/// Command-line lists replace the configured ones when given.
fn overlay(options: &mut SourceOptions, types: Vec<String>, locales: Vec<String>) {
    if !types.is_empty() {
        options.types = types;
    }
    if !locales.is_empty() {
        options.locales = locales;
    }
}

fn init_tracing(config: &SourceConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
