//! Sequences the per-kind normalizers for one full ingestion run.

use std::fmt;

use shopsrc_core::{EntityKind, SourceConfig, SourceOptions};
use shopsrc_store::NodeStore;
use shopsrc_storefront::{locale_headers, GraphqlTransport, StorefrontClient};

use crate::context::NormalizeContext;
use crate::error::{IngestError, StepError};
use crate::fetch::Fetcher;
use crate::normalize::product::ProductPass;
use crate::normalize::translation::write_translations;
use crate::normalize::{article, blog, collection, page, product, terms};

/// One unit of work in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Creation of the shared Image and Price collections.
    Setup,
    Kind(EntityKind),
    Translation { kind: EntityKind, locale: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => f.write_str("setup"),
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Translation { kind, locale } => write!(f, "{kind}Translation[{locale}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub nodes: usize,
}

/// Nodes written per completed step, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub steps: Vec<StepReport>,
}

impl IngestReport {
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.steps.iter().map(|s| s.nodes).sum()
    }

    #[must_use]
    pub fn nodes_for(&self, step: &Step) -> Option<usize> {
        self.steps.iter().find(|s| &s.step == step).map(|s| s.nodes)
    }
}

/// A single ingestion run from a transport into a store.
pub struct Ingestion<'a> {
    transport: &'a dyn GraphqlTransport,
    store: &'a dyn NodeStore,
    config: &'a SourceConfig,
}

impl<'a> Ingestion<'a> {
    #[must_use]
    pub fn new(
        transport: &'a dyn GraphqlTransport,
        store: &'a dyn NodeStore,
        config: &'a SourceConfig,
    ) -> Self {
        Self {
            transport,
            store,
            config,
        }
    }

    /// Runs every included kind in dependency order, then the translation
    /// pass for each configured locale. Steps run one after another and the
    /// first failure aborts the run.
    ///
    /// # Errors
    ///
    /// [`IngestError::Step`] naming the failed step and its cause.
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        let included = self.config.included_kinds();
        let ctx = NormalizeContext::new(self.store, self.config.type_names(), included.clone());
        let fetcher = Fetcher::new(self.transport, self.config.per_page);
        let mut report = IngestReport::default();

        tracing::info!(
            store_url = %self.config.store_url,
            kinds = ?included.iter().collect::<Vec<_>>(),
            locales = ?self.config.locales,
            "starting ingestion"
        );

        self.store.add_collection(&ctx.type_names().image());
        self.store.add_collection(&ctx.type_names().price());
        report.steps.push(StepReport {
            step: Step::Setup,
            nodes: 0,
        });

        for kind in included.iter() {
            let step = Step::Kind(kind);
            let nodes = ingest_kind(kind, &fetcher, &ctx)
                .await
                .map_err(|source| step_failed(&step, source))?;
            tracing::info!(kind = %kind, type_name = %ctx.type_names().kind(kind), count = nodes, "ingested");
            report.steps.push(StepReport { step, nodes });
        }

        for kind in included.translatable() {
            for locale in &self.config.locales {
                let step = Step::Translation {
                    kind,
                    locale: locale.clone(),
                };
                let nodes = translate_kind(kind, locale, &fetcher, &ctx)
                    .await
                    .map_err(|source| step_failed(&step, source))?;
                tracing::info!(kind = %kind, locale = %locale, count = nodes, "ingested translations");
                report.steps.push(StepReport { step, nodes });
            }
        }

        tracing::info!(total = report.total_nodes(), "ingestion complete");
        Ok(report)
    }
}

fn step_failed(step: &Step, source: StepError) -> IngestError {
    tracing::error!(step = %step, error = %source, "ingestion step failed");
    IngestError::Step {
        step: step.to_string(),
        source,
    }
}

async fn ingest_kind(
    kind: EntityKind,
    fetcher: &Fetcher<'_>,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError> {
    // The collection exists, possibly empty, even if the fetch fails.
    let _ = ctx.collection(kind);

    match kind {
        EntityKind::ProductType | EntityKind::ProductTag => {
            let terms_list = terms::fetch(fetcher, kind).await?;
            terms::normalize(kind, terms_list, ctx)
        }
        EntityKind::Collection => {
            let with_products = ctx.includes(EntityKind::Product);
            let records = collection::fetch(fetcher, with_products, &[]).await?;
            collection::normalize(records, ctx)
        }
        EntityKind::Product => {
            let with_collections = ctx.includes(EntityKind::Collection);
            let records =
                product::fetch(fetcher, ProductPass::Base { with_collections }, &[]).await?;
            product::normalize(records, ctx)
        }
        EntityKind::Blog => {
            let blogs = blog::fetch(fetcher, &[]).await?;
            blog::normalize(blogs, ctx)
        }
        EntityKind::Article => {
            let articles = article::fetch(fetcher, true, &[]).await?;
            article::normalize(articles, ctx)
        }
        EntityKind::Page => {
            let pages = page::fetch(fetcher, &[]).await?;
            page::normalize(pages, ctx)
        }
    }
}

async fn translate_kind(
    kind: EntityKind,
    locale: &str,
    fetcher: &Fetcher<'_>,
    ctx: &NormalizeContext<'_>,
) -> Result<usize, StepError> {
    let headers = locale_headers(locale);

    match kind {
        EntityKind::Collection => {
            let records = collection::fetch(fetcher, false, &headers).await?;
            write_translations(records.iter().map(|r| &r.collection), locale, ctx)
        }
        EntityKind::Product => {
            let records = product::fetch(fetcher, ProductPass::Localized, &headers).await?;
            let products = write_translations(records.iter().map(|r| &r.product), locale, ctx)?;
            let titled = records
                .iter()
                .flat_map(|r| r.variants.iter())
                .filter(|v| v.title.is_some());
            let variants = write_translations(titled, locale, ctx)?;
            Ok(products + variants)
        }
        EntityKind::Blog => {
            let blogs = blog::fetch(fetcher, &headers).await?;
            write_translations(&blogs, locale, ctx)
        }
        EntityKind::Article => {
            let articles = article::fetch(fetcher, false, &headers).await?;
            write_translations(&articles, locale, ctx)
        }
        EntityKind::Page => {
            let pages = page::fetch(fetcher, &headers).await?;
            write_translations(&pages, locale, ctx)
        }
        EntityKind::ProductType | EntityKind::ProductTag => Ok(0),
    }
}

/// Runs ingestion against `transport` with validated configuration.
///
/// # Errors
///
/// See [`Ingestion::run`].
pub async fn run_with_transport(
    config: &SourceConfig,
    transport: &dyn GraphqlTransport,
    store: &dyn NodeStore,
) -> Result<IngestReport, IngestError> {
    Ingestion::new(transport, store, config).run().await
}

/// Validates `options`, connects to the live Storefront API and ingests
/// everything into `store`.
///
/// Configuration problems surface before any request is made.
///
/// # Errors
///
/// - [`IngestError::Configuration`] for invalid options.
/// - [`IngestError::Client`] if the HTTP client cannot be built.
/// - [`IngestError::Step`] for any failure during the run.
pub async fn run(options: SourceOptions, store: &dyn NodeStore) -> Result<IngestReport, IngestError> {
    let config = options.validate()?;
    let client = StorefrontClient::from_config(&config).map_err(IngestError::Client)?;
    run_with_transport(&config, &client, store).await
}
