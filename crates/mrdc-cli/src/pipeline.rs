//! Extract, clean and load orchestration.
//!
//! Entities run one after another. A failure is recorded in that entity's
//! summary and the next entity still runs.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{Level, error, info, info_span, trace};

use mrdc_ingest::Source;
use mrdc_model::EntityKind;
use mrdc_output::{CsvSink, Sink};
use mrdc_transform::{CleanerRegistry, EntityCleaner, EntityFrame};

use crate::config::PipelineConfig;
use crate::logging::redact_value;
use crate::types::{EntitySummary, PipelineResult};

/// Per-run choices made on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Entities to run. Empty means every configured entity.
    pub entities: Vec<EntityKind>,
    /// Overrides the configured output directory.
    pub output_dir: Option<PathBuf>,
    /// Clean but do not write tables.
    pub dry_run: bool,
}

/// Extract, clean and optionally load a single entity.
pub fn run_entity(
    kind: EntityKind,
    source: &dyn Source,
    cleaner: &dyn EntityCleaner,
    sink: Option<&dyn Sink>,
    summary: &mut EntitySummary,
) -> Result<()> {
    let data = source
        .extract()
        .with_context(|| format!("extract {}", source.describe()))?;
    summary.rows_in = Some(data.height());
    info!(rows = data.height(), "extracted");

    let frame = EntityFrame::new(kind, data)
        .clean_with(cleaner)
        .with_context(|| format!("clean {kind}"))?;
    summary.rows_out = Some(frame.record_count());
    if tracing::enabled!(Level::TRACE) {
        let sample = format!("{}", frame.data.head(Some(3)));
        trace!(sample = %redact_value(&sample), "cleaned rows");
    }

    if let Some(sink) = sink {
        let path = sink
            .load(&frame)
            .with_context(|| format!("load {}", frame.table_name()))?;
        summary.output = Some(path);
    }
    Ok(())
}

/// Run every selected entity and collect summaries.
pub fn run_pipeline(config: &PipelineConfig, options: &RunOptions) -> PipelineResult {
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let sink = CsvSink::new(&output_dir);
    let registry = CleanerRegistry::from_options(&config.cleaning);

    let mut selected = if options.entities.is_empty() {
        config.configured_entities()
    } else {
        options.entities.clone()
    };
    selected.sort();
    selected.dedup();

    let mut entities = Vec::with_capacity(selected.len());
    for kind in selected {
        let span = info_span!("entity", entity = %kind, table = kind.target_table());
        let _guard = span.enter();

        let Some(spec) = config.sources.get(&kind) else {
            let mut summary = EntitySummary::new(kind, "-");
            summary.error = Some(format!("no source configured for {kind}"));
            error!("no source configured");
            entities.push(summary);
            continue;
        };

        let outcome = spec
            .open(&config.base_dir)
            .with_context(|| format!("open {} source", spec.kind_name()))
            .and_then(|source| {
                let cleaner = registry
                    .get(kind)
                    .ok_or_else(|| anyhow!("no cleaner registered for {kind}"))?;
                let mut summary = EntitySummary::new(kind, source.describe());
                let loader: Option<&dyn Sink> = if options.dry_run { None } else { Some(&sink) };
                let result = run_entity(kind, source.as_ref(), cleaner, loader, &mut summary);
                Ok((summary, result))
            });

        let summary = match outcome {
            Ok((summary, Ok(()))) => {
                info!(
                    rows_in = summary.rows_in,
                    rows_out = summary.rows_out,
                    "entity complete"
                );
                summary
            }
            Ok((mut summary, Err(err))) => {
                error!(error = %format!("{err:#}"), "entity failed");
                summary.error = Some(format!("{err:#}"));
                summary
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "entity failed");
                let mut summary = EntitySummary::new(kind, spec.kind_name());
                summary.error = Some(format!("{err:#}"));
                summary
            }
        };
        entities.push(summary);
    }

    PipelineResult {
        output_dir,
        dry_run: options.dry_run,
        entities,
    }
}
