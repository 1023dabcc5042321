use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use mrdc_cli::config::PipelineConfig;
use mrdc_cli::pipeline::{RunOptions, run_pipeline};
use mrdc_cli::types::PipelineResult;
use mrdc_model::{CleaningOptions, EntityKind};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

pub fn run_entities() -> Result<()> {
    let options = CleaningOptions::default();
    let mut table = Table::new();
    table.set_header(vec!["Entity", "Table", "Allow-list", "Description"]);
    apply_table_style(&mut table);
    for kind in EntityKind::ALL {
        let allow_list = options
            .for_entity(kind)
            .map(|valid| format!("{} ({} values)", valid.column, valid.len()))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            kind.to_string(),
            kind.target_table().to_string(),
            allow_list,
            kind.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<PipelineResult> {
    let span = info_span!("run", config = %args.config.display());
    let _guard = span.enter();
    let config = PipelineConfig::load(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let options = RunOptions {
        entities: args.entities.clone(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    Ok(run_pipeline(&config, &options))
}
