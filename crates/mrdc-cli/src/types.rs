use std::path::PathBuf;

use mrdc_model::EntityKind;

/// Outcome of one entity's extract, clean and load run.
#[derive(Debug)]
pub struct EntitySummary {
    pub kind: EntityKind,
    /// Source label, or `-` when no source is configured.
    pub source: String,
    pub rows_in: Option<usize>,
    pub rows_out: Option<usize>,
    /// Written table, absent on dry runs and failures.
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl EntitySummary {
    pub fn new(kind: EntityKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            rows_in: None,
            rows_out: None,
            output: None,
            error: None,
        }
    }

    /// Rows removed by cleaning.
    pub fn dropped(&self) -> Option<usize> {
        match (self.rows_in, self.rows_out) {
            (Some(rows_in), Some(rows_out)) => Some(rows_in.saturating_sub(rows_out)),
            _ => None,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug)]
pub struct PipelineResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub entities: Vec<EntitySummary>,
}

impl PipelineResult {
    pub fn has_errors(&self) -> bool {
        self.entities.iter().any(EntitySummary::failed)
    }

    pub fn total_rows_out(&self) -> usize {
        self.entities.iter().filter_map(|e| e.rows_out).sum()
    }
}
