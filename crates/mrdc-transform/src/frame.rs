//! Entity frame type passed between pipeline stages.

use mrdc_model::EntityKind;
use polars::prelude::DataFrame;

use crate::cleaners::EntityCleaner;
use crate::error::Result;

/// A record set tagged with the entity it belongs to.
#[derive(Debug, Clone)]
pub struct EntityFrame {
    pub kind: EntityKind,
    pub data: DataFrame,
}

impl EntityFrame {
    pub fn new(kind: EntityKind, data: DataFrame) -> Self {
        Self { kind, data }
    }

    /// Returns the number of records in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Target table the frame is loaded into.
    pub fn table_name(&self) -> &'static str {
        self.kind.target_table()
    }

    /// Run a cleaner over the frame, keeping the entity tag.
    pub fn clean_with(self, cleaner: &dyn EntityCleaner) -> Result<Self> {
        let data = cleaner.clean(self.data)?;
        Ok(Self {
            kind: self.kind,
            data,
        })
    }
}
