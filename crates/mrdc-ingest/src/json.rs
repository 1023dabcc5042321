//! JSON file extraction.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::frame_builder::build_frame_from_json;
use crate::source::Source;

/// A JSON document on disk: either an array of records or a
/// column-oriented object keyed by row label.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for JsonSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn extract(&self) -> Result<DataFrame> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                IngestError::FileRead {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;
        let document: Value = serde_json::from_str(&text).map_err(|e| IngestError::JsonParse {
            path: self.path.clone(),
            source: e,
        })?;
        let df = build_frame_from_json(document, &self.path.display().to_string())?;
        debug!(path = %self.path.display(), rows = df.height(), "read JSON");
        Ok(df)
    }
}
