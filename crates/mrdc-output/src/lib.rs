//! Load sinks for cleaned tables.
//!
//! A sink receives an entity frame and persists it under the entity's target
//! table name. Loading only happens after a cleaner has returned, so a failed
//! clean never leaves a partial table behind.

use std::fs::{self, File};
use std::path::PathBuf;

use mrdc_transform::EntityFrame;
use polars::prelude::{CsvWriter, SerWriter};
use thiserror::Error;
use tracing::info;

/// Errors raised while writing a table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write table {table} to {path}: {message}")]
    Write {
        table: String,
        path: PathBuf,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Destination for cleaned tables.
pub trait Sink {
    /// Persist the frame as its target table and return where it went.
    fn load(&self, frame: &EntityFrame) -> Result<PathBuf>;
}

/// Writes each table as `<dir>/<target_table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the given table would be written to.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }
}

impl Sink for CsvSink {
    fn load(&self, frame: &EntityFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let table = frame.table_name();
        let path = self.table_path(table);
        let mut file = File::create(&path).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        let mut data = frame.data.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut data)
            .map_err(|e| OutputError::Write {
                table: table.to_string(),
                path: path.clone(),
                message: e.to_string(),
            })?;
        info!(table, rows = frame.record_count(), path = %path.display(), "loaded table");
        Ok(path)
    }
}
