//! Source abstraction and its configuration form.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::api::StoreApiSource;
use crate::csv::CsvSource;
use crate::error::{IngestError, Result};
use crate::json::JsonSource;

/// Anything that can be materialized into a DataFrame of raw text columns.
pub trait Source {
    /// Short label for logs and summaries.
    fn describe(&self) -> String;

    /// Read the whole source into memory.
    fn extract(&self) -> Result<DataFrame>;
}

/// Environment variable read for the store API key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "MRDC_API_KEY";

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// A source as written in the pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    Csv {
        path: PathBuf,
    },
    Json {
        path: PathBuf,
    },
    StoreApi {
        number_stores_url: String,
        store_url: String,
        /// Name of the environment variable holding the API key.
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
    },
}

impl SourceSpec {
    /// Instantiate the source. Relative paths resolve against `base_dir`.
    pub fn open(&self, base_dir: &Path) -> Result<Box<dyn Source>> {
        match self {
            SourceSpec::Csv { path } => Ok(Box::new(CsvSource::new(resolve(base_dir, path)))),
            SourceSpec::Json { path } => Ok(Box::new(JsonSource::new(resolve(base_dir, path)))),
            SourceSpec::StoreApi {
                number_stores_url,
                store_url,
                api_key_env,
            } => {
                let api_key =
                    std::env::var(api_key_env).map_err(|_| IngestError::MissingApiKey {
                        var: api_key_env.clone(),
                    })?;
                Ok(Box::new(StoreApiSource::new(
                    number_stores_url.as_str(),
                    store_url.as_str(),
                    api_key,
                )?))
            }
        }
    }

    /// Short label for the source kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceSpec::Csv { .. } => "csv",
            SourceSpec::Json { .. } => "json",
            SourceSpec::StoreApi { .. } => "store_api",
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let spec = SourceSpec::Csv {
            path: PathBuf::from("data/users.csv"),
        };
        let source = spec.open(Path::new("/srv/etl")).unwrap();
        assert_eq!(source.describe(), "csv:/srv/etl/data/users.csv");
    }

    #[test]
    fn test_missing_api_key_env() {
        let spec = SourceSpec::StoreApi {
            number_stores_url: "https://example.test/number_stores".to_string(),
            store_url: "https://example.test/store_details/".to_string(),
            api_key_env: "MRDC_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        };
        let err = spec.open(Path::new(".")).err().unwrap();
        assert!(matches!(err, IngestError::MissingApiKey { .. }));
    }
}
