//! Pipeline configuration file.
//!
//! ```toml
//! output_dir = "output"
//!
//! [sources.user]
//! kind = "csv"
//! path = "data/legacy_users.csv"
//!
//! [valid_entries.user]
//! column = "country_code"
//! entries = ["GB", "DE", "US"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mrdc_ingest::SourceSpec;
use mrdc_model::{CleaningOptions, ConfigError, EntityKind};
use serde::Deserialize;

const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    output_dir: Option<PathBuf>,
    #[serde(default)]
    sources: BTreeMap<String, SourceSpec>,
    #[serde(default)]
    valid_entries: CleaningOptions,
}

/// Validated pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory cleaned tables are written to.
    pub output_dir: PathBuf,
    /// Source per entity. Entities without a source are skipped.
    pub sources: BTreeMap<EntityKind, SourceSpec>,
    /// Allow-lists handed to the cleaners.
    pub cleaning: CleaningOptions,
    /// Directory relative paths resolve against.
    pub base_dir: PathBuf,
}

impl PipelineConfig {
    /// Parse configuration text. Relative paths resolve against `base_dir`.
    pub fn from_toml_str(contents: &str, path: &Path, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sources = BTreeMap::new();
        for (name, spec) in raw.sources {
            let kind: EntityKind = name
                .parse()
                .map_err(|_| ConfigError::UnknownEntity { name: name.clone() })?;
            sources.insert(kind, spec);
        }

        let output_dir = raw
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output_dir = if output_dir.is_absolute() {
            output_dir
        } else {
            base_dir.join(output_dir)
        };

        Ok(Self {
            output_dir,
            sources,
            cleaning: raw.valid_entries,
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Load a configuration file. Relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_toml_str(&contents, path, &base_dir)
    }

    /// Entities with a configured source, in pipeline order.
    pub fn configured_entities(&self) -> Vec<EntityKind> {
        self.sources.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<PipelineConfig, ConfigError> {
        PipelineConfig::from_toml_str(text, Path::new("mrdc.toml"), Path::new("/etl"))
    }

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/etl/output"));
        assert!(config.sources.is_empty());
        assert_eq!(config.cleaning, CleaningOptions::default());
    }

    #[test]
    fn test_sources_and_allow_lists() {
        let config = parse(
            r#"
output_dir = "/tmp/out"

[sources.date_times]
kind = "json"
path = "date_details.json"

[sources.user]
kind = "csv"
path = "legacy_users.csv"

[valid_entries.user]
column = "country_code"
entries = ["GB"]
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(
            config.configured_entities(),
            vec![EntityKind::User, EntityKind::DateTime]
        );
        assert_eq!(config.cleaning.user.len(), 1);
        assert_eq!(config.cleaning.card, CleaningOptions::default().card);
    }

    #[test]
    fn test_unknown_entity() {
        let err = parse("[sources.customers]\nkind = \"csv\"\npath = \"c.csv\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEntity { name } if name == "customers"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse("outptu_dir = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
