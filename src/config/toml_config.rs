use crate::config::{PipelineConfig, PipelineVariant};
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File form of [`PipelineConfig`]. Every field is optional; missing ones
/// fall back to the defaults of the selected variant.
///
/// ```toml
/// variant = "clean"
///
/// [source]
/// bucket = "fsq-os-places-us-east-1"
/// release = "2025-07-08"
///
/// [storage]
/// data_root = "${FSQ_DATA_ROOT}"
///
/// [transform]
/// shard_count = 100
/// drop_columns = ["geom"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub variant: Option<PipelineVariant>,
    pub source: Option<SourceConfig>,
    pub storage: Option<StorageConfig>,
    pub transform: Option<TransformConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub bucket: Option<String>,
    pub release: Option<String>,
    pub sync_program: Option<String>,
    pub skip_download: Option<bool>,
    pub fail_on_sync_error: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_root: Option<PathBuf>,
    pub raw_file_name: Option<String>,
    pub clean_file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub shard_count: Option<usize>,
    pub refresh: Option<bool>,
    pub drop_columns: Option<Vec<String>>,
    pub column_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("env substitution pattern failed to compile: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_pipeline_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::for_variant(self.variant.unwrap_or_default());

        if let Some(source) = self.source {
            if let Some(bucket) = source.bucket {
                config.bucket = bucket;
            }
            if let Some(release) = source.release {
                config.release = release;
            }
            if let Some(program) = source.sync_program {
                config.sync_program = program;
            }
            if let Some(skip) = source.skip_download {
                config.skip_download = skip;
            }
            if let Some(strict) = source.fail_on_sync_error {
                config.fail_on_sync_error = strict;
            }
        }

        if let Some(storage) = self.storage {
            if let Some(root) = storage.data_root {
                config.data_root = root;
            }
            if let Some(name) = storage.raw_file_name {
                config.raw_file_name = name;
            }
            if let Some(name) = storage.clean_file_name {
                config.clean_file_name = name;
            }
        }

        if let Some(transform) = self.transform {
            if let Some(count) = transform.shard_count {
                config.shard_count = count;
            }
            if let Some(refresh) = transform.refresh {
                config.refresh = refresh;
            }
            if let Some(columns) = transform.drop_columns {
                config.drop_columns = columns;
            }
            if let Some(prefix) = transform.column_prefix {
                config.column_prefix = prefix;
            }
        }

        if let Some(monitoring) = self.monitoring {
            config.monitor = monitoring.enabled;
        }

        config
    }
}
