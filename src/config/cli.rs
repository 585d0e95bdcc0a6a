use crate::config::toml_config::TomlConfig;
use crate::config::{PipelineConfig, PipelineVariant};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "places-etl")]
#[command(about = "Download Foursquare Open Places, convert shards to CSV and build a clean table")]
pub struct CliConfig {
    /// Path to a TOML configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pipeline variant
    #[arg(long, value_enum)]
    pub variant: Option<PipelineVariant>,

    /// Directory holding downloaded, converted and combined files
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    #[arg(long)]
    pub bucket: Option<String>,

    /// Release partition date (YYYY-MM-DD)
    #[arg(long)]
    pub release: Option<String>,

    /// Program used to mirror the bucket
    #[arg(long)]
    pub sync_program: Option<String>,

    #[arg(long)]
    pub shard_count: Option<usize>,

    /// Rebuild converted shards and the combined table even if cached
    #[arg(long)]
    pub refresh: bool,

    #[arg(long)]
    pub skip_download: bool,

    /// Abort when the sync command exits non-zero
    #[arg(long)]
    pub fail_on_sync_error: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file if given, then applies flags on top.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut file = TomlConfig::from_file(path)?;
                if self.variant.is_some() {
                    file.variant = self.variant;
                }
                file.into_pipeline_config()
            }
            None => PipelineConfig::for_variant(self.variant.unwrap_or_default()),
        };

        if let Some(root) = &self.data_root {
            config.data_root = root.clone();
        }
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
        if let Some(release) = &self.release {
            config.release = release.clone();
        }
        if let Some(program) = &self.sync_program {
            config.sync_program = program.clone();
        }
        if let Some(count) = self.shard_count {
            config.shard_count = count;
        }
        config.refresh |= self.refresh;
        config.skip_download |= self.skip_download;
        config.fail_on_sync_error |= self.fail_on_sync_error;
        config.monitor |= self.monitor;

        Ok(config)
    }
}
