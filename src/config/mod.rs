#[cfg(feature = "cli")]
pub mod cli;
pub mod layout;
pub mod toml_config;

use crate::domain::model::Dataset;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BUCKET: &str = "fsq-os-places-us-east-1";
pub const DEFAULT_SYNC_PROGRAM: &str = "aws";
pub const DEFAULT_SHARD_COUNT: usize = 100;
pub const DEFAULT_COLUMN_PREFIX: &str = "fsq";
pub const GEOMETRY_COLUMN: &str = "geom";
/// Shard indices are zero-padded to five digits.
pub const MAX_SHARD_COUNT: usize = 100_000;

/// Which terminal output the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PipelineVariant {
    /// Drop the geometry column, prefix column names and write a clean CSV.
    #[default]
    Clean,
    /// Keep every column and re-encode the raw table as zstd Parquet.
    Archive,
}

/// Every setting a run needs. Paths are relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub variant: PipelineVariant,
    pub data_root: PathBuf,
    pub bucket: String,
    pub release: String,
    pub sync_program: String,
    pub shard_count: usize,
    pub refresh: bool,
    pub skip_download: bool,
    pub fail_on_sync_error: bool,
    pub drop_columns: Vec<String>,
    pub column_prefix: String,
    pub raw_file_name: String,
    pub clean_file_name: String,
    pub monitor: bool,
}

impl PipelineConfig {
    pub fn for_variant(variant: PipelineVariant) -> Self {
        let (release, raw_file_name, drop_columns) = match variant {
            PipelineVariant::Clean => ("2025-07-08", "foursquare.csv", vec![GEOMETRY_COLUMN.to_string()]),
            PipelineVariant::Archive => ("2025-02-06", "raw_data.csv", Vec::new()),
        };

        Self {
            variant,
            data_root: PathBuf::from("data"),
            bucket: DEFAULT_BUCKET.to_string(),
            release: release.to_string(),
            sync_program: DEFAULT_SYNC_PROGRAM.to_string(),
            shard_count: DEFAULT_SHARD_COUNT,
            refresh: false,
            skip_download: false,
            fail_on_sync_error: false,
            drop_columns,
            column_prefix: DEFAULT_COLUMN_PREFIX.to_string(),
            raw_file_name: raw_file_name.to_string(),
            clean_file_name: "foursquare_clean.csv".to_string(),
            monitor: false,
        }
    }

    /// `s3://{bucket}/release/dt={release}/{dataset}/parquet`
    pub fn remote_uri(&self, dataset: Dataset) -> String {
        format!(
            "s3://{}/release/dt={}/{}/parquet",
            self.bucket, self.release, dataset
        )
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_variant(PipelineVariant::default())
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_root", &self.data_root)?;
        validation::validate_s3_bucket_name("bucket", &self.bucket)?;
        validation::validate_release_date("release", &self.release)?;
        for dataset in Dataset::ALL {
            validation::validate_remote_uri("remote", &self.remote_uri(dataset))?;
        }
        validation::validate_non_empty_string("sync_program", &self.sync_program)?;
        validation::validate_range("shard_count", self.shard_count, 1, MAX_SHARD_COUNT)?;
        validation::validate_non_empty_string("column_prefix", &self.column_prefix)?;
        validation::validate_file_extensions(
            "output_files",
            &[self.raw_file_name.clone(), self.clean_file_name.clone()],
            &["csv"],
        )?;
        Ok(())
    }
}
