use crate::config::PipelineConfig;
use crate::domain::model::Dataset;
use std::path::PathBuf;

/// Fixed on-disk layout under the data root:
///
/// ```text
/// data/
///   downloaded/{places,categories}/places-00000.zstd.parquet ...
///   converted/{places,categories}/places-00000.csv ...
///   foursquare.csv | raw_data.csv
///   foursquare_clean.csv
///   raw_data.zstd.parquet
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
    raw_file_name: String,
    clean_file_name: String,
}

impl DataLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        raw_file_name: impl Into<String>,
        clean_file_name: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            raw_file_name: raw_file_name.into(),
            clean_file_name: clean_file_name.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.data_root.clone(),
            config.raw_file_name.clone(),
            config.clean_file_name.clone(),
        )
    }

    /// Parents first, so a plain loop can create them in order.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone(), self.root.join("downloaded")];
        dirs.extend(Dataset::ALL.iter().map(|d| self.downloaded_dir(*d)));
        dirs.push(self.root.join("converted"));
        dirs.extend(Dataset::ALL.iter().map(|d| self.converted_dir(*d)));
        dirs
    }

    pub fn downloaded_dir(&self, dataset: Dataset) -> PathBuf {
        self.root.join("downloaded").join(dataset.as_str())
    }

    pub fn converted_dir(&self, dataset: Dataset) -> PathBuf {
        self.root.join("converted").join(dataset.as_str())
    }

    pub fn shard_source_path(&self, index: usize) -> PathBuf {
        self.downloaded_dir(Dataset::Places)
            .join(format!("places-{:05}.zstd.parquet", index))
    }

    pub fn shard_csv_path(&self, index: usize) -> PathBuf {
        self.converted_dir(Dataset::Places)
            .join(format!("places-{:05}.csv", index))
    }

    /// The first shard's source file; its presence means the download already ran.
    pub fn download_marker(&self) -> PathBuf {
        self.shard_source_path(0)
    }

    pub fn raw_table_path(&self) -> PathBuf {
        self.root.join(&self.raw_file_name)
    }

    pub fn clean_table_path(&self) -> PathBuf {
        self.root.join(&self.clean_file_name)
    }

    /// Raw table path with `.csv` swapped for `.zstd.parquet`.
    pub fn archive_path(&self) -> PathBuf {
        let stem = self
            .raw_file_name
            .strip_suffix(".csv")
            .unwrap_or(&self.raw_file_name);
        self.root.join(format!("{}.zstd.parquet", stem))
    }
}
