use crate::adapters::parquet_codec;
use crate::config::layout::DataLayout;
use crate::core::persist::{read_csv_table, write_csv_table};
use crate::domain::model::Table;
use crate::domain::ports::{ShardSource, Storage};
use crate::utils::blocking::run_blocking;
use crate::utils::error::{EtlError, Result};
use bytes::Bytes;

/// Turns one downloaded Parquet shard into its CSV counterpart.
pub struct Converter<'a, S: Storage> {
    storage: &'a S,
    layout: &'a DataLayout,
    shard_count: usize,
}

impl<'a, S: Storage> Converter<'a, S> {
    pub fn new(storage: &'a S, layout: &'a DataLayout, shard_count: usize) -> Self {
        Self {
            storage,
            layout,
            shard_count,
        }
    }

    /// Returns the converted table for shard `index`.
    ///
    /// An existing CSV is reused unless `refresh` is set; the Parquet source is
    /// then never opened. Otherwise the source must exist, and on success its
    /// CSV rendering is written before the table is returned.
    pub async fn convert_shard(&self, index: usize, refresh: bool) -> Result<Table> {
        if index >= self.shard_count {
            return Err(EtlError::InvalidConfigValueError {
                field: "shard_index".to_string(),
                value: index.to_string(),
                reason: format!("Shard index must be below {}", self.shard_count),
            });
        }

        let csv_path = self.layout.shard_csv_path(index);
        if !refresh && self.storage.exists(&csv_path).await {
            tracing::info!(
                "File {} already exists... loading existing data.",
                csv_path.display()
            );
            return read_csv_table(self.storage, &csv_path).await;
        }

        let source_path = self.layout.shard_source_path(index);
        if !self.storage.exists(&source_path).await {
            return Err(EtlError::ShardNotFound {
                index,
                path: source_path,
            });
        }

        tracing::info!("Converting file {} to {}...", index, csv_path.display());
        let data = self.storage.read_file(&source_path).await?;
        let table = run_blocking(move || parquet_codec::read_table(Bytes::from(data))).await?;
        tracing::debug!(
            "Shard {} has {} rows and {} columns",
            index,
            table.num_rows(),
            table.num_columns()
        );

        write_csv_table(self.storage, table, &csv_path).await
    }
}

impl<S: Storage> ShardSource for Converter<'_, S> {
    fn shard_count(&self) -> usize {
        self.shard_count
    }

    async fn load_shard(&self, index: usize, refresh: bool) -> Result<Table> {
        self.convert_shard(index, refresh).await
    }
}
