use crate::adapters::parquet_codec;
use crate::domain::model::Table;
use crate::domain::ports::Storage;
use crate::utils::blocking::run_blocking;
use crate::utils::error::Result;
use std::path::Path;

/// Re-encodes the raw table as a single zstd Parquet file.
pub struct Archiver<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> Archiver<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub async fn persist(&self, table: Table, path: &Path) -> Result<Table> {
        let (table, data) = run_blocking(move || {
            let data = parquet_codec::write_table(&table)?;
            Ok((table, data))
        })
        .await?;
        self.storage.write_file(path, &data).await?;
        tracing::info!("Saved raw data to {}", path.display());
        Ok(table)
    }
}
