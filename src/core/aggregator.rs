use crate::core::persist::{read_csv_table, write_csv_table};
use crate::domain::model::Table;
use crate::domain::ports::{ShardSource, Storage};
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// Builds the raw table by concatenating every shard in index order.
pub struct Aggregator<'a, S: Storage, C: ShardSource> {
    storage: &'a S,
    shards: C,
    raw_path: PathBuf,
    drop_columns: &'a [String],
}

impl<'a, S: Storage, C: ShardSource> Aggregator<'a, S, C> {
    pub fn new(storage: &'a S, shards: C, raw_path: PathBuf, drop_columns: &'a [String]) -> Self {
        Self {
            storage,
            shards,
            raw_path,
            drop_columns,
        }
    }

    /// Loads the combined CSV if present and `refresh` is off, without touching
    /// any shard. Otherwise converts shards `0..shard_count`, drops the
    /// configured columns, concatenates and persists the result.
    ///
    /// Every shard must end up with shard 0's column list.
    pub async fn raw_table(&self, refresh: bool) -> Result<Table> {
        if !refresh && self.storage.exists(&self.raw_path).await {
            tracing::info!(
                "File {} already exists. Loading existing data.",
                self.raw_path.display()
            );
            return read_csv_table(self.storage, &self.raw_path).await;
        }

        let mut combined: Option<Table> = None;
        for index in 0..self.shards.shard_count() {
            let mut table = self.shards.load_shard(index, refresh).await?;
            for column in self.drop_columns {
                if !table.drop_column(column) {
                    tracing::debug!("Shard {} has no column {}", index, column);
                }
            }

            combined = Some(match combined.take() {
                None => table,
                Some(mut acc) => {
                    if acc.columns() != table.columns() {
                        return Err(EtlError::SchemaMismatch {
                            shard: index,
                            expected: acc.columns().to_vec(),
                            found: table.columns().to_vec(),
                        });
                    }
                    acc.extend_rows(table.into_rows());
                    acc
                }
            });
        }

        let combined = combined.unwrap_or_default();
        tracing::info!(
            "Writing {} rows from {} shards to {}",
            combined.num_rows(),
            self.shards.shard_count(),
            self.raw_path.display()
        );
        write_csv_table(self.storage, combined, &self.raw_path).await
    }
}
