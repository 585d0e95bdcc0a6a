use crate::adapters::csv_codec;
use crate::domain::model::Table;
use crate::domain::ports::Storage;
use crate::utils::blocking::run_blocking;
use crate::utils::error::Result;
use std::path::Path;

pub async fn read_csv_table<S: Storage>(storage: &S, path: &Path) -> Result<Table> {
    let data = storage.read_file(path).await?;
    run_blocking(move || csv_codec::read_table(&data)).await
}

/// Writes the table as CSV and hands it back to the caller.
pub async fn write_csv_table<S: Storage>(storage: &S, table: Table, path: &Path) -> Result<Table> {
    let (table, data) = run_blocking(move || {
        let data = csv_codec::write_table(&table)?;
        Ok((table, data))
    })
    .await?;
    storage.write_file(path, &data).await?;
    Ok(table)
}
