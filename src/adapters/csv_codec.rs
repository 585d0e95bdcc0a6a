use crate::domain::model::Table;
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

/// Parses CSV with a header row. Every row must have the header's width.
pub fn read_table(data: &[u8]) -> Result<Table> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);
    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;
    Table::new(columns, rows)
}

pub fn write_table(table: &Table) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
