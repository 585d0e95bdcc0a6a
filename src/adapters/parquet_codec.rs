//! Parquet <-> [`Table`] conversion.
//!
//! Reading renders every Arrow value through the Arrow display formatter, so
//! nested and binary columns (category lists, WKB geometry) become text the
//! same way for every shard. Nulls render as the empty string.
//!
//! Writing goes back through CSV text so column types are inferred the way a
//! CSV reload sees them: numeric columns come out as Int64/Float64, dates as
//! Date32, everything else as nullable Utf8. The file is ZSTD-compressed.

use std::io::Cursor;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatchReader;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use bytes::Bytes;
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;

use crate::adapters::csv_codec;
use crate::domain::model::Table;
use crate::utils::error::Result;

/// Rows per record batch when encoding.
const BATCH_ROWS: usize = 64 * 1024;

pub fn read_table(data: Bytes) -> Result<Table> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(data)?.build()?;
    let columns = reader
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect::<Vec<_>>();

    let options = FormatOptions::default();
    let mut rows = Vec::new();
    let mut cell = String::new();

    for batch in reader {
        let batch = batch?;
        let formatters = batch
            .columns()
            .iter()
            .map(|array| ArrayFormatter::try_new(array.as_ref(), &options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            let mut record = StringRecord::with_capacity(64, formatters.len());
            for formatter in &formatters {
                cell.clear();
                formatter.value(row).write(&mut cell)?;
                record.push_field(&cell);
            }
            rows.push(record);
        }
    }

    Table::new(columns, rows)
}

fn writer_properties() -> WriterProperties {
    let created_by = KeyValue {
        key: "created_by".to_string(),
        value: Some("places-etl".to_string()),
    };
    WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .set_key_value_metadata(Some(vec![created_by]))
        .build()
}

/// Column types inferred from every row of the CSV text. Columns with no
/// values at all stay Utf8.
fn infer_schema(text: &[u8], format: &Format) -> Result<Schema> {
    let (schema, _) = format.infer_schema(Cursor::new(text), None)?;
    let fields = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Null => Field::new(field.name(), DataType::Utf8, true),
            other => Field::new(field.name(), other.clone(), true),
        })
        .collect::<Vec<_>>();
    Ok(Schema::new(fields))
}

/// Encodes the table as zstd Parquet with inferred column types. Empty cells
/// are written as nulls.
pub fn write_table(table: &Table) -> Result<Vec<u8>> {
    let text = csv_codec::write_table(table)?;
    let format = Format::default().with_header(true);
    let schema = Arc::new(infer_schema(&text, &format)?);

    let batches = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(BATCH_ROWS)
        .build(Cursor::new(text.as_slice()))?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(writer_properties()))?;
    for batch in batches {
        writer.write(&batch?)?;
    }

    writer.close()?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        Array, BinaryArray, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder,
    };
    use arrow::record_batch::RecordBatch;

    fn sample_parquet() -> Bytes {
        let mut categories = ListBuilder::new(StringBuilder::new());
        categories.values().append_value("Coffee Shop");
        categories.append(true);
        categories.append(false);

        let schema = Arc::new(Schema::new(vec![
            Field::new("fsq_place_id", DataType::Utf8, false),
            Field::new("latitude", DataType::Float64, true),
            Field::new("venue_count", DataType::Int64, true),
            Field::new(
                "fsq_category_labels",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                true,
            ),
            Field::new("geom", DataType::Binary, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["a1", "b2"])),
                Arc::new(Float64Array::from(vec![Some(40.5), None])),
                Arc::new(Int64Array::from(vec![Some(3), Some(7)])),
                Arc::new(categories.finish()),
                Arc::new(BinaryArray::from(vec![Some(&[1u8, 2][..]), None])),
            ],
        )
        .unwrap();

        let mut buffer = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        Bytes::from(buffer)
    }

    #[test]
    fn test_read_renders_values_as_text() {
        let table = read_table(sample_parquet()).unwrap();
        assert_eq!(
            table.columns(),
            ["fsq_place_id", "latitude", "venue_count", "fsq_category_labels", "geom"]
        );
        assert_eq!(table.num_rows(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.get(0), Some("a1"));
        assert_eq!(first.get(1), Some("40.5"));
        assert_eq!(first.get(2), Some("3"));
        assert_eq!(first.get(3), Some("[Coffee Shop]"));
        assert_eq!(first.get(4), Some("0102"));

        let second = &table.rows()[1];
        assert_eq!(second.get(1), Some(""));
        assert_eq!(second.get(3), Some(""));
        assert_eq!(second.get(4), Some(""));
    }

    #[test]
    fn test_write_then_read_keeps_text_and_order() {
        let mut table = Table::with_columns(["id", "name"]);
        table.push_row(["1", "Cafe"]).unwrap();
        table.push_row(["2", ""]).unwrap();

        let bytes = write_table(&table).unwrap();
        let back = read_table(Bytes::from(bytes)).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_write_uses_zstd() {
        let mut table = Table::with_columns(["id"]);
        table.push_row(["1"]).unwrap();
        let bytes = Bytes::from(write_table(&table).unwrap());

        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes).unwrap();
        let column = builder.metadata().row_group(0).column(0);
        assert!(matches!(column.compression(), Compression::ZSTD(_)));
    }

    #[test]
    fn test_write_infers_column_types() {
        let mut table = Table::with_columns(["fsq_place_id", "latitude", "venue_count", "notes"]);
        table.push_row(["4b0", "40.5", "3", ""]).unwrap();
        table.push_row(["4b1", "-73.25", "", ""]).unwrap();

        let bytes = Bytes::from(write_table(&table).unwrap());
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes).unwrap();
        let schema = builder.schema().clone();

        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).data_type(), &DataType::Float64);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(schema.field(3).data_type(), &DataType::Utf8);

        let batch = builder.build().unwrap().next().unwrap().unwrap();
        let venues = batch.column(2).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(venues.value(0), 3);
        assert!(venues.is_null(1));
    }
}
