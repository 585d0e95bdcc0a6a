#![allow(dead_code)]

use arrow::array::{ArrayRef, BinaryArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use places_etl::domain::ports::ObjectSync;
use places_etl::{DataLayout, PipelineConfig, PipelineVariant, SyncStatus};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const SHARD_COLUMNS: [&str; 7] = [
    "fsq_place_id",
    "name",
    "latitude",
    "longitude",
    "locality",
    "date_created",
    "geom",
];

pub fn place_id(shard: usize, row: usize) -> String {
    format!("p{:02}-{:02}", shard, row)
}

/// A zstd Parquet shard shaped like the places release: 7 columns, `rows` rows.
pub fn shard_parquet(shard: usize, rows: usize) -> Vec<u8> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("fsq_place_id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
        Field::new("locality", DataType::Utf8, true),
        Field::new("date_created", DataType::Utf8, true),
        Field::new("geom", DataType::Binary, true),
    ]));

    let ids: Vec<String> = (0..rows).map(|r| place_id(shard, r)).collect();
    let names: Vec<String> = (0..rows).map(|r| format!("Place {}, #{}", shard, r)).collect();
    let localities: Vec<Option<&str>> = (0..rows)
        .map(|r| if r % 2 == 0 { Some("Brooklyn") } else { None })
        .collect();
    let geoms: Vec<Option<&[u8]>> = (0..rows).map(|_| Some(&[1u8, 1, 0, 0][..])).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(ids.iter())),
        Arc::new(StringArray::from_iter_values(names.iter())),
        Arc::new(Float64Array::from_iter_values((0..rows).map(|r| 40.0 + r as f64 / 4.0))),
        Arc::new(Float64Array::from_iter_values((0..rows).map(|r| -73.5 - r as f64))),
        Arc::new(StringArray::from(localities)),
        Arc::new(StringArray::from_iter_values((0..rows).map(|_| "2025-01-15"))),
        Arc::new(BinaryArray::from(geoms)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .build();
    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(props)).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    buffer
}

/// Drops shard files where the fetcher would have put them.
pub fn place_shards(root: &Path, layout: &DataLayout, row_counts: &[usize]) {
    for (index, rows) in row_counts.iter().enumerate() {
        let path = root.join(layout.shard_source_path(index));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, shard_parquet(index, *rows)).unwrap();
    }
}

pub fn test_config(variant: PipelineVariant, shard_count: usize) -> PipelineConfig {
    let mut config = PipelineConfig::for_variant(variant);
    config.shard_count = shard_count;
    config
}

/// Stand-in for the aws CLI: records every call and writes canned files into
/// the target directory for remotes it knows about.
#[derive(Clone, Default)]
pub struct FakeSync {
    pub calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub payload: HashMap<String, Vec<(String, Vec<u8>)>>,
    pub failing: Vec<String>,
}

impl FakeSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(mut self, remote: &str, files: Vec<(String, Vec<u8>)>) -> Self {
        self.payload.insert(remote.to_string(), files);
        self
    }

    pub fn failing_on(mut self, remote: &str) -> Self {
        self.failing.push(remote.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ObjectSync for FakeSync {
    async fn sync(&self, remote: &str, local: &Path) -> SyncStatus {
        self.calls
            .lock()
            .unwrap()
            .push((remote.to_string(), local.to_path_buf()));

        if self.failing.iter().any(|r| r == remote) {
            return SyncStatus {
                remote: remote.to_string(),
                local: local.to_path_buf(),
                exit_code: Some(1),
                success: false,
            };
        }

        if let Some(files) = self.payload.get(remote) {
            std::fs::create_dir_all(local).unwrap();
            for (name, data) in files {
                std::fs::write(local.join(name), data).unwrap();
            }
        }

        SyncStatus {
            remote: remote.to_string(),
            local: local.to_path_buf(),
            exit_code: Some(0),
            success: true,
        }
    }
}
