// Adapters layer: concrete implementations for external systems (filesystem, sync CLI, codecs).

pub mod csv_codec;
pub mod parquet_codec;
pub mod storage;
pub mod sync;
