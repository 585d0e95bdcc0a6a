pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{storage::LocalStorage, sync::AwsCliSync};
pub use config::{layout::DataLayout, PipelineConfig, PipelineVariant};
pub use core::{etl::EtlEngine, pipeline::PlacesPipeline};
pub use domain::model::{Dataset, FetchReport, SyncStatus, Table};
pub use utils::error::{EtlError, Result};
