pub mod aggregator;
pub mod archiver;
pub mod cleaner;
pub mod converter;
pub mod directories;
pub mod etl;
pub mod fetcher;
pub mod persist;
pub mod pipeline;

pub use crate::domain::model::Table;
pub use crate::domain::ports::{ObjectSync, Pipeline, ShardSource, Storage};
pub use crate::utils::error::Result;
