use crate::domain::model::{SyncStatus, Table};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Resolves a layout-relative path to where it lives on disk.
    fn full_path(&self, path: &Path) -> PathBuf;
    fn exists(&self, path: &Path) -> impl Future<Output = bool> + Send;
    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(&self, path: &Path, data: &[u8]) -> impl Future<Output = Result<()>> + Send;
    fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Mirrors a remote object-store prefix into a local directory.
pub trait ObjectSync: Send + Sync {
    fn sync(&self, remote: &str, local: &Path) -> impl Future<Output = SyncStatus> + Send;
}

/// Produces the per-shard tables the aggregator concatenates.
pub trait ShardSource: Send + Sync {
    fn shard_count(&self) -> usize;
    fn load_shard(&self, index: usize, refresh: bool)
        -> impl Future<Output = Result<Table>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<Table>;
    async fn load(&self, table: Table) -> Result<String>;
}
