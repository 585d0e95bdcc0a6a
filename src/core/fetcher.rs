use crate::config::layout::DataLayout;
use crate::config::PipelineConfig;
use crate::domain::model::{Dataset, FetchReport};
use crate::domain::ports::{ObjectSync, Storage};

/// Mirrors the places and categories prefixes unless the first shard is already on disk.
pub struct Fetcher<'a, S: Storage, X: ObjectSync> {
    storage: &'a S,
    sync: &'a X,
    config: &'a PipelineConfig,
    layout: &'a DataLayout,
}

impl<'a, S: Storage, X: ObjectSync> Fetcher<'a, S, X> {
    pub fn new(storage: &'a S, sync: &'a X, config: &'a PipelineConfig, layout: &'a DataLayout) -> Self {
        Self {
            storage,
            sync,
            config,
            layout,
        }
    }

    /// Runs one sync per dataset, in order, and reports every outcome.
    /// A failed sync does not stop the next one; policy is left to the caller.
    pub async fn download(&self) -> FetchReport {
        let marker = self.layout.download_marker();
        if self.storage.exists(&marker).await {
            tracing::info!("Data already downloaded. Skipping download.");
            return FetchReport::Skipped { marker };
        }

        tracing::info!("Downloading the parquet files...");
        let mut statuses = Vec::with_capacity(Dataset::ALL.len());
        for dataset in Dataset::ALL {
            let remote = self.config.remote_uri(dataset);
            let local = self.storage.full_path(&self.layout.downloaded_dir(dataset));
            let status = self.sync.sync(&remote, &local).await;
            if status.success {
                tracing::debug!("Synced {} into {}", remote, local.display());
            } else {
                tracing::warn!(
                    "Sync of {} exited with {:?}; {} may be incomplete",
                    remote,
                    status.exit_code,
                    local.display()
                );
            }
            statuses.push(status);
        }
        tracing::info!("Download complete.");

        FetchReport::Synced(statuses)
    }
}
