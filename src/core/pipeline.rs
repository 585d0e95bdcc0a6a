use crate::config::layout::DataLayout;
use crate::config::{PipelineConfig, PipelineVariant};
use crate::core::aggregator::Aggregator;
use crate::core::archiver::Archiver;
use crate::core::cleaner::Cleaner;
use crate::core::converter::Converter;
use crate::core::directories::make_directories;
use crate::core::fetcher::Fetcher;
use crate::core::{ObjectSync, Pipeline, Storage, Table};
use crate::domain::model::FetchReport;
use crate::utils::error::{EtlError, Result};

/// Download -> convert -> concatenate -> clean or archive.
pub struct PlacesPipeline<S: Storage, X: ObjectSync> {
    storage: S,
    sync: X,
    config: PipelineConfig,
    layout: DataLayout,
}

impl<S: Storage, X: ObjectSync> PlacesPipeline<S, X> {
    pub fn new(storage: S, sync: X, config: PipelineConfig) -> Self {
        let layout = DataLayout::from_config(&config);
        Self {
            storage,
            sync,
            config,
            layout,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Prepares the directory tree and fetches the dataset if needed.
    ///
    /// Sync failures abort only with `fail_on_sync_error`; otherwise they are
    /// logged and the run continues with whatever reached the disk.
    pub async fn initialize(&self) -> Result<FetchReport> {
        if !make_directories(&self.storage, &self.layout).await {
            tracing::warn!("Data directories could not all be created; continuing");
        }

        if self.config.skip_download {
            tracing::info!("Download disabled by configuration");
            return Ok(FetchReport::Disabled);
        }

        let report = Fetcher::new(&self.storage, &self.sync, &self.config, &self.layout)
            .download()
            .await;

        if let Some(failed) = report.failures().next() {
            if self.config.fail_on_sync_error {
                return Err(EtlError::SyncFailed {
                    remote: failed.remote.clone(),
                    exit_code: failed.exit_code,
                });
            }
            tracing::warn!(
                "{} sync command(s) failed; continuing with local data",
                report.failures().count()
            );
        }

        Ok(report)
    }

    pub async fn raw_table(&self) -> Result<Table> {
        let converter = Converter::new(&self.storage, &self.layout, self.config.shard_count);
        Aggregator::new(
            &self.storage,
            converter,
            self.layout.raw_table_path(),
            &self.config.drop_columns,
        )
        .raw_table(self.config.refresh)
        .await
    }
}

#[async_trait::async_trait]
impl<S: Storage, X: ObjectSync> Pipeline for PlacesPipeline<S, X> {
    async fn extract(&self) -> Result<Table> {
        self.initialize().await?;
        self.raw_table().await
    }

    async fn transform(&self, table: Table) -> Result<Table> {
        match self.config.variant {
            PipelineVariant::Clean => {
                Cleaner::new(&self.storage, &self.config.column_prefix).clean(table)
            }
            PipelineVariant::Archive => Ok(table),
        }
    }

    async fn load(&self, table: Table) -> Result<String> {
        let path = match self.config.variant {
            PipelineVariant::Clean => {
                let path = self.layout.clean_table_path();
                Cleaner::new(&self.storage, &self.config.column_prefix)
                    .persist(table, &path)
                    .await?;
                path
            }
            PipelineVariant::Archive => {
                let path = self.layout.archive_path();
                Archiver::new(&self.storage).persist(table, &path).await?;
                path
            }
        };

        Ok(self.storage.full_path(&path).display().to_string())
    }
}
