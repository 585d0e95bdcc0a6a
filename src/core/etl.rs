use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Rows shown in the post-extract preview.
const PREVIEW_ROWS: usize = 5;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");
        self.monitor.log_phase("Start", None);

        let raw = self.pipeline.extract().await?;
        let rows = raw.num_rows();
        tracing::info!("Loaded {} rows and {} columns", rows, raw.num_columns());
        tracing::info!("\n{}", raw.preview(PREVIEW_ROWS));
        self.monitor.log_phase("Extract", Some(rows));

        let transformed = self.pipeline.transform(raw).await?;
        self.monitor.log_phase("Transform", Some(transformed.num_rows()));

        let output_path = self.pipeline.load(transformed).await?;
        self.monitor.log_phase("Load", None);
        tracing::info!("Output saved to: {}", output_path);

        self.monitor.log_summary(rows);
        Ok(output_path)
    }
}
