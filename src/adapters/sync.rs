use crate::domain::model::SyncStatus;
use crate::domain::ports::ObjectSync;
use std::path::Path;
use tokio::process::Command;

/// Mirrors a public bucket prefix with `aws s3 cp --no-sign-request --recursive`.
///
/// The child inherits stdout/stderr so the CLI's own progress output is visible.
#[derive(Debug, Clone)]
pub struct AwsCliSync {
    program: String,
}

impl AwsCliSync {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AwsCliSync {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SYNC_PROGRAM)
    }
}

impl ObjectSync for AwsCliSync {
    async fn sync(&self, remote: &str, local: &Path) -> SyncStatus {
        tracing::debug!(
            "Running {} s3 cp --no-sign-request {} {} --recursive",
            self.program,
            remote,
            local.display()
        );

        let result = Command::new(&self.program)
            .args(["s3", "cp", "--no-sign-request", remote])
            .arg(local)
            .arg("--recursive")
            .status()
            .await;

        match result {
            Ok(status) => SyncStatus {
                remote: remote.to_string(),
                local: local.to_path_buf(),
                exit_code: status.code(),
                success: status.success(),
            },
            Err(e) => {
                tracing::warn!("Failed to start {}: {}", self.program, e);
                SyncStatus {
                    remote: remote.to_string(),
                    local: local.to_path_buf(),
                    exit_code: None,
                    success: false,
                }
            }
        }
    }
}
