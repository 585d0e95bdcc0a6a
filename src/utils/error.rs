use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error("Background task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Source file for shard {index} not found: {}", .path.display())]
    ShardNotFound { index: usize, path: PathBuf },

    #[error("Shard {shard} has columns {found:?}, expected {expected:?}")]
    SchemaMismatch {
        shard: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Sync of {remote} failed (exit code: {exit_code:?})")]
    SyncFailed {
        remote: String,
        exit_code: Option<i32>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Schema,
    External,
    Configuration,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) | EtlError::ShardNotFound { .. } => ErrorCategory::Io,
            EtlError::CsvError(_)
            | EtlError::ParquetError(_)
            | EtlError::ArrowError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::SchemaMismatch { .. } => ErrorCategory::Schema,
            EtlError::SyncFailed { .. } => ErrorCategory::External,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::TaskJoinError(_) => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::External => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Data | ErrorCategory::Schema => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ShardNotFound { .. } => {
                "Run the download step first, or check that the release contains this shard"
                    .to_string()
            }
            EtlError::SchemaMismatch { .. } => {
                "Re-run with --refresh to regenerate converted shards from the same release"
                    .to_string()
            }
            EtlError::SyncFailed { .. } => {
                "Check that the aws CLI is installed and the bucket/release exist".to_string()
            }
            EtlError::CsvError(_) => {
                "A cached CSV may be truncated; delete it or re-run with --refresh".to_string()
            }
            EtlError::ParquetError(_) | EtlError::ArrowError(_) => {
                "The downloaded Parquet file may be incomplete; delete it and download again"
                    .to_string()
            }
            EtlError::IoError(_) => "Check file permissions and free disk space".to_string(),
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
            EtlError::ProcessingError { .. } | EtlError::TaskJoinError(_) => {
                "Re-run with --verbose for more detail".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ShardNotFound { index, path } => format!(
                "Shard {} is missing at {}",
                index,
                path.display()
            ),
            EtlError::SchemaMismatch { shard, .. } => {
                format!("Shard {} does not share the column layout of shard 0", shard)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
