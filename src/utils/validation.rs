use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_remote_uri(field_name: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "URI cannot be empty".to_string(),
        });
    }

    match Url::parse(uri) {
        Ok(url) => match url.scheme() {
            "s3" if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
            "s3" => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: uri.to_string(),
                reason: "URI has no bucket".to_string(),
            }),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: uri.to_string(),
                reason: format!("Unsupported URI scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: format!("Invalid URI format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = Path::new(file).extension().and_then(|ext| ext.to_str()) {
            if !allowed_set.contains(extension) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// S3 naming rules: 3-63 chars, lowercase letters, digits, dots and hyphens,
/// starting and ending with a letter or digit.
pub fn validate_s3_bucket_name(field_name: &str, bucket: &str) -> Result<()> {
    let re = Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").map_err(|e| {
        EtlError::ConfigError {
            message: format!("bucket name pattern failed to compile: {}", e),
        }
    })?;

    if !re.is_match(bucket) || bucket.contains("..") {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket.to_string(),
            reason: "Not a valid S3 bucket name".to_string(),
        });
    }
    Ok(())
}

/// Release partitions are named `dt=YYYY-MM-DD`.
pub fn validate_release_date(field_name: &str, release: &str) -> Result<()> {
    NaiveDate::parse_from_str(release, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: release.to_string(),
            reason: format!("Expected a YYYY-MM-DD date: {}", e),
        })
}
