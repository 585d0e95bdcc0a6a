use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Sibling path a file is written to before being renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn full_path(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(self.full_path(path)).await.unwrap_or(false)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    /// Writes to `<name>.tmp` and renames over the target, so the target path
    /// only ever holds a complete file.
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let staging = staging_path(&full_path);
        let written = match fs::write(&staging, data).await {
            Ok(()) => fs::rename(&staging, &full_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(self.full_path(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parents_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("data/converted/places/places-00000.csv");

        assert!(!storage.exists(path).await);
        storage.write_file(path, b"id\n1\n").await.unwrap();
        assert!(storage.exists(path).await);
        assert_eq!(storage.read_file(path).await.unwrap(), b"id\n1\n");
        assert_eq!(storage.full_path(path), dir.path().join(path));
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("data/foursquare.csv");

        storage.write_file(path, b"id\n1\n2\n").await.unwrap();
        storage.write_file(path, b"id\n3\n").await.unwrap();

        assert_eq!(storage.read_file(path).await.unwrap(), b"id\n3\n");
        assert!(!dir.path().join("data/foursquare.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_target_absent() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("data/converted/places/places-00001.csv");
        // A directory in the staging spot makes the write itself fail.
        std::fs::create_dir_all(dir.path().join("data/converted/places/places-00001.csv.tmp"))
            .unwrap();

        assert!(storage.write_file(path, b"id\n1\n").await.is_err());
        assert!(!storage.exists(path).await);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("data/foursquare.csv");
        storage.write_file(path, b"id\n1\n2\n").await.unwrap();
        std::fs::create_dir(dir.path().join("data/foursquare.csv.tmp")).unwrap();

        assert!(storage.write_file(path, b"id\n").await.is_err());
        assert_eq!(storage.read_file(path).await.unwrap(), b"id\n1\n2\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let err = storage.read_file(Path::new("missing.csv")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::EtlError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound
        ));
    }
}
