use crate::config::layout::DataLayout;
use crate::domain::ports::Storage;

/// Creates the data tree. Existing directories are fine; the first failure
/// is logged and reported as `false` so the caller can decide whether to go on.
pub async fn make_directories<S: Storage>(storage: &S, layout: &DataLayout) -> bool {
    for dir in layout.directories() {
        if let Err(e) = storage.create_dir_all(&dir).await {
            tracing::warn!("Could not create directory {}: {}", dir.display(), e);
            return false;
        }
    }
    true
}
