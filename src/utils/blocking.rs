use crate::utils::error::Result;

/// Runs CPU-bound codec work on the blocking pool and waits for it.
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}
