//! Background execution of long training and test passes

use crate::error::{Result, SpamError};

/// Run a blocking pass on tokio's blocking pool and wait for its result.
///
/// The pass always runs to completion; a panic inside it surfaces as
/// [`SpamError::Worker`].
pub async fn run_blocking<T, F>(pass: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(pass)
        .await
        .map_err(|e| SpamError::Worker(e.to_string()))
}
