//! Library index builds
//!
//! The first build is retried until it succeeds, since nothing can be
//! searched before it. After that the library is optionally rebuilt on a
//! fixed interval; a failed periodic rebuild keeps the current generation.
//! Every fetch is bounded by the engine timeout and abandoned on shutdown.

use crate::error::RefreshError;
use soul_core::PlaybackEngine;
use soul_search::{BuildReport, SearchLibrary};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Fetch the engine's track list and publish a new generation
///
/// # Errors
/// Fails when the engine cannot be listed within `timeout` or the build task panics
pub async fn refresh(
    engine: &dyn PlaybackEngine,
    library: &Arc<SearchLibrary>,
    timeout: Duration,
) -> Result<BuildReport, RefreshError> {
    let tracks = tokio::time::timeout(timeout, engine.list_all_tracks())
        .await
        .map_err(|_| RefreshError::Timeout(timeout))??;
    debug!(entries = tracks.len(), "Fetched engine library");

    // Building is CPU-bound
    let library = Arc::clone(library);
    let report = tokio::task::spawn_blocking(move || library.rebuild(&tracks)).await?;
    Ok(report)
}

/// Build the library now, retrying every `retry`, then every `refresh` if non-zero
pub fn spawn(
    engine: Arc<dyn PlaybackEngine>,
    library: Arc<SearchLibrary>,
    timeout: Duration,
    retry: Duration,
    refresh_every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let outcome = tokio::select! {
                () = shutdown.cancelled() => return,
                outcome = refresh(engine.as_ref(), &library, timeout) => outcome,
            };
            match outcome {
                Ok(report) => {
                    info!(
                        indexed = report.indexed,
                        skipped = report.skipped,
                        "Library ready"
                    );
                    break;
                }
                Err(e) => {
                    error!(error = %e, retry_secs = retry.as_secs(), "Initial library build failed");
                }
            }
            tokio::select! {
                () = shutdown.cancelled() => return,
                () = tokio::time::sleep(retry) => {}
            }
        }

        if refresh_every.is_zero() {
            return;
        }

        loop {
            tokio::select! {
                () = shutdown.cancelled() => return,
                () = tokio::time::sleep(refresh_every) => {}
            }
            let outcome = tokio::select! {
                () = shutdown.cancelled() => return,
                outcome = refresh(engine.as_ref(), &library, timeout) => outcome,
            };
            if let Err(e) = outcome {
                warn!(error = %e, "Library refresh failed, keeping current generation");
            }
        }
    })
}
