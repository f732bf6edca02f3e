/// Eviction of expired choice sets
use soul_selection::SelectionRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub fn spawn(
    registry: Arc<SelectionRegistry>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; nothing can have expired yet
        ticker.tick().await;

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let evicted = registry.sweep().await;
            if evicted > 0 {
                debug!(evicted, "Swept expired choice sets");
            }
        }
    })
}
