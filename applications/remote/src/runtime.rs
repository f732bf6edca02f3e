//! Inbound event loop

use crate::commands;
use crate::gateway::EventSource;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Pause after a failed poll before asking the gateway again
pub const POLL_BACKOFF: Duration = Duration::from_secs(1);

/// Pull events until `shutdown` is cancelled, one handler task per event
///
/// Handlers run concurrently, so a slow engine call never holds up the next
/// event. Gateway failures are logged and retried after [`POLL_BACKOFF`].
pub async fn run_event_loop(
    source: Arc<dyn EventSource>,
    state: AppState,
    shutdown: CancellationToken,
) {
    info!("Event loop started");

    loop {
        let batch = tokio::select! {
            () = shutdown.cancelled() => break,
            batch = source.next_batch() => batch,
        };

        match batch {
            Ok(events) => {
                if !events.is_empty() {
                    debug!(count = events.len(), "Received events");
                }
                for event in events {
                    let state = state.clone();
                    tokio::spawn(async move {
                        commands::dispatch(&state, event).await;
                    });
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch events, backing off");
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    () = tokio::time::sleep(POLL_BACKOFF) => {}
                }
            }
        }
    }

    info!("Event loop stopped");
}
