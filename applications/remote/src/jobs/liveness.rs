/// Periodic playback engine probe
use soul_playback::PlaybackController;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Consecutive failures after which the probe logs at error level
pub const SUSTAINED_FAILURES: u32 = 3;

/// Probe the engine every `interval` until `shutdown` is cancelled
///
/// Failures are only logged; the next tick tries again.
pub fn spawn(
    playback: PlaybackController,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut failures: u32 = 0;

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match playback.ping().await {
                Ok(()) => {
                    if failures > 0 {
                        info!(failures, "Playback engine reachable again");
                    } else {
                        debug!("Playback engine alive");
                    }
                    failures = 0;
                }
                Err(e) => {
                    failures += 1;
                    if failures >= SUSTAINED_FAILURES {
                        error!(failures, error = %e, "Playback engine still unreachable");
                    } else {
                        warn!(failures, error = %e, "Playback engine probe failed");
                    }
                }
            }
        }

        debug!("Liveness probe stopped");
    })
}
