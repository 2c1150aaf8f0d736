use tokio_util::sync::CancellationToken;
use watch_logging::{watch_debug, watch_info};

use crate::Monitor;

/// Polls until `token` is cancelled and returns the number of completed cycles.
///
/// Cancellation abandons an in-flight poll or sleep without waiting for it.
pub async fn run(monitor: &mut Monitor, token: &CancellationToken) -> u64 {
    let mut cycles: u64 = 0;
    while !token.is_cancelled() {
        let delay = tokio::select! {
            biased;
            _ = token.cancelled() => {
                watch_info!("Cancelled during poll {}", cycles + 1);
                break;
            }
            delay = monitor.poll() => delay,
        };
        cycles += 1;

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                watch_info!("Cancelled while waiting {}s for the next poll", delay.as_secs());
                break;
            }
            _ = tokio::time::sleep(delay) => {
                watch_debug!("woke for poll {}", cycles + 1);
            }
        }
    }
    cycles
}
