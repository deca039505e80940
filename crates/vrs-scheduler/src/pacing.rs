//! Jittered pacing between portal requests.

use std::time::Duration;

use rand::Rng;

use vrs_config::DelayConfig;

/// Sleep for a uniformly random duration inside the configured range.
/// Avoids a fixed polling cadence the portal could trivially detect.
pub async fn random_delay(delays: &DelayConfig) {
    let ms = rand::thread_rng().gen_range(delays.min_ms..=delays.max_ms);
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
