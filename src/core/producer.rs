//! # Device producer: one periodic emission task per simulated device.
//!
//! Every tick the producer builds a [`DeviceReading`] for its own device and
//! pushes it onto the job queue. A full queue blocks the push, which is the
//! pipeline's backpressure path: emission slows down to whatever the worker
//! pool can absorb.
//!
//! ## Rules
//! - The first tick fires one full period after launch, not immediately.
//! - Ticks missed while blocked on a full queue are skipped, never bursted.
//! - Both the tick wait and the push race cancellation, so a producer can
//!   never outlive a stop request by more than its current await.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::telemetry::DeviceReading;

/// Emits one reading per period until cancelled or the queue closes.
pub(crate) async fn run(
    device_id: u32,
    user_id: u32,
    period: Duration,
    jobs: mpsc::Sender<DeviceReading>,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reading = DeviceReading { device_id, user_id };
                tokio::select! {
                    sent = jobs.send(reading) => {
                        if sent.is_err() {
                            // Queue closed under us; nothing left to feed.
                            break;
                        }
                    }
                    _ = cancel.cancelled() => break,
                }
            }
            _ = cancel.cancelled() => break,
        }
    }

    debug!(device = device_id, "producer exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_emits_one_reading_per_tick() {
        let (tx, mut rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            7,
            7,
            Duration::from_secs(1),
            tx,
            cancel.clone(),
        ));

        for _ in 0..3 {
            let reading = rx.recv().await.expect("producer should emit");
            assert_eq!(reading.device_id, 7);
            assert_eq!(reading.user_id, 7);
        }

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_reading_waits_one_full_period() {
        let (tx, mut rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let period = Duration::from_secs(5);
        let started = Instant::now();
        let handle = tokio::spawn(run(1, 1, period, tx, cancel.clone()));

        rx.recv().await.expect("producer should emit");
        assert!(started.elapsed() >= period);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_unblocks_push_on_full_queue() {
        let (tx, mut rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            2,
            2,
            Duration::from_millis(10),
            tx,
            cancel.clone(),
        ));

        // First reading fills the queue; keep the receiver open but idle so
        // the next push blocks.
        let first = rx.recv().await.expect("producer should emit");
        assert_eq!(first.device_id, 2);
        tokio::time::sleep(Duration::from_millis(100)).await;

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_queue_closes() {
        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(3, 3, Duration::from_millis(10), tx, cancel));

        drop(rx);
        handle.await.unwrap();
    }
}
