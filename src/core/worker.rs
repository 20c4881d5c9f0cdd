//! # Worker: pool member turning readings into publishable messages.
//!
//! All workers share one receiving half of the job queue behind an async
//! mutex. A worker holds that lock only long enough to pull a single
//! reading; synthesis and the simulated processing delay happen outside the
//! lock so the pool actually runs in parallel.
//!
//! ## Rules
//! - A reading pulled from the queue is processed exactly once, by exactly
//!   one worker.
//! - The random delay models variable processing cost and de-synchronizes
//!   completions; it is short and bounded, so it does not race cancellation.
//! - Pulls and result pushes race cancellation; a closed and drained job
//!   queue also ends the worker.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::telemetry::{self, DeviceReading, Message};

/// Receiving half of the job queue, shared by the whole pool.
pub(crate) type JobQueue = Arc<Mutex<mpsc::Receiver<DeviceReading>>>;

/// Upper bound (exclusive) of the simulated per-reading processing delay.
const MAX_PROCESS_DELAY_MS: u64 = 200;

/// Pulls readings, synthesizes vitals, and pushes results until the queue
/// closes or the run is cancelled.
pub(crate) async fn run(
    jobs: JobQueue,
    results: mpsc::Sender<Message>,
    cancel: CancellationToken,
) {
    loop {
        let pulled = {
            let mut rx = jobs.lock().await;
            tokio::select! {
                maybe = rx.recv() => maybe,
                _ = cancel.cancelled() => break,
            }
        };
        let Some(reading) = pulled else {
            // Queue closed and fully drained.
            break;
        };

        let message = telemetry::synthesize(reading);

        let delay = rand::rng().random_range(0..MAX_PROCESS_DELAY_MS);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        tokio::select! {
            sent = results.send(message) => {
                if sent.is_err() {
                    break;
                }
            }
            _ = cancel.cancelled() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pool_processes_each_reading_exactly_once() {
        let (job_tx, job_rx) = mpsc::channel(64);
        let (result_tx, mut result_rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();

        for device_id in 1..=20 {
            job_tx
                .send(DeviceReading {
                    device_id,
                    user_id: device_id,
                })
                .await
                .unwrap();
        }
        drop(job_tx);

        let shared: JobQueue = Arc::new(Mutex::new(job_rx));
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(tokio::spawn(run(
                Arc::clone(&shared),
                result_tx.clone(),
                cancel.clone(),
            )));
        }
        drop(result_tx);

        for handle in handles {
            handle.await.unwrap();
        }

        let mut seen = Vec::new();
        while let Some(message) = result_rx.recv().await {
            assert_eq!(message.device_id, message.user_id);
            seen.push(message.device_id);
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_releases_idle_worker() {
        let (_job_tx, job_rx) = mpsc::channel::<DeviceReading>(1);
        let (result_tx, _result_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        let shared: JobQueue = Arc::new(Mutex::new(job_rx));
        let handle = tokio::spawn(run(shared, result_tx, cancel.clone()));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_result_queue_closes() {
        let (job_tx, job_rx) = mpsc::channel(4);
        let (result_tx, result_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        job_tx
            .send(DeviceReading {
                device_id: 9,
                user_id: 9,
            })
            .await
            .unwrap();
        drop(result_rx);

        let shared: JobQueue = Arc::new(Mutex::new(job_rx));
        let handle = tokio::spawn(run(shared, result_tx, cancel));

        handle.await.unwrap();
    }
}
