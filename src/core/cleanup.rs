//! # Cleanup: ordered teardown of a cancelled run.
//!
//! Spawned once per run, this task sleeps on the cancellation token and then
//! drains the pipeline stage by stage, strictly upstream first:
//!
//! ```text
//! cancel ──► join producers ──► job queue closes (last sender dropped)
//!                 │
//!                 ▼
//!            join workers ────► result queue closes (last sender dropped)
//!                 │
//!                 ▼
//!            join publisher ──► event stream closes with the run state
//! ```
//!
//! ## Rules
//! - Producers go first so no new readings enter a draining queue.
//! - Queue closure is a side effect of joining: each stage owns the only
//!   senders of its downstream queue, so the queue closes when the stage's
//!   last task is gone.
//! - The run state is cleared only if this is still the latest run; a
//!   restart that happened mid-drain is left untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::simulator::SimState;

/// Waits for cancellation, then drains the run and releases its state.
pub(crate) async fn run(
    run_id: u64,
    cancel: CancellationToken,
    mut producers: JoinSet<()>,
    mut workers: JoinSet<()>,
    mut publisher: JoinSet<()>,
    state: Arc<Mutex<SimState>>,
) {
    cancel.cancelled().await;

    join_stage(&mut producers, "producer").await;
    join_stage(&mut workers, "worker").await;
    join_stage(&mut publisher, "publisher").await;

    {
        let mut st = state.lock();
        if st.run_id == run_id {
            st.active = false;
            st.cancel = None;
            st.notifier = None;
        }
    }

    info!(run = run_id, "simulation drained to idle");
}

/// Joins every task of one stage, logging tasks that ended abnormally.
async fn join_stage(stage: &mut JoinSet<()>, name: &str) {
    while let Some(joined) = stage.join_next().await {
        if let Err(err) = joined {
            warn!(stage = name, error = %err, "stage task ended abnormally");
        }
    }
    debug!(stage = name, "stage drained");
}
