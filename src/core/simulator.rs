//! # Simulator: lifecycle controller for the vitals pipeline.
//!
//! One [`Simulator`] owns the run state and wires the stages together on
//! every start:
//!
//! ```text
//!  producers (1 per device)          worker pool            publisher
//!  ┌───────────┐   job queue   ┌─────────────────┐  results  ┌────────┐
//!  │ tick,tick ├──────────────►│ synthesize+delay├──────────►│ sink   │
//!  └───────────┘  (bounded)    └─────────────────┘ (bounded) │ +event │
//!                                                            └────────┘
//! ```
//!
//! ## Rules
//! - At most one run is active per simulator; `start` on an active run
//!   fails without touching it.
//! - `stop` flips the simulator inactive immediately and cancels the run;
//!   the stages drain in the background, upstream first.
//! - Runs are numbered. A drain that finishes after a restart recognizes
//!   the newer run and leaves its state alone.
//! - The state lock is synchronous and never held across an await.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{cleanup, producer, publisher, worker};
use crate::config::SimulatorConfig;
use crate::error::StartError;
use crate::events::{Notifier, PublishEvent};
use crate::sink::MessageSink;
use crate::telemetry::{DeviceReading, Message};

/// Mutable run state shared between the simulator handle and the cleanup
/// task of the current run.
pub(crate) struct SimState {
    pub(crate) active: bool,
    pub(crate) run_id: u64,
    pub(crate) cancel: Option<CancellationToken>,
    pub(crate) notifier: Option<Notifier>,
}

impl SimState {
    fn idle() -> Self {
        Self {
            active: false,
            run_id: 0,
            cancel: None,
            notifier: None,
        }
    }
}

/// Fleet simulator driving periodic vitals from every device to the sink.
///
/// The handle is cheap to share: all methods take `&self`, so a `Simulator`
/// can sit behind an `Arc` in a GUI or service and be started and stopped
/// from anywhere.
pub struct Simulator {
    cfg: SimulatorConfig,
    sink: Arc<dyn MessageSink>,
    state: Arc<Mutex<SimState>>,
}

impl Simulator {
    /// Creates an idle simulator over the given sink.
    pub fn new(cfg: SimulatorConfig, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            cfg,
            sink,
            state: Arc::new(Mutex::new(SimState::idle())),
        }
    }

    /// Starts a run emitting one reading per device every `period`.
    ///
    /// Periods below one millisecond are clamped up to one millisecond.
    /// Must be called from within a Tokio runtime; the stage tasks are
    /// spawned onto it.
    ///
    /// # Errors
    ///
    /// - [`StartError::AlreadyRunning`] if a run is active; that run keeps
    ///   going untouched.
    /// - [`StartError::BrokerNotConnected`] if the sink reports no broker
    ///   connection; nothing is spawned.
    pub fn start(&self, period: Duration) -> Result<(), StartError> {
        let period = period.max(Duration::from_millis(1));

        let mut st = self.state.lock();
        if st.active {
            return Err(StartError::AlreadyRunning);
        }
        if !self.sink.is_connected() {
            return Err(StartError::BrokerNotConnected);
        }

        let cancel = CancellationToken::new();
        let notifier = Notifier::new(self.cfg.notifier_capacity_clamped());
        let (job_tx, job_rx) = mpsc::channel(self.cfg.job_capacity_clamped());
        let (result_tx, result_rx) = mpsc::channel(self.cfg.result_capacity_clamped());

        let workers = self.spawn_workers(job_rx, &result_tx, &cancel);
        let publisher = self.spawn_publisher(result_rx, &notifier, &cancel);
        let producers = self.spawn_producers(period, &job_tx, &cancel);

        // The stages now hold the only senders: the job queue closes when
        // the last producer exits, the result queue when the last worker
        // exits.
        drop(job_tx);
        drop(result_tx);

        st.active = true;
        st.run_id += 1;
        st.cancel = Some(cancel.clone());
        st.notifier = Some(notifier);

        tokio::spawn(cleanup::run(
            st.run_id,
            cancel,
            producers,
            workers,
            publisher,
            Arc::clone(&self.state),
        ));

        info!(
            run = st.run_id,
            devices = self.cfg.device_count,
            workers = self.cfg.worker_count(),
            period_ms = period.as_millis() as u64,
            "simulation started"
        );
        Ok(())
    }

    /// Stops the active run, if any.
    ///
    /// The simulator reads as inactive as soon as this returns; the stages
    /// drain in the background and the event stream closes once the drain
    /// completes. Stopping an idle simulator does nothing.
    pub fn stop(&self) {
        let mut st = self.state.lock();
        if !st.active {
            return;
        }
        st.active = false;
        if let Some(cancel) = &st.cancel {
            cancel.cancel();
        }
        info!(run = st.run_id, "simulation stopping");
    }

    /// Whether a run is currently active.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Subscribes to the active run's publish events.
    ///
    /// Returns `None` when idle. The stream delivers one event per accepted
    /// publish, drops the oldest events if the subscriber falls behind, and
    /// closes when the run has fully drained.
    pub fn events(&self) -> Option<broadcast::Receiver<PublishEvent>> {
        let st = self.state.lock();
        if !st.active {
            return None;
        }
        st.notifier.as_ref().map(Notifier::subscribe)
    }

    fn spawn_workers(
        &self,
        job_rx: mpsc::Receiver<DeviceReading>,
        results: &mpsc::Sender<Message>,
        cancel: &CancellationToken,
    ) -> JoinSet<()> {
        let shared: worker::JobQueue = Arc::new(tokio::sync::Mutex::new(job_rx));
        let mut set = JoinSet::new();
        for _ in 0..self.cfg.worker_count() {
            set.spawn(worker::run(
                Arc::clone(&shared),
                results.clone(),
                cancel.clone(),
            ));
        }
        set
    }

    fn spawn_publisher(
        &self,
        results: mpsc::Receiver<Message>,
        notifier: &Notifier,
        cancel: &CancellationToken,
    ) -> JoinSet<()> {
        let mut set = JoinSet::new();
        set.spawn(publisher::run(
            results,
            Arc::clone(&self.sink),
            self.cfg.topic.clone(),
            notifier.clone(),
            cancel.clone(),
        ));
        set
    }

    fn spawn_producers(
        &self,
        period: Duration,
        jobs: &mpsc::Sender<DeviceReading>,
        cancel: &CancellationToken,
    ) -> JoinSet<()> {
        let mut set = JoinSet::new();
        for id in self.cfg.device_ids() {
            set.spawn(producer::run(id, id, period, jobs.clone(), cancel.clone()));
        }
        set
    }
}
