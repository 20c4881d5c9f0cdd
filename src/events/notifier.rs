//! # Best-effort broadcast of publish events.
//!
//! [`Notifier`] is a thin wrapper around [`tokio::sync::broadcast`] that lets
//! the publisher announce successful publishes without ever blocking on a
//! slow observer.
//!
//! ## Architecture
//! ```text
//! Publisher task ──notify()──► Notifier ───► observer 1 (UI poll loop)
//!                          (ring buffer) ──► observer 2 (test harness)
//! ```
//!
//! ## Rules
//! - **Non-blocking notify**: `notify()` never blocks and never fails; with
//!   no receivers the event is simply dropped.
//! - **Bounded capacity**: a single ring buffer stores the most recent events
//!   for all receivers.
//! - **Lag handling**: a receiver that falls behind more than `capacity`
//!   events observes `Lagged(n)` and skips the `n` oldest ones. That is the
//!   drop-on-full behavior observers must tolerate.
//! - **Closure**: when the last `Notifier` clone is dropped (publisher exited
//!   and the simulator cleared its slot), receivers drain what is buffered
//!   and then observe `Closed`. A `Closed` read means "no run is live; stop
//!   polling until a new one starts".

use tokio::sync::broadcast;

use super::event::PublishEvent;

/// Broadcast channel for publish events.
///
/// ### Properties
/// - **Non-blocking**: `notify()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone (internally an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: broadcast::Sender<PublishEvent>,
}

impl Notifier {
    /// Creates a new notifier with the given ring-buffer capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<PublishEvent>(capacity);
        Self { tx }
    }

    /// Announces an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped; this call still returns
    /// immediately.
    pub fn notify(&self, event: PublishEvent) {
        let _ = self.tx.send(event);
    }

    /// Creates a new receiver observing subsequent events.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only sees events sent **after** it subscribed.
    /// - Slow receivers observe `Lagged(n)` and skip missed items.
    pub fn subscribe(&self) -> broadcast::Receiver<PublishEvent> {
        self.tx.subscribe()
    }
}
