//! Publication events: type and broadcast notifier.
//!
//! This module groups the event **data model** and the **notifier** used to
//! tell external observers (a UI, a metrics scraper) that a message reached
//! the broker.
//!
//! ## Contents
//! - [`PublishEvent`] the "one message published" notification payload
//! - [`Notifier`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: the pipeline's publisher task, after each successful
//!   broker publish.
//! - **Consumers**: whoever holds a receiver from
//!   [`Simulator::events`](crate::Simulator::events); delivery is best-effort.

mod event;
mod notifier;

pub use event::PublishEvent;
pub use notifier::Notifier;
