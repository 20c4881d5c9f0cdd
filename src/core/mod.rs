//! Pipeline core: orchestration and lifecycle.
//!
//! This module contains the concurrent heart of the simulator. The only
//! public API from this module is [`Simulator`], which owns the run state
//! and drives start, stop, and the background drain.
//!
//! Internal modules:
//! - [`producer`]: one periodic reading-emission task per device;
//! - [`worker`]: pool members turning readings into vitals messages;
//! - [`publisher`]: drains results to the broker and emits publish events;
//! - [`cleanup`]: waits for cancellation, then drains stages upstream-first;
//! - [`simulator`]: lifecycle controller owning the shared run state.

mod cleanup;
mod producer;
mod publisher;
mod simulator;
mod worker;

#[cfg(test)]
pub(crate) mod testkit;

pub use simulator::Simulator;
