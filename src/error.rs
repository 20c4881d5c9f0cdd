//! Error types used by the simulator lifecycle and the publishing pipeline.
//!
//! This module defines two error enums:
//!
//! - [`StartError`]: errors returned synchronously by [`Simulator::start`](crate::Simulator::start).
//! - [`PublishError`]: errors raised by a [`MessageSink`](crate::MessageSink) publish call.
//!
//! Pipeline-internal failures (serialization, publish) never propagate to the
//! caller: the publisher logs them and moves on. Only `start` reports errors
//! back, because it is the one synchronous entry point with a caller waiting.

use thiserror::Error;

/// # Errors returned by [`Simulator::start`](crate::Simulator::start).
///
/// Both variants are non-fatal and leave the simulator state untouched:
/// a failed `start` spawns nothing and allocates nothing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// A simulation run is already active; stop it before starting another.
    #[error("simulation already running")]
    AlreadyRunning,

    /// The broker sink reports no live connection; connect it first.
    #[error("broker not connected")]
    BrokerNotConnected,
}

impl StartError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use vitalsim::StartError;
    ///
    /// assert_eq!(StartError::AlreadyRunning.as_label(), "already_running");
    /// assert_eq!(StartError::BrokerNotConnected.as_label(), "broker_not_connected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StartError::AlreadyRunning => "already_running",
            StartError::BrokerNotConnected => "broker_not_connected",
        }
    }
}

/// # Errors produced by a broker publish attempt.
///
/// Raised by [`MessageSink::publish`](crate::MessageSink::publish) implementations.
/// The publisher handles these locally: the offending message is dropped with a
/// warning and the pipeline keeps running.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum PublishError {
    /// The broker (or its client) rejected or failed the publish call.
    #[error("publish failed: {reason}")]
    Rejected {
        /// The underlying failure message.
        reason: String,
    },

    /// The client's request path is gone (driver task exited, client dropped).
    #[error("broker client unavailable: {reason}")]
    ClientClosed {
        /// The underlying failure message.
        reason: String,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Rejected { .. } => "publish_rejected",
            PublishError::ClientClosed { .. } => "publish_client_closed",
        }
    }
}
