//! # Broker abstraction consumed by the publisher.
//!
//! [`MessageSink`] is the seam between the pipeline and the broker transport.
//! The publisher only ever serializes a message and calls
//! [`publish`](MessageSink::publish); connection management, authentication
//! and reconnects live behind the trait.

use async_trait::async_trait;

use crate::error::PublishError;

/// # Destination for serialized telemetry messages.
///
/// Implementations must be cheap to share (`Arc<dyn MessageSink>`) and safe
/// to call from a single publisher task. A `publish` call may block on the
/// transport; the pipeline accepts that as backpressure rather than racing
/// it against cancellation.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use vitalsim::{MessageSink, PublishError};
///
/// /// Swallows everything; handy in tests.
/// struct NullSink;
///
/// #[async_trait]
/// impl MessageSink for NullSink {
///     fn is_connected(&self) -> bool {
///         true
///     }
///
///     async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), PublishError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait MessageSink: Send + Sync + 'static {
    /// Point-in-time connection status.
    ///
    /// [`Simulator::start`](crate::Simulator::start) refuses to launch a run
    /// while this returns `false`. A status flip after launch does not stop a
    /// run; publishes fail and are logged instead.
    fn is_connected(&self) -> bool;

    /// Sends one serialized message to the given topic.
    ///
    /// Errors are reported to the caller; the pipeline's policy is to log
    /// them and continue with the next message.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}
