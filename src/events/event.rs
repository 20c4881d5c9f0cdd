//! Notification payload emitted after each successful broker publish.

/// "A message from this device reached the broker."
///
/// Ephemeral by design: produced by the publisher, consumed (or dropped) by
/// whoever reads the notifier, with no ordering or delivery guarantee. The
/// payload is deliberately minimal so observers stay decoupled from the wire
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishEvent {
    /// Device whose message was published.
    pub device_id: u32,
}
