//! # Broker sinks: where serialized messages go.
//!
//! The pipeline talks to the broker through the [`MessageSink`] trait so it
//! can run against anything that accepts bytes on a topic: the bundled
//! MQTT client, or an in-memory double in tests.
//!
//! ## Contents
//! - [`MessageSink`] - the seam between the publisher and the transport
//! - [`MqttSink`] - rumqttc-backed implementation with background driver
//! - [`MqttConfig`] - connection settings for [`MqttSink`]

mod message_sink;
mod mqtt;

pub use message_sink::MessageSink;
pub use mqtt::{MqttConfig, MqttSink};
