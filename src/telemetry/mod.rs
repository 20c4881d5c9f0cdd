//! # Telemetry data model and sensor synthesis.
//!
//! This module provides the data types that flow through the pipeline:
//! - [`DeviceReading`] - a request to sample one device, emitted per tick
//! - [`Message`] - a full vitals sample, the outbound wire entity
//! - [`synthesize`] - pure leaf turning a reading into a message

mod message;
mod reading;
mod sensor;

pub use message::Message;
pub use reading::DeviceReading;
pub use sensor::synthesize;
