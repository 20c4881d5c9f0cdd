//! # vitalsim
//!
//! **Vitalsim** is a fleet simulator for wearable vitals telemetry.
//!
//! It drives a configurable number of virtual devices through a bounded
//! concurrent pipeline and publishes synthetic vitals (heart rates, oxygen
//! saturation, movement, temperature) to an MQTT broker as JSON. The crate
//! is designed as a building block for demos, load generators, and
//! integration benches of telemetry backends.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  producer #1 │   │  producer #2 │   │  producer #N │   (1 per device,
//! │ (tick/period)│   │ (tick/period)│   │ (tick/period)│    DeviceReading)
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!              job queue (bounded, backpressure)
//!                           │
//!        ┌──────────────────┼──────────────────┐
//!        ▼                  ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   worker #1  │   │   worker #2  │   │   worker #M  │   (pool, clamped
//! │ (synthesize) │   │ (synthesize) │   │ (synthesize) │    to [4, 500])
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!              result queue (bounded, Message)
//!                           │
//!                           ▼
//!                  ┌─────────────────┐
//!                  │    publisher    │ ──► MessageSink (MQTT, JSON payload)
//!                  └────────┬────────┘
//!                           ▼
//!              Notifier (broadcast PublishEvent)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Simulator::start(period)
//!   ├─► reject if a run is active (AlreadyRunning)
//!   ├─► reject if the sink reports no broker (BrokerNotConnected)
//!   └─► spawn workers, publisher, producers, cleanup; mark active
//!
//! Simulator::stop()
//!   ├─► mark inactive immediately, cancel the run token
//!   └─► cleanup drains in the background:
//!         join producers ─► job queue closes
//!         join workers   ─► result queue closes
//!         join publisher ─► event stream closes, state released
//! ```
//!
//! ## Features
//! | Area          | Description                                                  | Key types / traits                  |
//! |---------------|--------------------------------------------------------------|-------------------------------------|
//! | **Lifecycle** | Start, stop, and observe a fleet run.                        | [`Simulator`]                       |
//! | **Telemetry** | Synthetic vitals and the JSON wire form.                     | [`Message`], [`synthesize`]         |
//! | **Sinks**     | Broker abstraction and the bundled MQTT client.              | [`MessageSink`], [`MqttSink`]       |
//! | **Events**    | Per-publish notifications for GUIs and meters.               | [`Notifier`], [`PublishEvent`]      |
//! | **Errors**    | Typed errors for lifecycle and publishing.                   | [`StartError`], [`PublishError`]    |
//! | **Config**    | Fleet size, topic, and queue capacities.                     | [`SimulatorConfig`]                 |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vitalsim::{MessageSink, MqttConfig, MqttSink, Simulator, SimulatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(MqttSink::new(MqttConfig::default()));
//!     while !sink.is_connected() {
//!         tokio::time::sleep(Duration::from_millis(100)).await;
//!     }
//!
//!     let sim = Simulator::new(SimulatorConfig::default(), sink);
//!     sim.start(Duration::from_secs(1))?;
//!
//!     let mut events = sim.events().ok_or("no active run")?;
//!     for _ in 0..10 {
//!         if let Ok(event) = events.recv().await {
//!             println!("device {} published", event.device_id);
//!         }
//!     }
//!
//!     sim.stop();
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod sink;
mod telemetry;

// ---- Public re-exports ----

pub use config::{MAX_WORKERS, MIN_WORKERS, SimulatorConfig};
pub use core::Simulator;
pub use error::{PublishError, StartError};
pub use events::{Notifier, PublishEvent};
pub use sink::{MessageSink, MqttConfig, MqttSink};
pub use telemetry::{DeviceReading, Message, synthesize};
