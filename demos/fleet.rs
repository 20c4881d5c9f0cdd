//! Five-device fleet publishing vitals to a local MQTT broker.
//!
//! Environment (also read from `.env`):
//! - `MQTT_HOST` / `MQTT_PORT`: broker address (default `localhost:1883`);
//! - `MQTT_USER` / `MQTT_PASSWORD`: optional credentials.
//!
//! Run with a broker up, e.g. `docker run -p 1883:1883 eclipse-mosquitto`,
//! then: `cargo run --example fleet`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::{Instant, interval, sleep, timeout};
use tracing_subscriber::EnvFilter;

use vitalsim::{MessageSink, MqttConfig, MqttSink, Simulator, SimulatorConfig};

const DEVICES: usize = 5;
const PERIOD: Duration = Duration::from_millis(500);
const FRAME: Duration = Duration::from_millis(100);
const RUN_FOR: Duration = Duration::from_secs(10);
const CONNECT_WAIT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sink = Arc::new(MqttSink::new(broker_config()?));
    println!("⏳ waiting for the broker...");
    wait_connected(&sink).await?;
    println!("✅ broker connected");

    let cfg = SimulatorConfig {
        device_count: DEVICES,
        ..SimulatorConfig::default()
    };
    let topic = cfg.topic.clone();
    let sim = Simulator::new(cfg, sink);

    sim.start(PERIOD)?;
    let mut events = sim.events().context("simulation should be active")?;
    println!("🚀 {DEVICES} devices publishing to '{topic}' every {PERIOD:?}");

    // Frame-driven consumption, the way a UI would do it: every frame,
    // drain whatever is pending without blocking, then move on.
    let mut per_device: BTreeMap<u32, u64> = BTreeMap::new();
    let mut frame = interval(FRAME);
    let mut last_summary = Instant::now();
    let run_until = Instant::now() + RUN_FOR;

    'run: while Instant::now() < run_until {
        frame.tick().await;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    *per_device.entry(event.device_id).or_default() += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    println!("⚠️ display lagged, skipped {skipped} events");
                }
                Err(TryRecvError::Closed) => break 'run,
            }
        }
        if last_summary.elapsed() >= Duration::from_secs(2) {
            print_summary(&per_device);
            last_summary = Instant::now();
        }
    }

    println!("🛑 stopping the fleet");
    sim.stop();

    // Pick up what was still in flight; the stream closes once the run
    // has drained.
    let drained = timeout(Duration::from_secs(2), async {
        loop {
            match events.recv().await {
                Ok(event) => {
                    *per_device.entry(event.device_id).or_default() += 1;
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;
    if drained.is_err() {
        println!("⚠️ the run did not drain within 2s");
    }

    print_summary(&per_device);
    println!("👋 fleet idle: {}", !sim.is_active());
    Ok(())
}

/// Broker address and credentials from the environment, with local defaults.
fn broker_config() -> anyhow::Result<MqttConfig> {
    let mut cfg = MqttConfig {
        client_id: "vitalsim-fleet-demo".to_string(),
        ..MqttConfig::default()
    };
    if let Ok(host) = std::env::var("MQTT_HOST") {
        cfg.host = host;
    }
    if let Ok(port) = std::env::var("MQTT_PORT") {
        cfg.port = port.parse().context("MQTT_PORT must be a number")?;
    }
    cfg.username = std::env::var("MQTT_USER").ok();
    cfg.password = std::env::var("MQTT_PASSWORD").ok();
    Ok(cfg)
}

async fn wait_connected(sink: &MqttSink) -> anyhow::Result<()> {
    let deadline = Instant::now() + CONNECT_WAIT;
    while !sink.is_connected() {
        if Instant::now() >= deadline {
            bail!("no broker handshake within {CONNECT_WAIT:?}; is one listening?");
        }
        sleep(Duration::from_millis(100)).await;
    }
    Ok(())
}

fn print_summary(per_device: &BTreeMap<u32, u64>) {
    let total: u64 = per_device.values().sum();
    let by_device = per_device
        .iter()
        .map(|(id, count)| format!("#{id}:{count}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("📈 {total} published [{by_device}]");
}
