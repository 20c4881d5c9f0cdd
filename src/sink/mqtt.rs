//! # MQTT-backed message sink.
//!
//! [`MqttSink`] wraps a [`rumqttc::AsyncClient`] plus a background driver
//! task that keeps the connection alive:
//!
//! ```text
//! MqttSink::new(cfg)
//!   ├─► AsyncClient ◄── publish(topic, payload)          (from the pipeline)
//!   └─► driver task ──► eventloop.poll() loop
//!            ├─ ConnAck(Success)  → connected = true
//!            ├─ Disconnect        → connected = false
//!            ├─ poll error        → connected = false, log, sleep, retry
//!            └─ requests done     → exit (every client handle dropped)
//! ```
//!
//! rumqttc reconnects on the next `poll()` after an error, so the driver's
//! only reconnect duty is to pause briefly between attempts. The `connected`
//! flag therefore tracks what the broker last told us, not a live probe.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{
    AsyncClient, ConnectReturnCode, ConnectionError, Event, EventLoop, Incoming, MqttOptions, QoS,
};
use tracing::{debug, info, warn};

use crate::error::PublishError;
use crate::sink::MessageSink;

/// Outstanding requests buffered between client handles and the event loop.
const REQUEST_QUEUE_CAP: usize = 10;

/// Pause between reconnect attempts after a poll error.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Connection settings for [`MqttSink`].
#[derive(Clone, Debug)]
pub struct MqttConfig {
    /// Client identifier presented to the broker.
    pub client_id: String,
    /// Broker hostname or IP.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Optional username; paired with `password`.
    pub username: Option<String>,
    /// Optional password; ignored unless `username` is set.
    pub password: Option<String>,
    /// MQTT keep-alive interval.
    pub keep_alive: Duration,
}

impl Default for MqttConfig {
    /// Default configuration:
    ///
    /// - `client_id = "vitalsim"`
    /// - `host = "localhost"`, `port = 1883`
    /// - no credentials
    /// - `keep_alive = 15s`
    fn default() -> Self {
        Self {
            client_id: "vitalsim".to_string(),
            host: "localhost".to_string(),
            port: 1883,
            username: None,
            password: None,
            keep_alive: Duration::from_secs(15),
        }
    }
}

/// rumqttc-backed [`MessageSink`].
///
/// Cloning is cheap; clones share the client and the connection flag.
#[derive(Clone)]
pub struct MqttSink {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
}

impl MqttSink {
    /// Creates the client and spawns its driver task.
    ///
    /// Returns immediately; the connection is established in the background
    /// and [`is_connected`](MessageSink::is_connected) flips to `true` once
    /// the broker acknowledges it. Must be called from within a Tokio
    /// runtime.
    pub fn new(cfg: MqttConfig) -> Self {
        let mut opts = MqttOptions::new(cfg.client_id, cfg.host, cfg.port);
        opts.set_keep_alive(cfg.keep_alive);
        if let (Some(user), Some(pass)) = (&cfg.username, &cfg.password) {
            opts.set_credentials(user.as_str(), pass.as_str());
        }

        let (client, eventloop) = AsyncClient::new(opts, REQUEST_QUEUE_CAP);
        let connected = Arc::new(AtomicBool::new(false));
        tokio::spawn(drive(eventloop, Arc::clone(&connected)));

        Self { client, connected }
    }
}

#[async_trait]
impl MessageSink for MqttSink {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(|e| PublishError::ClientClosed {
                reason: e.to_string(),
            })
    }
}

/// Polls the event loop until every client handle is gone.
async fn drive(mut eventloop: EventLoop, connected: Arc<AtomicBool>) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Incoming::ConnAck(ack))) => {
                if ack.code == ConnectReturnCode::Success {
                    connected.store(true, Ordering::Relaxed);
                    info!("mqtt connected");
                } else {
                    connected.store(false, Ordering::Relaxed);
                    warn!(code = ?ack.code, "mqtt connection refused");
                }
            }
            Ok(Event::Incoming(Incoming::Disconnect)) => {
                connected.store(false, Ordering::Relaxed);
                warn!("mqtt broker sent disconnect");
            }
            Ok(_) => {}
            Err(ConnectionError::RequestsDone) => {
                debug!("mqtt client dropped, driver exiting");
                break;
            }
            Err(e) => {
                connected.store(false, Ordering::Relaxed);
                warn!(error = %e, "mqtt connection error, retrying");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = MqttConfig::default();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 1883);
        assert_eq!(cfg.client_id, "vitalsim");
        assert!(cfg.username.is_none());
        assert_eq!(cfg.keep_alive, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_disconnected_until_broker_acknowledges() {
        // Port 1 is closed; no ConnAck will ever arrive.
        let sink = MqttSink::new(MqttConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..MqttConfig::default()
        });
        assert!(!sink.is_connected());
    }
}
