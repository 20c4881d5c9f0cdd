//! # Publisher: single fan-in stage draining results to the broker.
//!
//! One publisher per run pulls finished messages off the result queue,
//! serializes them, and hands them to the sink. After every accepted publish
//! it emits a [`PublishEvent`] so observers can watch the run without
//! touching the broker.
//!
//! ## Rules
//! - A message that fails to serialize or publish is logged and dropped;
//!   one bad message or a broker hiccup never stalls the run.
//! - Exactly one event is emitted per accepted publish, in publish order.
//! - The pull races cancellation; a closed and drained result queue also
//!   ends the stage.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::events::{Notifier, PublishEvent};
use crate::sink::MessageSink;
use crate::telemetry::Message;

/// Drains results into the sink until the queue closes or the run is
/// cancelled.
pub(crate) async fn run(
    mut results: mpsc::Receiver<Message>,
    sink: Arc<dyn MessageSink>,
    topic: String,
    notifier: Notifier,
    cancel: CancellationToken,
) {
    loop {
        let message = tokio::select! {
            maybe = results.recv() => match maybe {
                Some(message) => message,
                None => break,
            },
            _ = cancel.cancelled() => break,
        };

        let payload = match serde_json::to_vec(&message) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(device = message.device_id, error = %err, "dropping unserializable message");
                continue;
            }
        };

        if let Err(err) = sink.publish(&topic, payload).await {
            warn!(device = message.device_id, error = %err, "publish failed, dropping message");
            continue;
        }

        debug!(device = message.device_id, "published");
        notifier.notify(PublishEvent {
            device_id: message.device_id,
        });
    }
}
