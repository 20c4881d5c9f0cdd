//! In-memory sink doubles for pipeline tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PublishError;
use crate::sink::MessageSink;

/// Sink that records every accepted publish. Connection status and injected
/// failures are fixed by the constructor.
pub(crate) struct RecordingSink {
    connected: AtomicBool,
    reject_first: AtomicUsize,
    published: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub(crate) fn connected() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(true),
            reject_first: AtomicUsize::new(0),
            published: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn disconnected() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(false),
            reject_first: AtomicUsize::new(0),
            published: Mutex::new(Vec::new()),
        })
    }

    /// Connected sink that rejects the first `n` publish calls, then accepts.
    pub(crate) fn rejecting_first(n: usize) -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(true),
            reject_first: AtomicUsize::new(n),
            published: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn publish_count(&self) -> usize {
        self.published.lock().len()
    }

    pub(crate) fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let remaining = self.reject_first.load(Ordering::Relaxed);
        if remaining > 0 {
            self.reject_first.store(remaining - 1, Ordering::Relaxed);
            return Err(PublishError::Rejected {
                reason: "injected failure".to_string(),
            });
        }
        self.published.lock().push((topic.to_string(), payload));
        Ok(())
    }
}
