use anyhow::{anyhow, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::{decode, StreamEvent, TransportEnvelope};
use crate::observability::SessionMetrics;

/// What became of one delivered transport event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Forwarded,
    /// Decoding failed; the event never reached the session.
    Rejected(String),
}

/// Transport-facing entry point of a session.
///
/// Cloneable; every clone feeds the same ordered input channel.
#[derive(Clone)]
pub struct IngestionAdapter {
    tx: mpsc::Sender<StreamEvent>,
    metrics: Arc<SessionMetrics>,
}

impl IngestionAdapter {
    pub fn new(tx: mpsc::Sender<StreamEvent>, metrics: Arc<SessionMetrics>) -> Self {
        Self { tx, metrics }
    }

    /// Decodes a named transport event and forwards it.
    ///
    /// Errors only when the session no longer accepts events.
    pub async fn deliver(&self, event_name: &str, payload: &Value) -> Result<Delivery> {
        match decode(event_name, payload) {
            Ok(event) => {
                self.send(event).await?;
                Ok(Delivery::Forwarded)
            }
            Err(e) => {
                self.metrics.record_rejected();
                log::warn!("Rejected transport event '{}': {}", event_name, e);
                Ok(Delivery::Rejected(e.to_string()))
            }
        }
    }

    pub async fn deliver_envelope(&self, envelope: &TransportEnvelope) -> Result<Delivery> {
        self.deliver(&envelope.event, &envelope.data).await
    }

    /// Forwards an already-typed event.
    pub async fn send(&self, event: StreamEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| anyhow!("Session is not accepting events"))
    }

    /// Counts an event the transport could not even frame.
    pub fn reject(&self, reason: &str) {
        self.metrics.record_rejected();
        log::warn!("Rejected transport input: {}", reason);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
