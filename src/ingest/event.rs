use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ChannelValues;

/// Transport event names understood by the decoder.
pub const SIGNAL_EVENT: &str = "new_signal";
pub const PREDICTION_EVENT: &str = "new_prediction";
pub const CONNECT_EVENT: &str = "connect";
pub const DISCONNECT_EVENT: &str = "disconnect";
pub const CONNECT_ERROR_EVENT: &str = "connect_error";

/// One item on the session's ordered input channel.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Raw vitals for any number of channels.
    SignalVector(ChannelValues),
    /// Scalar prediction; `None` when the payload carried no usable number.
    Prediction(Option<f64>),
    Connected,
    Disconnected,
    TransportError(String),
}

/// A named transport event as recorded or pushed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportEnvelope {
    pub event: String,

    #[serde(default)]
    pub data: Value,
}

impl TransportEnvelope {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn decode(&self) -> Result<StreamEvent> {
        decode(&self.event, &self.data)
    }
}

/// Maps a transport event onto a `StreamEvent`.
///
/// Values that are not numbers become gaps. Unknown event names and signal
/// payloads that are not objects are rejected.
pub fn decode(event_name: &str, payload: &Value) -> Result<StreamEvent> {
    match event_name {
        SIGNAL_EVENT => {
            let fields = payload
                .as_object()
                .ok_or_else(|| anyhow!("Signal payload must be an object, got {}", payload))?;

            // The step clock owns `step`; an incoming one is ignored.
            let values: ChannelValues = fields
                .iter()
                .filter(|(channel, _)| channel.as_str() != "step")
                .filter_map(|(channel, value)| value.as_f64().map(|v| (channel.clone(), v)))
                .collect();
            Ok(StreamEvent::SignalVector(values))
        }
        PREDICTION_EVENT => Ok(StreamEvent::Prediction(
            payload.get("value").and_then(Value::as_f64),
        )),
        CONNECT_EVENT => Ok(StreamEvent::Connected),
        DISCONNECT_EVENT => Ok(StreamEvent::Disconnected),
        CONNECT_ERROR_EVENT => {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| payload.as_str())
                .unwrap_or("connection error");
            Ok(StreamEvent::TransportError(message.to_string()))
        }
        other => bail!("Unknown event kind: {}", other),
    }
}
