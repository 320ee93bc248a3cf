//! Outbound requests that start and stop the backend's simulated feed.
//!
//! The session never sends these; a host issues them and the resulting
//! events arrive through the ingestion adapter.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Activity,
    Emotion,
}

impl LabelKind {
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Activity => &["exercising", "sitting", "sleeping", "walking"],
            Self::Emotion => &["drowsy", "normal", "relaxed", "stressed_angry"],
        }
    }

    pub fn default_label(&self) -> &'static str {
        self.options()[0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Emotion => "emotion",
        }
    }
}

/// "stressed_angry" -> "Stressed angry"
pub fn display_label(label: &str) -> String {
    let spaced = label.replacen('_', " ", 1);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(rename = "type")]
    pub kind: LabelKind,
    pub label: String,
}

impl SimulationRequest {
    pub fn new(kind: LabelKind, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            bail!("Select a valid label");
        }
        if !kind.options().contains(&label.as_str()) {
            bail!("Unknown {} label '{}'", kind.as_str(), label);
        }
        Ok(Self { kind, label })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    Start(SimulationRequest),
    Stop,
}

impl ControlRequest {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start(_) => "/simulate",
            Self::Stop => "/stop",
        }
    }

    /// JSON body to POST, if the request carries one.
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Start(request) => serde_json::to_value(request).ok(),
            Self::Stop => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_start_request_body() {
        let request = SimulationRequest::new(LabelKind::Emotion, "relaxed").unwrap();
        let control = ControlRequest::Start(request);

        assert_eq!(control.path(), "/simulate");
        assert_eq!(control.body(), Some(json!({"type": "emotion", "label": "relaxed"})));
    }

    #[test]
    fn test_stop_has_no_body() {
        assert_eq!(ControlRequest::Stop.path(), "/stop");
        assert_eq!(ControlRequest::Stop.body(), None);
    }

    #[test]
    fn test_rejects_label_from_other_kind() {
        assert!(SimulationRequest::new(LabelKind::Activity, "drowsy").is_err());
        assert!(SimulationRequest::new(LabelKind::Activity, "").is_err());
    }

    #[test]
    fn test_default_label_and_display() {
        assert_eq!(LabelKind::Activity.default_label(), "exercising");
        assert_eq!(display_label("stressed_angry"), "Stressed angry");
        assert_eq!(display_label("walking"), "Walking");
        assert_eq!(display_label(""), "");
    }
}
