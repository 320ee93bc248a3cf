use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Channel identifier -> sample. Absent key means no sample (a gap).
pub type ChannelValues = BTreeMap<String, f64>;

/// One logical time slice of the merged sequence.
///
/// Serializes flat (`{"step": 1.5, "Solar8000/HR": 70.0, ...}`), the shape
/// chart consumers key their x-axis and series on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub step: f64,

    #[serde(flatten)]
    pub values: ChannelValues,
}

impl Row {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            values: ChannelValues::new(),
        }
    }

    pub fn with_values(step: f64, values: ChannelValues) -> Self {
        Self { step, values }
    }

    /// Sample for `channel`, or `None` when the row has a gap there.
    pub fn get(&self, channel: &str) -> Option<f64> {
        self.values.get(channel).copied()
    }

    pub fn has(&self, channel: &str) -> bool {
        self.values.contains_key(channel)
    }

    pub fn set(&mut self, channel: impl Into<String>, value: f64) {
        self.values.insert(channel.into(), value);
    }

    pub fn clear_channel(&mut self, channel: &str) {
        self.values.remove(channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_flat() {
        let mut row = Row::new(1.5);
        row.set("hr", 70.0);

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json, serde_json::json!({"step": 1.5, "hr": 70.0}));
    }

    #[test]
    fn test_missing_channel_is_gap() {
        let row = Row::new(0.5);

        assert_eq!(row.get("hr"), None);
        assert!(!row.has("hr"));
    }
}
