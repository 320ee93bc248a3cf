use crate::config::DashboardConfig;
use crate::core::{ChannelValues, Row, StepClock};
use crate::engine::WindowStore;

/// Result of folding one event into the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    /// Step stamped on the new or replaced row.
    pub step: f64,

    /// True when the last row was replaced instead of a row being appended.
    pub fused: bool,

    /// Rows dropped from the front by this mutation.
    pub evicted: usize,
}

/// Turns signal-vector and prediction events into window mutations.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    clock: StepClock,
    window: WindowStore,
    prediction_channel: String,
    latest_prediction: Option<f64>,
}

impl MergeEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::starting_at(config, 0.0)
    }

    /// Engine whose first event is stamped `origin + step_quantum`.
    pub fn starting_at(config: &DashboardConfig, origin: f64) -> Self {
        Self {
            clock: StepClock::starting_at(origin, config.step_quantum),
            window: WindowStore::new(config.capacity),
            prediction_channel: config.prediction_channel.clone(),
            latest_prediction: None,
        }
    }

    /// Appends a brand-new row holding exactly the given channels.
    pub fn apply_signal_vector(&mut self, values: ChannelValues) -> MergeOutcome {
        let step = self.clock.advance();
        let evicted = self
            .window
            .append_or_replace_last(Row::with_values(step, values), false);

        log::debug!("Appended signal row at step {} ({} evicted)", step, evicted);
        MergeOutcome {
            step,
            fused: false,
            evicted,
        }
    }

    /// Fuses a prediction into a copy of the last row, restamped with a new
    /// step. `None` leaves the prediction channel as a gap.
    pub fn apply_prediction(&mut self, value: Option<f64>) -> MergeOutcome {
        let step = self.clock.advance();
        self.latest_prediction = value;

        let mut merged = self.window.last().cloned().unwrap_or_default();
        merged.step = step;
        match value {
            Some(v) => merged.set(self.prediction_channel.as_str(), v),
            None => merged.clear_channel(&self.prediction_channel),
        }

        let evicted = self.window.append_or_replace_last(merged, true);

        log::debug!("Fused prediction {:?} into row at step {}", value, step);
        MergeOutcome {
            step,
            fused: true,
            evicted,
        }
    }

    pub fn current_rows(&self) -> Vec<Row> {
        self.window.current_rows()
    }

    pub fn latest_prediction(&self) -> Option<f64> {
        self.latest_prediction
    }

    pub fn forget_prediction(&mut self) {
        self.latest_prediction = None;
    }

    /// Empties the window and rewinds the clock.
    pub fn reset(&mut self) {
        self.window.clear();
        self.clock.reset();
    }

    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> ChannelValues {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_signal_vector_appends_new_row() {
        let mut engine = MergeEngine::new(&DashboardConfig::default());

        let outcome = engine.apply_signal_vector(values(&[("hr", 70.0)]));

        assert_eq!(outcome.step, 0.5);
        assert!(!outcome.fused);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_prediction_keeps_other_channels() {
        let mut engine = MergeEngine::new(&DashboardConfig::default());
        engine.apply_signal_vector(values(&[("hr", 70.0), ("spo2", 98.0)]));

        let outcome = engine.apply_prediction(Some(42.0));

        assert!(outcome.fused);
        let rows = engine.current_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].step, 1.0);
        assert_eq!(rows[0].get("hr"), Some(70.0));
        assert_eq!(rows[0].get("spo2"), Some(98.0));
        assert_eq!(rows[0].get("stroke_volume"), Some(42.0));
        assert_eq!(engine.latest_prediction(), Some(42.0));
    }

    #[test]
    fn test_missing_prediction_is_gap() {
        let mut engine = MergeEngine::new(&DashboardConfig::default());
        engine.apply_signal_vector(values(&[("hr", 70.0)]));
        engine.apply_prediction(Some(42.0));

        engine.apply_prediction(None);

        let rows = engine.current_rows();
        assert_eq!(rows[0].step, 1.5);
        assert!(!rows[0].has("stroke_volume"));
        assert_eq!(rows[0].get("hr"), Some(70.0));
        assert_eq!(engine.latest_prediction(), None);
    }

    #[test]
    fn test_reset_clears_window_and_clock() {
        let mut engine = MergeEngine::new(&DashboardConfig::default());
        engine.apply_signal_vector(values(&[("hr", 70.0)]));
        engine.apply_signal_vector(values(&[("hr", 71.0)]));

        engine.reset();

        assert!(engine.is_empty());
        assert_eq!(engine.apply_signal_vector(values(&[("hr", 72.0)])).step, 0.5);
    }
}
