use serde::{Deserialize, Serialize};

/// Default quantum added on every received event, in logical seconds.
pub const DEFAULT_STEP_QUANTUM: f64 = 0.5;

/// Rounds a step value to one decimal place.
pub fn round_step(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Logical time index advanced once per received event, regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepClock {
    origin: f64,
    current: f64,
    quantum: f64,
}

impl StepClock {
    pub fn new(quantum: f64) -> Self {
        Self::starting_at(0.0, quantum)
    }

    /// Clock whose next `advance()` returns `origin + quantum`.
    pub fn starting_at(origin: f64, quantum: f64) -> Self {
        let origin = round_step(origin);
        Self {
            origin,
            current: origin,
            quantum,
        }
    }

    /// Adds one quantum and returns the new step.
    ///
    /// The accumulated value is rounded after every addition so repeated
    /// fractional quanta never drift off the one-decimal grid.
    pub fn advance(&mut self) -> f64 {
        self.current = round_step(self.current + self.quantum);
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Rewinds to the origin the clock was created with.
    pub fn reset(&mut self) {
        self.current = self.origin;
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_QUANTUM)
    }
}
