use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Session run states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running {
        #[serde(skip)]
        start_time: Option<Instant>,
    },
    Stopped {
        #[serde(skip)]
        duration: Option<Duration>,
        total_events: u64,
    },
}

impl SessionState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, target),
            (Idle, Running { .. }) |
            (Idle, Stopped { .. }) |
            (Running { .. }, Stopped { .. })
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Running { .. } => "Running",
            Self::Stopped { .. } => "Stopped",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Transport link as seen through lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkStatus {
    /// No lifecycle event seen yet.
    #[default]
    Unknown,
    Connected,
    Disconnected,
    Errored { message: String },
}

impl LinkStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}
