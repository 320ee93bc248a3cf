pub mod metrics;
pub mod collector;
pub mod monitor;

pub use metrics::SessionMetrics;
pub use collector::{MetricsCollector, MetricsSnapshot};
pub use monitor::SessionMonitor;
