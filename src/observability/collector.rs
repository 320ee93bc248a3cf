use std::collections::HashMap;
use std::sync::Arc;
use super::SessionMetrics;

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub session_id: String,
    pub events_received: u64,
    pub signal_vectors: u64,
    pub predictions: u64,
    pub rejected_events: u64,
    pub rows_evicted: u64,
    pub avg_apply_us: u64,
}

/// Registry of per-session metrics, keyed by session id.
pub struct MetricsCollector {
    metrics: HashMap<String, Arc<SessionMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
        }
    }

    pub fn register(&mut self, session_id: impl Into<String>, metrics: Arc<SessionMetrics>) {
        self.metrics.insert(session_id.into(), metrics);
    }

    pub fn unregister(&mut self, session_id: &str) -> Option<Arc<SessionMetrics>> {
        self.metrics.remove(session_id)
    }

    pub fn snapshot(&self) -> HashMap<String, MetricsSnapshot> {
        self.metrics
            .iter()
            .map(|(id, metrics)| {
                (
                    id.clone(),
                    MetricsSnapshot {
                        session_id: metrics.session_id().to_string(),
                        events_received: metrics.events_received(),
                        signal_vectors: metrics.signal_vectors(),
                        predictions: metrics.predictions(),
                        rejected_events: metrics.rejected_events(),
                        rows_evicted: metrics.rows_evicted(),
                        avg_apply_us: metrics.avg_apply_us(),
                    },
                )
            })
            .collect()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            metrics: self.metrics.clone(),
        }
    }
}
