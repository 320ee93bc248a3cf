use super::MetricsCollector;

pub struct SessionMonitor {
    collector: MetricsCollector,
}

impl SessionMonitor {
    pub fn new(collector: MetricsCollector) -> Self {
        Self { collector }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.collector.snapshot();

        if snapshot.is_empty() {
            return "No sessions registered".to_string();
        }

        let mut ids: Vec<&String> = snapshot.keys().collect();
        ids.sort();

        let mut report = String::from("=== Session Metrics ===\n");

        for id in ids {
            let metrics = &snapshot[id];
            report.push_str(&format!(
                "\n[{}]\n  Events: {} received ({} signal, {} prediction)\n  Rejected: {}\n  Evicted: {} rows\n  Avg Apply: {}μs\n",
                id,
                metrics.events_received,
                metrics.signal_vectors,
                metrics.predictions,
                if metrics.rejected_events > 0 {
                    format!("{} event{}", metrics.rejected_events, if metrics.rejected_events == 1 { "" } else { "s" })
                } else {
                    "0 events".to_string()
                },
                metrics.rows_evicted,
                metrics.avg_apply_us
            ));
        }

        report
    }
}
