use vitalstream::observability::{MetricsCollector, SessionMetrics, SessionMonitor};
use std::sync::Arc;

#[test]
fn test_monitor_report() {
    let mut collector = MetricsCollector::new();

    let m1 = Arc::new(SessionMetrics::new("bed-1"));
    let m2 = Arc::new(SessionMetrics::new("bed-2"));

    m1.record_event_received();
    m1.record_signal_vector();
    m1.record_event_received();
    m1.record_prediction();
    m2.record_event_received();
    m2.record_signal_vector();
    m2.record_rejected();

    collector.register("bed-1", m1);
    collector.register("bed-2", m2);

    let monitor = SessionMonitor::new(collector);
    let report = monitor.generate_report();

    assert!(report.contains("bed-1"));
    assert!(report.contains("bed-2"));
    assert!(report.contains("2 received (1 signal, 1 prediction)"));
    assert!(report.contains("1 event\n"));
}

#[test]
fn test_empty_monitor() {
    let monitor = SessionMonitor::new(MetricsCollector::new());
    assert_eq!(monitor.generate_report(), "No sessions registered");
}

#[test]
fn test_collector_snapshot_and_unregister() {
    let mut collector = MetricsCollector::new();
    let metrics = Arc::new(SessionMetrics::new("bed-1"));
    metrics.record_evicted(3);
    metrics.record_evicted(2);

    collector.register("bed-1", metrics);

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.get("bed-1").unwrap().rows_evicted, 5);

    assert!(collector.unregister("bed-1").is_some());
    assert!(collector.snapshot().is_empty());
}

#[test]
fn test_avg_apply_latency_zero_without_samples() {
    let metrics = SessionMetrics::new("bed-1");
    assert_eq!(metrics.avg_apply_us(), 0);

    let start = metrics.start_apply();
    metrics.finish_apply(start);
    assert!(metrics.avg_apply_us() < 1_000_000);
}
