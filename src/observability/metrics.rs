use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters for one dashboard session.
pub struct SessionMetrics {
    session_id: String,
    events_received: AtomicU64,
    signal_vectors: AtomicU64,
    predictions: AtomicU64,
    lifecycle_events: AtomicU64,
    rejected_events: AtomicU64,
    rows_evicted: AtomicU64,
    total_apply_us: AtomicU64,
    apply_samples: AtomicU64,
}

impl SessionMetrics {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            events_received: AtomicU64::new(0),
            signal_vectors: AtomicU64::new(0),
            predictions: AtomicU64::new(0),
            lifecycle_events: AtomicU64::new(0),
            rejected_events: AtomicU64::new(0),
            rows_evicted: AtomicU64::new(0),
            total_apply_us: AtomicU64::new(0),
            apply_samples: AtomicU64::new(0),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn events_received(&self) -> u64 {
        self.events_received.load(Ordering::Relaxed)
    }

    pub fn signal_vectors(&self) -> u64 {
        self.signal_vectors.load(Ordering::Relaxed)
    }

    pub fn predictions(&self) -> u64 {
        self.predictions.load(Ordering::Relaxed)
    }

    pub fn lifecycle_events(&self) -> u64 {
        self.lifecycle_events.load(Ordering::Relaxed)
    }

    pub fn rejected_events(&self) -> u64 {
        self.rejected_events.load(Ordering::Relaxed)
    }

    pub fn rows_evicted(&self) -> u64 {
        self.rows_evicted.load(Ordering::Relaxed)
    }

    pub fn record_event_received(&self) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signal_vector(&self) {
        self.signal_vectors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_prediction(&self) {
        self.predictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lifecycle_event(&self) {
        self.lifecycle_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evicted(&self, rows: usize) {
        self.rows_evicted.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn start_apply(&self) -> Instant {
        Instant::now()
    }

    pub fn finish_apply(&self, start: Instant) {
        let latency_us = start.elapsed().as_micros() as u64;
        self.total_apply_us.fetch_add(latency_us, Ordering::Relaxed);
        self.apply_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_apply_us(&self) -> u64 {
        let samples = self.apply_samples.load(Ordering::Relaxed);
        if samples == 0 {
            return 0;
        }
        self.total_apply_us.load(Ordering::Relaxed) / samples
    }
}
