use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::{DashboardConfig, ReconnectPolicy};
use crate::core::Row;
use crate::engine::merge::MergeEngine;
use crate::engine::state::{LinkStatus, SessionState};
use crate::ingest::{IngestionAdapter, StreamEvent};
use crate::observability::SessionMetrics;

/// Notification sent to subscribers after every window mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowUpdate {
    /// Step of the new or replaced row; `None` when the window was cleared.
    pub step: Option<f64>,
    pub rows: usize,
}

/// Everything a presentation consumer reads, taken under one lock.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub rows: Vec<Row>,
    pub latest_prediction: Option<f64>,
    pub link: LinkStatus,
}

impl DashboardSnapshot {
    pub fn latest_step(&self) -> Option<f64> {
        self.rows.last().map(|row| row.step)
    }
}

/// Window, clock and link state mutated as one unit.
struct SessionCore {
    engine: MergeEngine,
    link: LinkStatus,
    policy: ReconnectPolicy,
    has_connected: bool,
}

impl SessionCore {
    fn new(config: &DashboardConfig) -> Self {
        Self {
            engine: MergeEngine::new(config),
            link: LinkStatus::Unknown,
            policy: config.reconnect_policy,
            has_connected: false,
        }
    }

    fn apply(&mut self, event: StreamEvent, metrics: &SessionMetrics) -> Option<WindowUpdate> {
        match event {
            StreamEvent::SignalVector(values) => {
                metrics.record_signal_vector();
                let outcome = self.engine.apply_signal_vector(values);
                metrics.record_evicted(outcome.evicted);
                Some(self.update(Some(outcome.step)))
            }
            StreamEvent::Prediction(value) => {
                metrics.record_prediction();
                let outcome = self.engine.apply_prediction(value);
                metrics.record_evicted(outcome.evicted);
                Some(self.update(Some(outcome.step)))
            }
            StreamEvent::Connected => {
                metrics.record_lifecycle_event();
                if self.link.is_connected() {
                    return None;
                }
                let reconnect = self.has_connected;
                self.has_connected = true;
                self.link = LinkStatus::Connected;

                if reconnect && self.policy == ReconnectPolicy::ClearOnReconnect {
                    log::info!("Transport reconnected; clearing window and clock");
                    self.engine.reset();
                    return Some(self.update(None));
                }
                None
            }
            StreamEvent::Disconnected => {
                metrics.record_lifecycle_event();
                self.link = LinkStatus::Disconnected;
                self.engine.forget_prediction();
                None
            }
            StreamEvent::TransportError(message) => {
                metrics.record_lifecycle_event();
                log::warn!("Transport error: {}", message);
                self.link = LinkStatus::Errored { message };
                None
            }
        }
    }

    fn update(&self, step: Option<f64>) -> WindowUpdate {
        WindowUpdate {
            step,
            rows: self.engine.len(),
        }
    }
}

fn lock(core: &Mutex<SessionCore>) -> MutexGuard<'_, SessionCore> {
    core.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read-only handle onto a session's window.
#[derive(Clone)]
pub struct WindowReader {
    core: Arc<Mutex<SessionCore>>,
}

impl WindowReader {
    pub fn current_rows(&self) -> Vec<Row> {
        lock(&self.core).engine.current_rows()
    }

    pub fn latest_prediction(&self) -> Option<f64> {
        lock(&self.core).engine.latest_prediction()
    }

    pub fn link_status(&self) -> LinkStatus {
        lock(&self.core).link.clone()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let core = lock(&self.core);
        DashboardSnapshot {
            rows: core.engine.current_rows(),
            latest_prediction: core.engine.latest_prediction(),
            link: core.link.clone(),
        }
    }
}

/// One dashboard session: a single handler task serializing every event
/// into the merge engine.
pub struct DashboardSession {
    id: String,
    config: DashboardConfig,
    core: Arc<Mutex<SessionCore>>,
    metrics: Arc<SessionMetrics>,
    updates: broadcast::Sender<WindowUpdate>,
    tx: Option<mpsc::Sender<StreamEvent>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<()>>>,
    state: SessionState,
}

impl DashboardSession {
    pub fn new(id: impl Into<String>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let id = id.into();
        let (updates, _) = broadcast::channel(config.capacity.max(16));

        Ok(Self {
            core: Arc::new(Mutex::new(SessionCore::new(&config))),
            metrics: Arc::new(SessionMetrics::new(&id)),
            id,
            config,
            updates,
            tx: None,
            shutdown_tx: None,
            handle: None,
            state: SessionState::Idle,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn metrics(&self) -> Arc<SessionMetrics> {
        self.metrics.clone()
    }

    pub fn reader(&self) -> WindowReader {
        WindowReader {
            core: self.core.clone(),
        }
    }

    /// Receiver of `WindowUpdate`s for every later mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<WindowUpdate> {
        self.updates.subscribe()
    }

    fn transition_to(&mut self, new_state: SessionState) -> Result<()> {
        if !self.state.can_transition_to(&new_state) {
            return Err(anyhow!(
                "Invalid state transition: {} -> {}",
                self.state.name(),
                new_state.name()
            ));
        }
        self.state = new_state;
        Ok(())
    }

    /// Spawns the handler task and returns the adapter feeding it.
    pub async fn start(&mut self) -> Result<IngestionAdapter> {
        self.transition_to(SessionState::Running {
            start_time: Some(std::time::Instant::now()),
        })?;

        let (tx, mut rx) = mpsc::channel::<StreamEvent>(self.config.event_queue_capacity);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let core = self.core.clone();
        let metrics = self.metrics.clone();
        let updates = self.updates.clone();

        let handle = tokio::spawn(async move {
            let handle_event = |event: StreamEvent| {
                metrics.record_event_received();
                let start = metrics.start_apply();
                let update = lock(&core).apply(event, &metrics);
                metrics.finish_apply(start);
                if let Some(update) = update {
                    // No subscribers is fine.
                    let _ = updates.send(update);
                }
            };

            loop {
                tokio::select! {
                    biased;
                    event = rx.recv() => match event {
                        Some(event) => handle_event(event),
                        None => break,
                    },
                    _ = &mut shutdown_rx => {
                        rx.close();
                        while let Some(event) = rx.recv().await {
                            handle_event(event);
                        }
                        break;
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        });

        log::info!(
            "Session {} started (capacity {}, quantum {})",
            self.id,
            self.config.capacity,
            self.config.step_quantum
        );

        let adapter = IngestionAdapter::new(tx.clone(), self.metrics.clone());
        self.tx = Some(tx);
        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        Ok(adapter)
    }

    /// Another adapter onto the running session.
    pub fn adapter(&self) -> Result<IngestionAdapter> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow!("Session {} is not running", self.id))?;
        Ok(IngestionAdapter::new(tx.clone(), self.metrics.clone()))
    }

    /// Stops accepting events, applies the ones already queued, and waits
    /// for the handler to finish. The reader stays valid afterwards.
    pub async fn stop(&mut self) -> Result<()> {
        if let SessionState::Stopped { .. } = self.state {
            return Ok(());
        }

        self.tx = None;
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await??;
        }

        let duration = match &self.state {
            SessionState::Running { start_time } => start_time.map(|t| t.elapsed()),
            _ => None,
        };
        self.transition_to(SessionState::Stopped {
            duration,
            total_events: self.metrics.events_received(),
        })?;

        log::info!(
            "Session {} stopped after {} events",
            self.id,
            self.metrics.events_received()
        );
        Ok(())
    }
}
