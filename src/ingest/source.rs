use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use super::{Delivery, IngestionAdapter, TransportEnvelope};

/// Cadence of the backend producer between rows.
pub const DEFAULT_REPLAY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub delivered: u64,
    pub rejected: u64,
    /// True when a shutdown signal ended the run early.
    pub interrupted: bool,
}

impl SourceReport {
    fn record(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Forwarded => self.delivered += 1,
            Delivery::Rejected(_) => self.rejected += 1,
        }
    }
}

/// Something that pushes transport events into a session.
#[async_trait]
pub trait EventSource: Send {
    /// Pumps events until exhausted or `shutdown` fires.
    ///
    /// Dropping every shutdown sender also stops the source.
    async fn run(
        &mut self,
        adapter: IngestionAdapter,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<SourceReport>;
}

fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown.try_recv(), Err(TryRecvError::Empty))
}

/// Waits `delay`; returns true if shutdown arrived meanwhile.
async fn pause(delay: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
    if delay.is_zero() {
        return shutdown_requested(shutdown);
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => false,
        _ = shutdown.recv() => true,
    }
}

/// In-memory list of envelopes, replayed in order.
pub struct ScriptedSource {
    envelopes: Vec<TransportEnvelope>,
    delay: Duration,
}

impl ScriptedSource {
    pub fn new(envelopes: Vec<TransportEnvelope>) -> Self {
        Self {
            envelopes,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn run(
        &mut self,
        adapter: IngestionAdapter,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<SourceReport> {
        let mut report = SourceReport::default();

        for envelope in &self.envelopes {
            if shutdown_requested(&mut shutdown) {
                report.interrupted = true;
                break;
            }
            report.record(adapter.deliver_envelope(envelope).await?);
            if pause(self.delay, &mut shutdown).await {
                report.interrupted = true;
                break;
            }
        }

        Ok(report)
    }
}

/// Replays a newline-delimited JSON recording of transport envelopes.
pub struct ReplaySource {
    path: PathBuf,
    delay: Duration,
}

impl ReplaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delay: DEFAULT_REPLAY_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl EventSource for ReplaySource {
    async fn run(
        &mut self,
        adapter: IngestionAdapter,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<SourceReport> {
        let file = File::open(&self.path)
            .await
            .with_context(|| format!("Failed to open recording {}", self.path.display()))?;
        let mut lines = BufReader::new(file).lines();
        let mut report = SourceReport::default();
        let mut line_no = 0usize;

        log::info!("Replaying {} every {:?}", self.path.display(), self.delay);

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            if shutdown_requested(&mut shutdown) {
                report.interrupted = true;
                break;
            }

            match serde_json::from_str::<TransportEnvelope>(&line) {
                Ok(envelope) => report.record(adapter.deliver_envelope(&envelope).await?),
                Err(e) => {
                    adapter.reject(&format!("line {}: {}", line_no, e));
                    report.rejected += 1;
                    continue;
                }
            }

            if pause(self.delay, &mut shutdown).await {
                report.interrupted = true;
                break;
            }
        }

        if report.interrupted {
            log::info!("Replay of {} stopped after {} events", self.path.display(), report.delivered);
        }
        Ok(report)
    }
}
