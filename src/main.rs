use anyhow::Result;
use serde_json::json;
use tokio::sync::broadcast;

use vitalstream::core::STROKE_VOLUME;
use vitalstream::ingest::{EventSource, ReplaySource, ScriptedSource, TransportEnvelope};
use vitalstream::observability::{MetricsCollector, SessionMonitor};
use vitalstream::present::{format_step, prediction_banner, render_table, x_domain, DEFAULT_X_SPAN};
use vitalstream::{DashboardConfig, DashboardSession};

/// Synthetic feed: one vitals row per tick, a prediction every other tick.
fn scripted_feed(ticks: usize) -> Vec<TransportEnvelope> {
    let mut envelopes = vec![TransportEnvelope::new("connect", json!(null))];
    for i in 0..ticks {
        let t = i as f64;
        let nibp = if i % 5 == 0 { Some(88.0) } else { None };
        envelopes.push(TransportEnvelope::new(
            "new_signal",
            json!({
                "Solar8000/HR": 72.0 + (t * 0.7).sin() * 4.0,
                "Solar8000/RR_CO2": 14.0,
                "Solar8000/NIBP_MBP": nibp,
                "Solar8000/PLETH_SPO2": 98.0,
                "Solar8000/PLETH_HR": 71.0 + (t * 0.7).cos() * 3.0,
                "EV1000/ART_MBP": 85.0 + t * 0.1,
            }),
        ));
        if i % 2 == 1 {
            envelopes.push(TransportEnvelope::new(
                "new_prediction",
                json!({"value": ((64.0 + t * 0.25) * 100.0).round() / 100.0}),
            ));
        }
    }
    envelopes
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("Vital Stream - Stroke Volume Dashboard Demo");
    println!("===========================================\n");

    let config = DashboardConfig::default();
    let catalog = config.catalog();

    let mut session = DashboardSession::new("demo", config)?;
    let mut collector = MetricsCollector::new();
    collector.register(session.id(), session.metrics());

    let adapter = session.start().await?;
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let report = match std::env::args().nth(1) {
        Some(path) => {
            println!("Replaying recording {}...\n", path);
            ReplaySource::new(path).run(adapter, shutdown_rx).await?
        }
        None => {
            println!("Streaming scripted feed...\n");
            ScriptedSource::new(scripted_feed(80)).run(adapter, shutdown_rx).await?
        }
    };
    drop(shutdown_tx);

    session.stop().await?;

    let snapshot = session.reader().snapshot();
    println!("{}", render_table(&snapshot.rows, &catalog));
    println!("{}", prediction_banner(snapshot.latest_prediction));
    if let Some(latest) = snapshot.latest_step() {
        let (from, to) = x_domain(latest, DEFAULT_X_SPAN);
        println!("Chart domain: {} .. {}", format_step(from), format_step(to));
    }
    let fused = snapshot.rows.iter().filter(|row| row.has(STROKE_VOLUME)).count();
    println!(
        "Rows: {} ({} with {}), delivered {}, rejected {}\n",
        snapshot.rows.len(),
        fused,
        catalog.display_name(STROKE_VOLUME),
        report.delivered,
        report.rejected
    );

    let monitor = SessionMonitor::new(collector);
    println!("{}", monitor.generate_report());

    Ok(())
}
