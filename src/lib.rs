pub mod config;
pub mod control;
pub mod core;
pub mod engine;
pub mod ingest;
pub mod observability;
pub mod present;

pub use config::{DashboardConfig, ReconnectPolicy};
pub use engine::{DashboardSession, WindowReader};
