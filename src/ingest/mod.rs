pub mod adapter;
pub mod event;
pub mod source;

pub use adapter::{Delivery, IngestionAdapter};
pub use event::{decode, StreamEvent, TransportEnvelope};
pub use source::{EventSource, ReplaySource, ScriptedSource, SourceReport, DEFAULT_REPLAY_DELAY};
