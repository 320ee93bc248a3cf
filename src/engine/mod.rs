pub mod merge;
pub mod session;
pub mod state;
pub mod window;

pub use merge::{MergeEngine, MergeOutcome};
pub use session::{DashboardSession, DashboardSnapshot, WindowReader, WindowUpdate};
pub use state::{LinkStatus, SessionState};
pub use window::WindowStore;
