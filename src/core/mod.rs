pub mod channel;
pub mod clock;
pub mod row;

pub use channel::{default_channels, ChannelCatalog, ChannelSpec, STROKE_VOLUME};
pub use clock::{round_step, StepClock, DEFAULT_STEP_QUANTUM};
pub use row::{ChannelValues, Row};
