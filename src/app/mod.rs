pub mod bootstrap;
pub mod clock;
pub mod commands;
pub mod orchestrator;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use orchestrator::{Completion, Orchestrator};
pub use state::{HistoryRequest, ViewerState};
