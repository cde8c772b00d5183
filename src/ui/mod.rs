pub mod components;
pub mod styles;
pub mod viewer;

pub use components::TerminalGuard;
pub use viewer::{map_key, run_viewer, ViewerAction, ViewerApp};
