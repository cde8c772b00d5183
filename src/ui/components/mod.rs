pub mod chart;
pub mod intervals;
pub mod search;
pub mod terminal;
pub mod utils;

pub use chart::render_chart_panel;
pub use intervals::render_interval_bar;
pub use search::{render_search_box, render_suggestions};
pub use terminal::TerminalGuard;
