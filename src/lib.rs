pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod ui;

pub use error::{AppError, FailureKind, Result};
