use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::warn;

use crate::config::{load_config, validator, ViewerConfig};
use crate::domain::Interval;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "stock-viewer")]
#[command(about = "Search tickers and chart historical closing prices in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON configuration file; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Quiet period before a suggestion lookup is sent, in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    /// Let a slower, older history response replace a newer one
    #[arg(long, global = true)]
    pub allow_stale: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive viewer (default)
    View,

    /// Print ticker suggestions for a query
    Search {
        query: String,
    },

    /// Print closing prices for a ticker
    History {
        ticker: String,

        /// One of 1M, 3M, 6M, 1Y, 5Y; anything else means 1Y
        #[arg(short, long, default_value = "1Y", value_parser = parse_interval)]
        interval: Interval,
    },
}

/// Interval codes on the command line follow the same fallback as everywhere else: unknown means 1Y.
fn parse_interval(raw: &str) -> std::result::Result<Interval, String> {
    let interval = Interval::from_code_lenient(raw);
    if raw.parse::<Interval>().is_err() {
        warn!("unknown interval {raw:?}, using {interval}");
    }
    Ok(interval)
}

impl Cli {
    /// Load the configuration file (if any) and layer the command-line overrides on top.
    pub fn resolve_config(&self) -> Result<ViewerConfig> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        validator::validate_config(&config)?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ViewerConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if self.allow_stale {
            config.discard_stale_responses = false;
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::View)
    }
}
