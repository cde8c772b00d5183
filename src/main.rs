use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;

use stock_viewer::app::{bootstrap, commands, SystemClock};
use stock_viewer::cli::{Cli, Commands};
use stock_viewer::fetch::HttpStockApi;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.resolve_config()?;
    info!("using backend {}", config.base_url);

    match cli.command() {
        Commands::View => {
            bootstrap::run(config).await?;
        }
        Commands::Search { query } => {
            let api = Arc::new(HttpStockApi::new(&config)?);
            let found = commands::run_search(config, api, &query, &mut io::stdout()).await?;
            if found == 0 {
                println!("No suggestions for \"{query}\".");
            }
        }
        Commands::History { ticker, interval } => {
            let api = HttpStockApi::new(&config)?;
            commands::run_history(&api, &SystemClock, &ticker, interval, &mut io::stdout())
                .await?;
        }
    }

    Ok(())
}

/// Logs go to stderr unless a file is given; the viewer owns the terminal while it runs.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
