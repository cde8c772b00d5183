use std::sync::Arc;

use crate::app::Orchestrator;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::fetch::HttpStockApi;
use crate::ui::run_viewer;

/// Entry point used by `main` to wire the HTTP backend into the interactive viewer.
pub async fn run(config: ViewerConfig) -> Result<()> {
    let api = Arc::new(HttpStockApi::new(&config)?);
    let orchestrator = Orchestrator::new(config, api);
    run_viewer(orchestrator).await
}
