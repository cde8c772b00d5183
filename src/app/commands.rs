use std::io::Write;
use std::sync::Arc;

use crate::chart::{SeriesView, NO_DATA_MESSAGE};
use crate::config::ViewerConfig;
use crate::domain::{date_range, Interval};
use crate::error::Result;
use crate::fetch::StockApi;

use super::clock::Clock;
use super::orchestrator::Orchestrator;

/// One-shot suggestion lookup through the debounced search path.
/// Returns the number of suggestions printed.
pub async fn run_search<A: StockApi>(
    config: ViewerConfig,
    api: Arc<A>,
    query: &str,
    out: &mut impl Write,
) -> Result<usize> {
    let mut orchestrator = Orchestrator::new(config, api);
    orchestrator.on_query_changed(query);
    if !orchestrator.search_pending() {
        return Ok(0);
    }

    let mut started = false;
    loop {
        orchestrator.next_completion().await;
        if orchestrator.state().loading {
            started = true;
        } else if started {
            break;
        }
    }

    let suggestions = &orchestrator.state().suggestions;
    for stock in suggestions {
        writeln!(out, "{}", stock.label())?;
    }
    Ok(suggestions.len())
}

/// One-shot history fetch for `ticker`, printed as `date close` rows plus a summary.
pub async fn run_history<A: StockApi>(
    api: &A,
    clock: &dyn Clock,
    ticker: &str,
    interval: Interval,
    out: &mut impl Write,
) -> Result<()> {
    let range = date_range(interval, clock.today());
    writeln!(
        out,
        "{} {}: {} to {}",
        ticker.to_uppercase(),
        interval,
        range.start_param(),
        range.end_param()
    )?;

    let series = api.history(ticker, range).await?;
    match SeriesView::from_series(series.as_ref()) {
        SeriesView::NothingYet | SeriesView::NoData => writeln!(out, "{NO_DATA_MESSAGE}")?,
        SeriesView::Points(chart) => {
            for point in &chart.points {
                writeln!(out, "{}  {:>10.2}", point.date, point.close)?;
            }
            if let Some(summary) = chart.summary() {
                let pct = summary
                    .change_pct
                    .map(|pct| format!(" ({pct:+.2}%)"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{} sessions • low {:.2} • high {:.2} • change {:+.2}{}",
                    summary.sessions, summary.min_close, summary.max_close, summary.change, pct
                )?;
            }
        }
    }
    Ok(())
}
