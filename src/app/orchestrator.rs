use std::sync::Arc;

use futures::future::BoxFuture;
use log::{debug, warn};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::config::ViewerConfig;
use crate::debounce::Debouncer;
use crate::domain::{date_range, DateRange, Interval, Stock, StockSeries};
use crate::error::Result;
use crate::fetch::StockApi;

use super::clock::{Clock, SystemClock};
use super::state::{HistoryRequest, ViewerState};

/// Outcome of background work, applied to the state by [`Orchestrator::apply`].
#[derive(Debug)]
pub enum Completion {
    Loading(bool),
    Suggestions {
        query: String,
        result: Result<Vec<Stock>>,
    },
    History {
        request: HistoryRequest,
        result: Result<Option<StockSeries>>,
    },
}

/// Posts `Loading(true)` when created and `Loading(false)` when dropped.
struct LoadingGuard {
    tx: UnboundedSender<Completion>,
}

impl LoadingGuard {
    fn acquire(tx: UnboundedSender<Completion>) -> Self {
        let _ = tx.send(Completion::Loading(true));
        Self { tx }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(Completion::Loading(false));
    }
}

async fn fetch_suggestions<A: StockApi>(
    api: Arc<A>,
    tx: UnboundedSender<Completion>,
    query: String,
) {
    let _loading = LoadingGuard::acquire(tx.clone());
    let result = api.search(&query).await;
    let _ = tx.send(Completion::Suggestions { query, result });
}

/// Owns the viewer state and decides what to fetch and when.
///
/// Fetches run on spawned tasks and report back through a channel; nothing touches
/// [`ViewerState`] until the owner feeds the completions back through `apply`, so the state
/// has a single writer. Must be used from within a tokio runtime.
pub struct Orchestrator<A: StockApi> {
    config: ViewerConfig,
    api: Arc<A>,
    clock: Arc<dyn Clock>,
    state: ViewerState,
    search: Debouncer<String>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    issued: u64,
    mounted: bool,
}

impl<A: StockApi> Orchestrator<A> {
    pub fn new(config: ViewerConfig, api: Arc<A>) -> Self {
        Self::with_clock(config, api, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ViewerConfig, api: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let search_api = Arc::clone(&api);
        let search_tx = tx.clone();
        let search = Debouncer::new(config.debounce(), move |query: String| {
            let fut: BoxFuture<'static, ()> = Box::pin(fetch_suggestions(
                Arc::clone(&search_api),
                search_tx.clone(),
                query,
            ));
            fut
        });

        Self {
            state: ViewerState::new(config.default_stock.clone()),
            config,
            api,
            clock,
            search,
            tx,
            rx,
            issued: 0,
            mounted: false,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Number of history requests issued so far.
    pub fn history_requests_issued(&self) -> u64 {
        self.issued
    }

    /// Initial load of the default stock over the default interval. Runs once.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let ticker = self.config.default_stock.ticker.clone();
        self.request_history(ticker, Interval::default());
    }

    /// Record a keystroke-level change of the search box.
    pub fn on_query_changed(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.config.is_searchable(&value) {
            self.search.trigger(value.clone());
        } else {
            self.state.suggestions.clear();
        }
        self.state.query = value;
    }

    pub fn select_suggestion(&mut self, stock: Stock) {
        let ticker = stock.ticker.clone();
        self.state.query = ticker.to_uppercase();
        self.state.selected = Some(stock);
        self.state.suggestions.clear();
        self.state.interval = Interval::default();
        self.request_history(ticker, Interval::default());
    }

    /// Select the suggestion at `index`; returns the chosen stock when the index exists.
    pub fn select_suggestion_at(&mut self, index: usize) -> Option<Stock> {
        let stock = self.state.suggestions.get(index).cloned()?;
        self.select_suggestion(stock.clone());
        Some(stock)
    }

    /// Switch the interval. Requests are issued even when the interval does not change.
    pub fn change_interval(&mut self, interval: Interval) {
        self.state.interval = interval;
        if let Some(ticker) = self.state.selected.as_ref().map(|s| s.ticker.clone()) {
            self.request_history(ticker, interval);
        }
    }

    fn request_history(&mut self, ticker: String, interval: Interval) {
        self.issued += 1;
        let range: DateRange = date_range(interval, self.clock.today());
        let request = HistoryRequest {
            seq: self.issued,
            ticker,
            interval,
            range,
        };
        debug!(
            "history request #{} for {} ({}: {} to {})",
            request.seq,
            request.ticker,
            request.interval,
            range.start_param(),
            range.end_param()
        );
        self.state.requested = Some(request.clone());

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.history(&request.ticker, request.range).await;
            let _ = tx.send(Completion::History { request, result });
        });
    }

    /// Fold one completion into the state. Returns whether anything visible changed.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Loading(loading) => {
                let changed = self.state.loading != loading;
                self.state.loading = loading;
                changed
            }
            Completion::Suggestions { query, result } => {
                match result {
                    Ok(stocks) => {
                        debug!("{} suggestions for {query:?}", stocks.len());
                        self.state.suggestions = stocks;
                    }
                    Err(err) => {
                        warn!(
                            "Error fetching suggestions for {query:?} ({:?}): {err}",
                            err.kind()
                        );
                        self.state.suggestions.clear();
                    }
                }
                true
            }
            Completion::History { request, result } => match result {
                Ok(series) => {
                    if self.config.discard_stale_responses && request.seq != self.issued {
                        debug!(
                            "discarding stale history #{} for {} ({}); latest is #{}",
                            request.seq, request.ticker, request.interval, self.issued
                        );
                        return false;
                    }
                    self.state.series = series;
                    self.state.displayed = Some(request);
                    true
                }
                Err(err) => {
                    warn!(
                        "Error fetching stock data for {} ({}, {:?}): {err}",
                        request.ticker,
                        request.interval,
                        err.kind()
                    );
                    false
                }
            },
        }
    }

    /// Apply every completion that is ready without waiting. Returns how many were applied.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    self.apply(completion);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Wait for the next completion and apply it.
    pub async fn next_completion(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    /// Whether a suggestion lookup is still waiting for its quiet period.
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::clock::FixedClock;
    use crate::domain::PriceRecord;
    use crate::error::AppError;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct StubApi {
        searches: Mutex<Vec<String>>,
        histories: Mutex<Vec<(String, DateRange)>>,
        fail: bool,
    }

    impl StockApi for StubApi {
        fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Stock>>> {
            Box::pin(async move {
                self.searches.lock().unwrap().push(query.to_string());
                if self.fail {
                    return Err(AppError::message("backend down"));
                }
                Ok(vec![Stock::new(query.to_uppercase(), "Match")])
            })
        }

        fn history<'a>(
            &'a self,
            ticker: &'a str,
            range: DateRange,
        ) -> BoxFuture<'a, Result<Option<StockSeries>>> {
            Box::pin(async move {
                self.histories
                    .lock()
                    .unwrap()
                    .push((ticker.to_string(), range));
                if self.fail {
                    return Err(AppError::message("backend down"));
                }
                let mut series = StockSeries::new();
                series.insert(range.start_param(), PriceRecord::with_close("1.0"));
                Ok(Some(series))
            })
        }
    }

    fn orchestrator(api: Arc<StubApi>) -> Orchestrator<StubApi> {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        Orchestrator::with_clock(ViewerConfig::builtin(), api, Arc::new(FixedClock(today)))
    }

    async fn settle(orch: &mut Orchestrator<StubApi>) {
        tokio::time::sleep(Duration::from_secs(1)).await;
        orch.drain_completions();
    }

    #[tokio::test(start_paused = true)]
    async fn short_queries_clear_without_searching() {
        let api = Arc::new(StubApi::default());
        let mut orch = orchestrator(Arc::clone(&api));
        orch.state.suggestions = vec![Stock::default()];

        orch.on_query_changed("AA");
        settle(&mut orch).await;

        assert!(orch.state().suggestions.is_empty());
        assert_eq!(orch.state().query, "AA");
        assert!(api.searches.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_is_released_after_failure() {
        let api = Arc::new(StubApi {
            fail: true,
            ..StubApi::default()
        });
        let mut orch = orchestrator(Arc::clone(&api));
        orch.state.suggestions = vec![Stock::default()];

        orch.on_query_changed("MSF");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(orch.next_completion().await, "loading should flip on");
        assert!(orch.state().loading);

        settle(&mut orch).await;
        assert!(!orch.state().loading);
        assert!(orch.state().suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn selection_resets_interval_and_fetches_one_year() {
        let api = Arc::new(StubApi::default());
        let mut orch = orchestrator(Arc::clone(&api));
        orch.change_interval(Interval::FiveYears);
        orch.state.suggestions = vec![Stock::new("msft", "Microsoft Corp")];

        let chosen = orch.select_suggestion_at(0).expect("suggestion exists");
        settle(&mut orch).await;

        assert_eq!(chosen.ticker, "msft");
        let state = orch.state();
        assert_eq!(state.query, "MSFT");
        assert_eq!(state.interval, Interval::OneYear);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.selected_name(), Some("Microsoft Corp"));

        let histories = api.histories.lock().unwrap();
        let (_, range) = histories
            .iter()
            .find(|(ticker, _)| ticker == "msft")
            .expect("history requested for the selection");
        assert_eq!(range.start_param(), "2023-03-15");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_history_keeps_previous_series() {
        let api = Arc::new(StubApi {
            fail: true,
            ..StubApi::default()
        });
        let mut orch = orchestrator(Arc::clone(&api));

        orch.mount();
        settle(&mut orch).await;
        assert!(orch.state().series.is_none());

        let mut previous = StockSeries::new();
        previous.insert("2024-01-02".to_string(), PriceRecord::with_close("9"));
        orch.state.series = Some(previous.clone());

        orch.change_interval(Interval::OneMonth);
        settle(&mut orch).await;
        assert_eq!(orch.state().series, Some(previous));
    }

    #[tokio::test(start_paused = true)]
    async fn mount_runs_once() {
        let api = Arc::new(StubApi::default());
        let mut orch = orchestrator(Arc::clone(&api));

        orch.mount();
        orch.mount();
        settle(&mut orch).await;

        assert_eq!(orch.history_requests_issued(), 1);
        assert_eq!(api.histories.lock().unwrap().len(), 1);
        assert!(orch.state().series.is_some());
    }
}
