use crate::domain::{DateRange, Interval, Stock, StockSeries};

/// A history request as issued by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub seq: u64,
    pub ticker: String,
    pub interval: Interval,
    pub range: DateRange,
}

/// Everything the viewer displays. Mutated only by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub query: String,
    pub suggestions: Vec<Stock>,
    pub loading: bool,
    pub selected: Option<Stock>,
    pub interval: Interval,
    pub series: Option<StockSeries>,
    /// Most recently issued history request.
    pub requested: Option<HistoryRequest>,
    /// Request whose response is currently in `series`.
    pub displayed: Option<HistoryRequest>,
}

impl ViewerState {
    pub fn new(default_stock: Stock) -> Self {
        Self {
            query: default_stock.ticker.clone(),
            suggestions: Vec::new(),
            loading: false,
            selected: Some(default_stock),
            interval: Interval::default(),
            series: None,
            requested: None,
            displayed: None,
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|stock| stock.name.as_str())
    }

    /// The latest request when the chart is not showing its answer, either because it is
    /// still in flight or because it failed and the previous series stayed on screen.
    pub fn outstanding_request(&self) -> Option<&HistoryRequest> {
        let requested = self.requested.as_ref()?;
        match &self.displayed {
            Some(displayed) if displayed.seq == requested.seq => None,
            _ => Some(requested),
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(Stock::default())
    }
}
