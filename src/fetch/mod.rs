use futures::future::BoxFuture;

use crate::domain::{DateRange, Stock, StockSeries};
use crate::error::Result;

pub mod client;
pub mod decode;

pub use client::HttpStockApi;
pub use decode::{decode_history, decode_suggestions};

pub const SEARCH_PATH: &str = "/api/stocks/search";
pub const HISTORY_PATH: &str = "/api/stocks/get_data";

/// Backend contract used by the orchestrator. Implementations must be shareable across tasks.
pub trait StockApi: Send + Sync + 'static {
    /// Look up tickers matching `query`, in server order.
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Stock>>>;

    /// Daily records for `ticker` within `range`. `None` means the server answered `null`.
    fn history<'a>(
        &'a self,
        ticker: &'a str,
        range: DateRange,
    ) -> BoxFuture<'a, Result<Option<StockSeries>>>;
}
