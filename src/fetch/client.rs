use futures::future::BoxFuture;
use log::debug;
use reqwest::Client;

use crate::config::ViewerConfig;
use crate::domain::{DateRange, Stock, StockSeries};
use crate::error::{AppError, Context, Result};

use super::{decode_history, decode_suggestions, StockApi, HISTORY_PATH, SEARCH_PATH};

const USER_AGENT: &str = concat!("stock-viewer/", env!("CARGO_PKG_VERSION"));

/// `StockApi` backed by the viewer's HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpStockApi {
    client: Client,
    base_url: String,
}

impl HttpStockApi {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to construct stock API HTTP client")?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, HISTORY_PATH)
    }

    async fn get_text(&self, url: String, params: &[(&str, &str)]) -> Result<String> {
        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        Ok(body)
    }
}

impl StockApi for HttpStockApi {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Stock>>> {
        Box::pin(async move {
            debug!("searching tickers for {query:?}");
            let body = self.get_text(self.search_url(), &[("query", query)]).await?;
            decode_suggestions(&body)
        })
    }

    fn history<'a>(
        &'a self,
        ticker: &'a str,
        range: DateRange,
    ) -> BoxFuture<'a, Result<Option<StockSeries>>> {
        Box::pin(async move {
            let start = range.start_param();
            let end = range.end_param();
            debug!("requesting history for {ticker} from {start} to {end}");
            let body = self
                .get_text(
                    self.history_url(),
                    &[("symbol", ticker), ("start", start.as_str()), ("end", end.as_str())],
                )
                .await?;
            decode_history(&body)
        })
    }
}
