// Market-data retrieval: provider trait plus the Yahoo chart implementation

pub mod series;
pub mod yahoo;

pub use series::PriceSeries;
pub use yahoo::YahooChartProvider;

use anyhow::Result;
use async_trait::async_trait;

/// What a fetch actually produced. Empty results and transport failures are
/// distinct outcomes so the presentation layer can say which one happened,
/// but neither is an error: both resolve to "insufficient data" downstream.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Series(PriceSeries),
    Empty,
    Failed(String),
}

#[async_trait]
pub trait FetchIntradaySeries: Send + Sync {
    /// Fetch an intraday OHLCV series for `ticker` over the given lookback
    /// range at the given sampling interval.
    async fn fetch_intraday(&self, ticker: &str, range: &str, interval: &str)
    -> Result<FetchOutcome>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}
