//! Market-data provider configuration

/// Settings for the intraday chart fetch.
pub struct MarketConfig {
    // Base URL of the Yahoo v8 chart endpoint (ticker is appended)
    pub chart_endpoint: &'static str,
    // Lookback window requested from the provider
    pub lookback_range: &'static str,
    // Sampling interval requested from the provider
    pub sample_interval: &'static str,
    // Providers hang and rate-limit; every request gets a hard deadline
    pub request_timeout_secs: u64,
    // Pre-filled ticker on first launch
    pub default_ticker: &'static str,
}

pub const MARKET: MarketConfig = MarketConfig {
    chart_endpoint: "https://query1.finance.yahoo.com/v8/finance/chart",
    lookback_range: "1d",
    sample_interval: "1m",
    request_timeout_secs: 10,
    default_ticker: "AAPL",
};
