use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::MARKET;
use crate::data::{FetchIntradaySeries, FetchOutcome, PriceSeries};

// ============================================================================
// Yahoo v8 chart API response (only the fields we actually read)
// ============================================================================

#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

// The API nulls out individual samples inside otherwise valid columns, and
// drops whole columns for some instruments. Both must deserialize cleanly.
#[derive(Deserialize, Debug, Default)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// ============================================================================
// Provider
// ============================================================================

pub struct YahooChartProvider {
    client: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(MARKET.request_timeout_secs))
            .user_agent("signal-scope/0.1")
            .build()
            .context("building HTTP client")?;
        Ok(YahooChartProvider { client })
    }

    fn chart_url(ticker: &str, range: &str, interval: &str) -> String {
        format!(
            "{}/{}?range={}&interval={}",
            MARKET.chart_endpoint,
            ticker.trim().to_uppercase(),
            range,
            interval
        )
    }

    fn outcome_from_response(ticker: &str, response: ChartResponse) -> FetchOutcome {
        if let Some(error) = response.chart.error {
            return FetchOutcome::Failed(format!("{}: {}", error.code, error.description));
        }

        let Some(mut results) = response.chart.result else {
            return FetchOutcome::Empty;
        };
        if results.is_empty() {
            return FetchOutcome::Empty;
        }
        let mut result = results.swap_remove(0);

        if result.timestamp.is_empty() || result.indicators.quote.is_empty() {
            return FetchOutcome::Empty;
        }
        let quote = result.indicators.quote.swap_remove(0);

        let series = PriceSeries::from_columns(
            ticker.trim().to_uppercase(),
            std::mem::take(&mut result.timestamp)
                .into_iter()
                .map(|secs| secs * 1000)
                .collect(),
            quote.open,
            quote.high,
            quote.low,
            quote.close,
            quote.volume,
        );

        if series.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Series(series)
        }
    }
}

#[async_trait]
impl FetchIntradaySeries for YahooChartProvider {
    async fn fetch_intraday(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<FetchOutcome> {
        let url = Self::chart_url(ticker, range, interval);

        // Transport and decode problems are tagged outcomes, not errors: the
        // request pipeline treats them as "insufficient data" with a cause.
        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => return Ok(FetchOutcome::Failed(e.to_string())),
        };

        if !response.status().is_success() {
            return Ok(FetchOutcome::Failed(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        match response.json::<ChartResponse>().await {
            Ok(parsed) => Ok(Self::outcome_from_response(ticker, parsed)),
            Err(e) => Ok(FetchOutcome::Failed(format!("malformed payload: {e}"))),
        }
    }

    fn signature(&self) -> &'static str {
        "Yahoo v8 chart API"
    }
}
