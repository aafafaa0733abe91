use serde::{Deserialize, Serialize};

// ============================================================================
// PriceSeries: Raw intraday time series for one ticker
// ============================================================================

/// Column-oriented OHLCV series as returned by the market-data provider.
///
/// Providers return partial data freely, so every value column is optional
/// per sample. Timestamps are guaranteed strictly increasing after
/// construction; validation of the close/volume columns happens in the
/// feature assembler, which owns the invalid-input policy.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PriceSeries {
    pub ticker: String,
    pub timestamps_ms: Vec<i64>,

    // Prices
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,

    // Volume
    pub volume: Vec<Option<f64>>,
}

impl PriceSeries {
    /// Build a series from raw provider columns, dropping any sample whose
    /// timestamp does not strictly increase (duplicate or out-of-order bars
    /// occasionally show up around the session open).
    pub fn from_columns(
        ticker: String,
        timestamps_ms: Vec<i64>,
        open: Vec<Option<f64>>,
        high: Vec<Option<f64>>,
        low: Vec<Option<f64>>,
        close: Vec<Option<f64>>,
        volume: Vec<Option<f64>>,
    ) -> Self {
        let n = timestamps_ms.len();
        let pad = |col: Vec<Option<f64>>| {
            let mut col = col;
            col.resize(n, None);
            col
        };
        let (open, high, low, close, volume) =
            (pad(open), pad(high), pad(low), pad(close), pad(volume));

        let mut series = PriceSeries {
            ticker,
            timestamps_ms: Vec::with_capacity(n),
            open: Vec::with_capacity(n),
            high: Vec::with_capacity(n),
            low: Vec::with_capacity(n),
            close: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };

        let mut last_ts: Option<i64> = None;
        for idx in 0..n {
            let ts = timestamps_ms[idx];
            if let Some(last) = last_ts {
                if ts <= last {
                    continue;
                }
            }
            last_ts = Some(ts);
            series.timestamps_ms.push(ts);
            series.open.push(open[idx]);
            series.high.push(high[idx]);
            series.low.push(low[idx]);
            series.close.push(close[idx]);
            series.volume.push(volume[idx]);
        }

        series
    }

    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    /// True when the column exists in name only: every entry missing.
    pub fn column_entirely_missing(column: &[Option<f64>]) -> bool {
        column.iter().all(|v| v.is_none())
    }
}
