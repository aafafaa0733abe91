use itertools::izip;

use crate::config::IndicatorWindows;
use crate::data::PriceSeries;
use crate::features::frame::FeatureFrame;
use crate::features::indicators;
use crate::features::sentiment::SentimentSource;
use crate::pipeline::RequestError;

/// Turns a raw price series into fully-defined feature rows.
///
/// Contract: validate the close/volume columns, compute every indicator
/// column from copies of the input (the caller's series is never mutated),
/// append the sentiment column, then drop any row containing a non-finite
/// field. An empty result is a valid outcome - the caller reads it as
/// "insufficient data".
pub struct FeatureAssembler {
    windows: IndicatorWindows,
}

impl Default for FeatureAssembler {
    fn default() -> Self {
        FeatureAssembler::new(IndicatorWindows::default())
    }
}

impl FeatureAssembler {
    /// Canonical output schema, in order. The model's feature-name list is
    /// checked against this at startup.
    pub const COLUMN_NAMES: &'static [&'static str] = &[
        "RSI",
        "MACD",
        "BB_high",
        "BB_low",
        "SMA_20",
        "Volume_Change",
        "Momentum",
        "Volatility",
        "Sentiment",
    ];

    pub fn new(windows: IndicatorWindows) -> Self {
        FeatureAssembler { windows }
    }

    pub fn assemble(
        &self,
        series: &PriceSeries,
        sentiment: &dyn SentimentSource,
    ) -> Result<FeatureFrame, RequestError> {
        if PriceSeries::column_entirely_missing(&series.close) {
            return Err(RequestError::InvalidInput(
                "series has no valid close prices".to_string(),
            ));
        }
        if PriceSeries::column_entirely_missing(&series.volume) {
            return Err(RequestError::InvalidInput(
                "series has no valid volume data".to_string(),
            ));
        }

        // Dense copies; missing samples become NaN and propagate through the
        // indicator windows they touch.
        let close: Vec<f64> = series.close.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let volume: Vec<f64> = series
            .volume
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        let w = &self.windows;
        let rsi = indicators::rsi(&close, w.rsi_period);
        let macd = indicators::macd_histogram(&close, w.macd_fast, w.macd_slow, w.macd_signal);
        let (bb_high, bb_low) =
            indicators::bollinger(&close, w.bollinger_period, w.bollinger_width);
        let sma = indicators::sma(&close, w.sma_period);
        let volume_change = indicators::pct_change(&volume, 1);
        let momentum = indicators::pct_change(&close, w.momentum_lag);
        let volatility = indicators::rolling_std(&close, w.volatility_period);
        let sentiment_scores = sentiment.scores(close.len());

        let mut frame = FeatureFrame::new(series.ticker.clone(), Self::COLUMN_NAMES);
        for (ts, c, v, row_rsi, row_macd, row_bbh, row_bbl, row_sma, row_vc, row_mom, row_vol, row_sent) in izip!(
            &series.timestamps_ms,
            &close,
            &volume,
            &rsi,
            &macd,
            &bb_high,
            &bb_low,
            &sma,
            &volume_change,
            &momentum,
            &volatility,
            &sentiment_scores,
        ) {
            let features = [
                *row_rsi, *row_macd, *row_bbh, *row_bbl, *row_sma, *row_vc, *row_mom, *row_vol,
                *row_sent,
            ];
            let complete =
                c.is_finite() && v.is_finite() && features.iter().all(|f| f.is_finite());
            if complete {
                frame.push_row(*ts, *c, *v, &features);
            }
        }

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sentiment::FixedSentiment;

    fn clean_series(len: usize) -> PriceSeries {
        let close: Vec<Option<f64>> = (0..len)
            .map(|i| Some(100.0 + (i as f64 * 0.4).sin() * 2.0))
            .collect();
        let volume: Vec<Option<f64>> = (0..len)
            .map(|i| Some(1_000.0 + (i as f64 * 0.9).cos().abs() * 500.0))
            .collect();
        PriceSeries::from_columns(
            "TEST".to_string(),
            (0..len as i64).map(|i| i * 60_000).collect(),
            close.clone(),
            close.clone(),
            close.clone(),
            close,
            volume,
        )
    }

    #[test]
    fn test_missing_close_column_rejected() {
        let mut series = clean_series(45);
        series.close = vec![None; series.len()];
        let result = FeatureAssembler::default().assemble(&series, &FixedSentiment(0.0));
        assert!(matches!(result, Err(RequestError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_volume_column_rejected() {
        let mut series = clean_series(45);
        series.volume = vec![None; series.len()];
        let result = FeatureAssembler::default().assemble(&series, &FixedSentiment(0.0));
        assert!(matches!(result, Err(RequestError::InvalidInput(_))));
    }

    #[test]
    fn test_warmup_rows_dropped_exactly() {
        // Longest warm-up is the 20-sample SMA/Bollinger window: rows
        // 0..=18 carry an undefined field, row 19 is the first complete one.
        let series = clean_series(45);
        let frame = FeatureAssembler::default()
            .assemble(&series, &FixedSentiment(0.1))
            .unwrap();

        assert_eq!(frame.len(), 45 - 19);
        assert_eq!(frame.timestamps_ms[0], series.timestamps_ms[19]);
    }

    #[test]
    fn test_retained_rows_are_all_finite() {
        let mut series = clean_series(60);
        series.close[30] = None;
        series.volume[40] = None;
        let frame = FeatureAssembler::default()
            .assemble(&series, &FixedSentiment(-0.5))
            .unwrap();

        assert!(frame.len() < 60 - 19);
        for name in FeatureAssembler::COLUMN_NAMES {
            let column = frame.column(name).unwrap();
            assert!(column.iter().all(|v| v.is_finite()), "NaN survived in {name}");
        }
    }

    #[test]
    fn test_single_missing_bar_costs_only_nearby_rows() {
        // Providers null out individual minutes routinely. One missing close
        // must only drop the rows whose windows cover it; everything after
        // the longest affected window (the 20-sample SMA/Bollinger) comes
        // back, so the latest signal stays current.
        let mut series = clean_series(60);
        series.close[25] = None;
        let frame = FeatureAssembler::default()
            .assemble(&series, &FixedSentiment(0.2))
            .unwrap();

        // 19..=24 before the gap, 45..=59 once every window has refilled
        assert_eq!(frame.len(), 6 + 15);
        assert_eq!(frame.timestamps_ms[6], series.timestamps_ms[45]);
        assert_eq!(frame.timestamps_ms.last(), series.timestamps_ms.last());
    }

    #[test]
    fn test_short_series_yields_empty_frame() {
        let series = clean_series(10);
        let frame = FeatureAssembler::default()
            .assemble(&series, &FixedSentiment(0.0))
            .unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_schema_matches_column_names() {
        let series = clean_series(45);
        let frame = FeatureAssembler::default()
            .assemble(&series, &FixedSentiment(0.0))
            .unwrap();
        assert_eq!(frame.column_names(), FeatureAssembler::COLUMN_NAMES);
    }

    #[test]
    fn test_caller_series_not_mutated() {
        let series = clean_series(45);
        let before = series.clone();
        let _ = FeatureAssembler::default().assemble(&series, &FixedSentiment(0.0));
        assert_eq!(series.close, before.close);
        assert_eq!(series.volume, before.volume);
        assert_eq!(series.timestamps_ms, before.timestamps_ms);
    }
}
