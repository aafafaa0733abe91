//! Rolling technical indicators over a close-price (or volume) sequence.
//!
//! Every function returns a vector aligned with its input: one entry per
//! sample, with `f64::NAN` for entries whose window has not filled yet.
//! Missing source values are also NaN. The windowed indicators (SMA,
//! Bollinger, rolling std) go NaN for every window containing the gap; the
//! recursive ones (EMA and the RSI smoothing) skip missing samples and emit
//! NaN only at the affected positions, so one null bar mid-session costs a
//! handful of rows, not the rest of the day. The feature assembler drops
//! non-finite rows afterwards. Nothing here raises an error.

use statrs::statistics::Statistics;

/// Simple moving average over `period` samples.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        out[i] = window.mean();
    }
    out
}

/// Rolling sample standard deviation (the Volatility column).
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period < 2 {
        return out;
    }
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        out[i] = window.std_dev();
    }
    out
}

/// Percent change over a `lag`-sample gap. Serves both Volume_Change
/// (lag 1) and Momentum (lag 5). A zero or missing base yields NaN rather
/// than an infinity, so the row gets dropped instead of polluting the model.
pub fn pct_change(values: &[f64], lag: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if lag == 0 {
        return out;
    }
    for i in lag..values.len() {
        let base = values[i - lag];
        if base != 0.0 {
            out[i] = (values[i] - base) / base;
        }
    }
    out
}

/// Exponential moving average with span `period`, seeded on the first
/// finite sample, so there is no leading warm-up gap. Non-finite samples
/// are skipped: the running average carries across the gap unchanged and
/// only the gap positions themselves read NaN.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;
    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out[i] = next;
        prev = Some(next);
    }
    out
}

/// Wilder's Relative Strength Index, mapped to 0..=100.
///
/// Seeded with the plain average of the first `period` finite gains/losses,
/// then smoothed with factor 1/period. A non-finite bar produces two
/// non-finite diffs; both are skipped, leaving NaN at those positions while
/// the running averages carry across the gap. All-gain windows read 100;
/// perfectly flat windows read 50 (no evidence either way).
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let mut averages: Option<(f64, f64)> = None;
    let mut seed_gain = 0.0;
    let mut seed_loss = 0.0;
    let mut seed_count = 0usize;

    for i in 1..values.len() {
        let diff = values[i] - values[i - 1];
        if !diff.is_finite() {
            continue;
        }
        let gain = diff.max(0.0);
        let loss = (-diff).max(0.0);

        match averages {
            None => {
                seed_gain += gain;
                seed_loss += loss;
                seed_count += 1;
                if seed_count == period {
                    let seeded = (seed_gain / period as f64, seed_loss / period as f64);
                    out[i] = rsi_value(seeded.0, seeded.1);
                    averages = Some(seeded);
                }
            }
            Some((avg_gain, avg_loss)) => {
                let avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
                let avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
                out[i] = rsi_value(avg_gain, avg_loss);
                averages = Some((avg_gain, avg_loss));
            }
        }
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD histogram: the fast/slow EMA spread minus its signal-line EMA.
pub fn macd_histogram(values: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<f64> {
    let ema_fast = ema(values, fast);
    let ema_slow = ema(values, slow);
    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal);
    macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect()
}

/// Bollinger bands: rolling mean ± `width` population standard deviations.
/// Returns (upper band, lower band).
pub fn bollinger(values: &[f64], period: usize, width: f64) -> (Vec<f64>, Vec<f64>) {
    let mut high = vec![f64::NAN; values.len()];
    let mut low = vec![f64::NAN; values.len()];
    if period == 0 {
        return (high, low);
    }
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        let mid = window.mean();
        let dev = window.population_std_dev();
        high[i] = mid + width * dev;
        low[i] = mid - width * dev;
    }
    (high, low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nan_prefix_len(values: &[f64]) -> usize {
        values.iter().take_while(|v| v.is_nan()).count()
    }

    #[test]
    fn test_sma_hand_computed() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(nan_prefix_len(&out), 2);
        assert!((out[2] - 2.0).abs() < 1e-12);
        assert!((out[3] - 3.0).abs() < 1e-12);
        assert!((out[4] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_pct_change_hand_computed() {
        let out = pct_change(&[100.0, 110.0, 121.0], 1);
        assert!(out[0].is_nan());
        assert!((out[1] - 0.1).abs() < 1e-12);
        assert!((out[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_pct_change_zero_base_is_nan() {
        let out = pct_change(&[0.0, 5.0], 1);
        assert!(out[1].is_nan());
    }

    #[test]
    fn test_rolling_std_sample_variance() {
        // Sample std of [1,2,3] is exactly 1.0
        let out = rolling_std(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(nan_prefix_len(&out), 2);
        assert!((out[2] - 1.0).abs() < 1e-12);
        assert!((out[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_warmup_and_bounds() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let out = rsi(&prices, 14);
        assert_eq!(nan_prefix_len(&out), 14);
        for value in &out[14..] {
            assert!((0.0..=100.0).contains(value), "RSI out of bounds: {value}");
        }
    }

    #[test]
    fn test_rsi_all_gains_reads_100() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14);
        for value in &out[14..] {
            assert!((value - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rsi_flat_series_reads_50() {
        let prices = vec![42.0; 30];
        let out = rsi(&prices, 14);
        for value in &out[14..] {
            assert!((value - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let prices = vec![10.0; 50];
        let out = macd_histogram(&prices, 12, 26, 9);
        for value in &out {
            assert!(value.abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_has_no_warmup_gap() {
        let prices: Vec<f64> = (0..40).map(|i| 50.0 + (i as f64 * 0.3).cos()).collect();
        let out = macd_histogram(&prices, 12, 26, 9);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_bollinger_constant_series_collapses() {
        let prices = vec![7.5; 25];
        let (high, low) = bollinger(&prices, 20, 2.0);
        assert_eq!(nan_prefix_len(&high), 19);
        assert!((high[19] - 7.5).abs() < 1e-12);
        assert!((low[19] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_bands_bracket_the_mean() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin() * 3.0).collect();
        let (high, low) = bollinger(&prices, 20, 2.0);
        let mid = sma(&prices, 20);
        for i in 19..prices.len() {
            assert!(high[i] >= mid[i]);
            assert!(low[i] <= mid[i]);
        }
    }

    #[test]
    fn test_nan_input_propagates_not_panics() {
        let mut prices: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        prices[15] = f64::NAN;
        assert!(sma(&prices, 5)[17].is_nan());
        assert!(rolling_std(&prices, 5)[16].is_nan());
        assert!(pct_change(&prices, 1)[15].is_nan());
        assert!(pct_change(&prices, 1)[16].is_nan());

        // The missing bar yields two non-finite diffs; RSI is NaN exactly
        // there and defined again from the next bar on.
        let out = rsi(&prices, 5);
        assert!(out[15].is_nan());
        assert!(out[16].is_nan());
        assert!(out[17..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_ema_carries_across_gap() {
        let mut prices: Vec<f64> = (0..30).map(|i| 20.0 + (i as f64 * 0.5).sin()).collect();
        prices[10] = f64::NAN;
        let out = ema(&prices, 12);

        assert!(out[9].is_finite());
        assert!(out[10].is_nan());
        assert!(out[11..].iter().all(|v| v.is_finite()));

        // The gap sample contributes nothing to the running average
        let alpha = 2.0 / 13.0;
        let expected = alpha * prices[11] + (1.0 - alpha) * out[9];
        assert!((out[11] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_macd_recovers_after_missing_bar() {
        let mut prices: Vec<f64> = (0..390)
            .map(|i| 150.0 + (i as f64 * 0.05).sin() * 2.0)
            .collect();
        prices[25] = f64::NAN;
        let out = macd_histogram(&prices, 12, 26, 9);

        assert!(out[25].is_nan());
        assert!(
            out[26..].iter().all(|v| v.is_finite()),
            "one missing bar must not poison the rest of the session"
        );
    }

    #[test]
    fn test_rsi_recovers_after_missing_bar() {
        let mut prices: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        prices[20] = f64::NAN;
        let out = rsi(&prices, 14);

        assert!(out[20].is_nan());
        assert!(out[21].is_nan());
        for value in &out[22..] {
            assert!(value.is_finite());
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_indicators_bit_for_bit_reproducible() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 250.0 + (i as f64 * 1.3).sin() * 4.0 + (i as f64 * 0.2).cos())
            .collect();

        let first: Vec<u64> = rsi(&prices, 14)
            .into_iter()
            .chain(macd_histogram(&prices, 12, 26, 9))
            .chain(sma(&prices, 20))
            .chain(rolling_std(&prices, 10))
            .map(f64::to_bits)
            .collect();
        let second: Vec<u64> = rsi(&prices, 14)
            .into_iter()
            .chain(macd_histogram(&prices, 12, 26, 9))
            .chain(sma(&prices, 20))
            .chain(rolling_std(&prices, 10))
            .map(f64::to_bits)
            .collect();

        assert_eq!(first, second);
    }
}
