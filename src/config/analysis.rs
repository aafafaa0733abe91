//! Feature-pipeline and prediction configuration

/// Rolling-window lengths for the indicator engine.
///
/// The defaults mirror the windows the model was trained against
/// (14/12/26/9/20/5/10); changing them invalidates the model artifact.
#[derive(Clone, Copy, Debug)]
pub struct IndicatorWindows {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    // Band width in standard deviations
    pub bollinger_width: f64,
    pub sma_period: usize,
    pub momentum_lag: usize,
    pub volatility_period: usize,
}

impl IndicatorWindows {
    /// Longest leading warm-up the windows produce, in rows. Rows before
    /// this index carry at least one undefined feature and get dropped.
    pub fn warmup_rows(&self) -> usize {
        let bollinger = self.bollinger_period.saturating_sub(1);
        let sma = self.sma_period.saturating_sub(1);
        let rsi = self.rsi_period;
        let volatility = self.volatility_period.saturating_sub(1);
        bollinger
            .max(sma)
            .max(rsi)
            .max(volatility)
            .max(self.momentum_lag)
    }
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        ANALYSIS.windows
    }
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    // Minimum fetched rows before we even attempt feature assembly.
    // Below this the request resolves to "insufficient data", not an error.
    pub min_rows_for_prediction: usize,
    pub windows: IndicatorWindows,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    min_rows_for_prediction: 30,

    windows: IndicatorWindows {
        rsi_period: 14,
        macd_fast: 12,
        macd_slow: 26,
        macd_signal: 9,
        bollinger_period: 20,
        bollinger_width: 2.0,
        sma_period: 20,
        momentum_lag: 5,
        volatility_period: 10,
    },
};
