use std::fmt;

use crate::config::{ANALYSIS, AnalysisConfig};
use crate::data::FetchOutcome;
use crate::domain::Signal;
use crate::features::{FeatureAssembler, SentimentSource};
use crate::model::{ModelBundle, PredictedFrame, Predictor};

/// Error types for one signal request
#[derive(Debug, Clone)]
pub enum RequestError {
    /// Raw series is missing a required column entirely
    InvalidInput(String),
    /// The model's feature list names a column the assembler never produced.
    /// Configuration fault - also checked at startup, before any request.
    FeatureMismatch(String),
    /// Anything else that went wrong during assembly/prediction
    Processing(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidInput(msg) => write!(f, "Invalid input data: {}", msg),
            RequestError::FeatureMismatch(name) => {
                write!(f, "Model expects feature '{}' which is not produced", name)
            }
            RequestError::Processing(msg) => write!(f, "Processing failed: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

/// Why a request resolved to "insufficient data". The causes are distinct on
/// purpose: a hung provider and a thin pre-market session look identical to
/// the model but should not look identical to the user.
#[derive(Debug, Clone)]
pub enum InsufficientReason {
    FetchEmpty,
    FetchFailed(String),
    TooFewRows(usize),
    NoCompleteRows,
}

impl fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsufficientReason::FetchEmpty => {
                write!(f, "the provider returned no data for this ticker")
            }
            InsufficientReason::FetchFailed(msg) => write!(f, "the data fetch failed ({})", msg),
            InsufficientReason::TooFewRows(rows) => write!(
                f,
                "only {} rows fetched, need at least {}",
                rows, ANALYSIS.min_rows_for_prediction
            ),
            InsufficientReason::NoCompleteRows => {
                write!(f, "no rows survived the indicator warm-up window")
            }
        }
    }
}

/// Result of one signal request.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    Ready {
        predicted: PredictedFrame,
        signal: Signal,
    },
    InsufficientData(InsufficientReason),
}

/// The whole per-request pipeline: tagged fetch outcome in, displayable
/// outcome out. Stateless; the model bundle is the only shared input and it
/// is immutable for the process lifetime.
pub fn run_request(
    fetch: FetchOutcome,
    bundle: &ModelBundle,
    sentiment: &dyn SentimentSource,
    analysis: &AnalysisConfig,
) -> Result<RequestOutcome, RequestError> {
    let series = match fetch {
        FetchOutcome::Series(series) => series,
        FetchOutcome::Empty => {
            return Ok(RequestOutcome::InsufficientData(
                InsufficientReason::FetchEmpty,
            ));
        }
        FetchOutcome::Failed(msg) => {
            return Ok(RequestOutcome::InsufficientData(
                InsufficientReason::FetchFailed(msg),
            ));
        }
    };

    if series.len() < analysis.min_rows_for_prediction {
        return Ok(RequestOutcome::InsufficientData(
            InsufficientReason::TooFewRows(series.len()),
        ));
    }

    log::debug!(
        "assembling features for {} rows (sentiment: {})",
        series.len(),
        sentiment.signature()
    );
    let assembler = FeatureAssembler::new(analysis.windows);
    let frame = assembler.assemble(&series, sentiment)?;
    log::debug!(
        "{} of {} rows survived assembly (warm-up is {} rows)",
        frame.len(),
        series.len(),
        analysis.windows.warmup_rows()
    );
    if frame.is_empty() {
        return Ok(RequestOutcome::InsufficientData(
            InsufficientReason::NoCompleteRows,
        ));
    }

    let predicted = Predictor::new(bundle).predict(frame)?;
    let signal = predicted
        .latest_signal()
        .ok_or_else(|| RequestError::Processing("no prediction produced".to_string()))?;

    Ok(RequestOutcome::Ready { predicted, signal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceSeries;
    use crate::features::FixedSentiment;
    use crate::model::artifact::LinearSignalModel;

    fn hold_bundle() -> ModelBundle {
        let n = FeatureAssembler::COLUMN_NAMES.len();
        let model = LinearSignalModel {
            name: "always-hold".to_string(),
            classes: vec![0],
            weights: vec![vec![0.0; n]],
            intercepts: vec![0.0],
        };
        ModelBundle::from_parts(
            Box::new(model),
            FeatureAssembler::COLUMN_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn clean_series(len: usize) -> PriceSeries {
        let close: Vec<Option<f64>> = (0..len)
            .map(|i| Some(50.0 + (i as f64 * 0.6).sin()))
            .collect();
        let volume: Vec<Option<f64>> = (0..len).map(|i| Some(900.0 + i as f64)).collect();
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
    fn test_empty_fetch_is_insufficient_not_error() {
        let outcome = run_request(
            FetchOutcome::Empty,
            &hold_bundle(),
            &FixedSentiment(0.0),
            &ANALYSIS,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            RequestOutcome::InsufficientData(InsufficientReason::FetchEmpty)
        ));
    }

    #[test]
    fn test_failed_fetch_keeps_its_cause() {
        let outcome = run_request(
            FetchOutcome::Failed("timed out".to_string()),
            &hold_bundle(),
            &FixedSentiment(0.0),
            &ANALYSIS,
        )
        .unwrap();
        match outcome {
            RequestOutcome::InsufficientData(InsufficientReason::FetchFailed(msg)) => {
                assert_eq!(msg, "timed out");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let outcome = run_request(
            FetchOutcome::Series(clean_series(20)),
            &hold_bundle(),
            &FixedSentiment(0.0),
            &ANALYSIS,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            RequestOutcome::InsufficientData(InsufficientReason::TooFewRows(20))
        ));
    }

    #[test]
    fn test_full_pipeline_on_clean_series() {
        let outcome = run_request(
            FetchOutcome::Series(clean_series(45)),
            &hold_bundle(),
            &FixedSentiment(0.3),
            &ANALYSIS,
        )
        .unwrap();
        match outcome {
            RequestOutcome::Ready { predicted, signal } => {
                assert_eq!(predicted.frame.len(), 45 - 19);
                assert_eq!(signal, Signal::Hold);
                assert_eq!(predicted.latest_signal(), Some(Signal::Hold));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_missing_close_surfaces_invalid_input() {
        let mut series = clean_series(45);
        series.close = vec![None; series.len()];
        let result = run_request(
            FetchOutcome::Series(series),
            &hold_bundle(),
            &FixedSentiment(0.0),
            &ANALYSIS,
        );
        assert!(matches!(result, Err(RequestError::InvalidInput(_))));
    }
}
