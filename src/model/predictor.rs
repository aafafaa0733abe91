use crate::domain::Signal;
use crate::features::FeatureFrame;
use crate::model::ModelBundle;
use crate::pipeline::RequestError;

/// A feature frame with one prediction attached per retained row.
#[derive(Debug, Clone)]
pub struct PredictedFrame {
    pub frame: FeatureFrame,
    pub predictions: Vec<Signal>,
}

impl PredictedFrame {
    /// The display signal: prediction of the most recent retained row.
    pub fn latest_signal(&self) -> Option<Signal> {
        self.predictions.last().copied()
    }
}

/// Applies the loaded classifier to assembled feature rows.
///
/// Deterministic given the model and the feature vector; the Sentiment
/// column's randomness upstream is the one documented exception.
pub struct Predictor<'a> {
    bundle: &'a ModelBundle,
}

impl<'a> Predictor<'a> {
    pub fn new(bundle: &'a ModelBundle) -> Self {
        Predictor { bundle }
    }

    pub fn predict(&self, frame: FeatureFrame) -> Result<PredictedFrame, RequestError> {
        if frame.is_empty() {
            return Err(RequestError::Processing(
                "predictor called with an empty feature frame".to_string(),
            ));
        }

        // Resolve every expected column up front, in the model's order.
        let mut columns: Vec<&[f64]> = Vec::with_capacity(self.bundle.feature_names().len());
        for name in self.bundle.feature_names() {
            let column = frame
                .column(name)
                .ok_or_else(|| RequestError::FeatureMismatch(name.clone()))?;
            columns.push(column);
        }

        let mut predictions = Vec::with_capacity(frame.len());
        let mut vector = vec![0.0; columns.len()];
        for row in 0..frame.len() {
            for (slot, column) in vector.iter_mut().zip(&columns) {
                *slot = column[row];
            }
            let label = self.bundle.classify(&vector);
            let signal = Signal::from_label(label).ok_or_else(|| {
                RequestError::Processing(format!(
                    "model '{}' returned unknown label {label}",
                    self.bundle.model_name()
                ))
            })?;
            predictions.push(signal);
        }

        Ok(PredictedFrame { frame, predictions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::LinearSignalModel;

    fn momentum_bundle() -> ModelBundle {
        // BUY when Momentum > 0.05, SELL when < -0.05, HOLD otherwise.
        let model = LinearSignalModel {
            name: "momentum-threshold".to_string(),
            classes: vec![-1, 0, 1],
            weights: vec![vec![0.0, -100.0], vec![0.0, 0.0], vec![0.0, 100.0]],
            intercepts: vec![-5.0, 0.0, -5.0],
        };
        ModelBundle::from_parts(
            Box::new(model),
            vec!["Sentiment".to_string(), "Momentum".to_string()],
        )
    }

    fn frame_with(momentum: &[f64]) -> FeatureFrame {
        let mut frame = FeatureFrame::new("TEST".to_string(), &["Momentum", "Sentiment"]);
        for (i, m) in momentum.iter().enumerate() {
            frame.push_row(i as i64 * 60_000, 100.0, 1_000.0, &[*m, 0.0]);
        }
        frame
    }

    #[test]
    fn test_labels_follow_feature_order_not_frame_order() {
        // The bundle lists Sentiment before Momentum; extraction must honor
        // the bundle's order even though the frame stores Momentum first.
        let bundle = momentum_bundle();
        let predicted = Predictor::new(&bundle)
            .predict(frame_with(&[0.2, -0.2, 0.0]))
            .unwrap();

        assert_eq!(
            predicted.predictions,
            vec![Signal::Buy, Signal::Sell, Signal::Hold]
        );
        assert_eq!(predicted.latest_signal(), Some(Signal::Hold));
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let bundle = momentum_bundle();
        let first = Predictor::new(&bundle)
            .predict(frame_with(&[0.1, -0.3, 0.02]))
            .unwrap();
        let second = Predictor::new(&bundle)
            .predict(frame_with(&[0.1, -0.3, 0.02]))
            .unwrap();
        assert_eq!(first.predictions, second.predictions);
    }

    #[test]
    fn test_unknown_feature_is_a_mismatch() {
        let model = LinearSignalModel {
            name: "bad-schema".to_string(),
            classes: vec![0],
            weights: vec![vec![0.0]],
            intercepts: vec![0.0],
        };
        let bundle = ModelBundle::from_parts(Box::new(model), vec!["NotAColumn".to_string()]);
        let result = Predictor::new(&bundle).predict(frame_with(&[0.1]));
        assert!(matches!(result, Err(RequestError::FeatureMismatch(name)) if name == "NotAColumn"));
    }

    #[test]
    fn test_empty_frame_rejected() {
        let bundle = momentum_bundle();
        let result = Predictor::new(&bundle).predict(frame_with(&[]));
        assert!(matches!(result, Err(RequestError::Processing(_))));
    }
}
