use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::pipeline::RequestError;

/// Interface to the pre-trained classifier.
///
/// The artifact is opaque to the rest of the pipeline: an ordered numeric
/// feature vector goes in, a label in {-1, 0, 1} comes out.
pub trait SignalModel: Send + Sync {
    fn classify(&self, features: &[f64]) -> i8;

    /// Model name/id for logging
    fn name(&self) -> &str;
}

/// One-vs-rest linear scorer persisted as JSON: one weight row and one
/// intercept per class, argmax wins. Ties resolve to the earliest class so
/// classification stays deterministic.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinearSignalModel {
    pub name: String,
    pub classes: Vec<i8>,
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearSignalModel {
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.is_empty() {
            bail!("model '{}' declares no classes", self.name);
        }
        if self.weights.len() != self.classes.len() || self.intercepts.len() != self.classes.len()
        {
            bail!(
                "model '{}' has {} classes but {} weight rows / {} intercepts",
                self.name,
                self.classes.len(),
                self.weights.len(),
                self.intercepts.len()
            );
        }
        for (class, row) in self.classes.iter().zip(&self.weights) {
            if row.len() != n_features {
                bail!(
                    "model '{}' class {} has {} weights, expected {}",
                    self.name,
                    class,
                    row.len(),
                    n_features
                );
            }
        }
        Ok(())
    }
}

impl SignalModel for LinearSignalModel {
    fn classify(&self, features: &[f64]) -> i8 {
        let mut best_class = self.classes[0];
        let mut best_score = f64::NEG_INFINITY;
        for ((class, row), intercept) in
            self.classes.iter().zip(&self.weights).zip(&self.intercepts)
        {
            let score: f64 =
                intercept + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>();
            if score > best_score {
                best_score = score;
                best_class = *class;
            }
        }
        best_class
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// ModelBundle: artifact + ordered feature-name list, loaded once at startup
// ============================================================================

/// Immutable pairing of the classifier and the feature order it expects.
/// Built once in `main`, shared via `Arc`, never written afterwards.
pub struct ModelBundle {
    model: Box<dyn SignalModel>,
    feature_names: Vec<String>,
}

impl ModelBundle {
    pub fn load(model_path: &Path, features_path: &Path) -> Result<Self> {
        let model_json = fs::read_to_string(model_path)
            .with_context(|| format!("reading model artifact {}", model_path.display()))?;
        let model: LinearSignalModel = serde_json::from_str(&model_json)
            .with_context(|| format!("parsing model artifact {}", model_path.display()))?;

        let features_json = fs::read_to_string(features_path)
            .with_context(|| format!("reading feature list {}", features_path.display()))?;
        let feature_names: Vec<String> = serde_json::from_str(&features_json)
            .with_context(|| format!("parsing feature list {}", features_path.display()))?;

        if feature_names.is_empty() {
            bail!("feature list {} is empty", features_path.display());
        }
        model.validate(feature_names.len())?;

        Ok(ModelBundle {
            model: Box::new(model),
            feature_names,
        })
    }

    /// For tests and the demo-artifact writer.
    pub fn from_parts(model: Box<dyn SignalModel>, feature_names: Vec<String>) -> Self {
        ModelBundle {
            model,
            feature_names,
        }
    }

    /// Startup integrity check: every feature the model expects must exist
    /// in the assembler's output schema. A mismatch is a configuration
    /// fault, not a per-request condition.
    pub fn check_schema(&self, produced_columns: &[&str]) -> Result<(), RequestError> {
        for name in &self.feature_names {
            if !produced_columns.iter().any(|col| col == name) {
                return Err(RequestError::FeatureMismatch(name.clone()));
            }
        }
        Ok(())
    }

    pub fn classify(&self, features: &[f64]) -> i8 {
        self.model.classify(features)
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> LinearSignalModel {
        LinearSignalModel {
            name: "toy".to_string(),
            classes: vec![-1, 0, 1],
            // Scores keyed entirely off the first feature
            weights: vec![vec![-1.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0]],
            intercepts: vec![0.0, 0.5, 0.0],
        }
    }

    #[test]
    fn test_argmax_classification() {
        let model = toy_model();
        assert_eq!(model.classify(&[2.0, 9.9]), 1);
        assert_eq!(model.classify(&[-2.0, 9.9]), -1);
        assert_eq!(model.classify(&[0.1, 9.9]), 0);
    }

    #[test]
    fn test_validate_rejects_ragged_weights() {
        let mut model = toy_model();
        model.weights[1] = vec![0.0];
        assert!(model.validate(2).is_err());
        assert!(toy_model().validate(2).is_ok());
    }

    #[test]
    fn test_schema_check_flags_unknown_feature() {
        let bundle = ModelBundle::from_parts(
            Box::new(toy_model()),
            vec!["RSI".to_string(), "Sentiment_V2".to_string()],
        );
        let result = bundle.check_schema(&["RSI", "Sentiment"]);
        assert!(matches!(result, Err(RequestError::FeatureMismatch(name)) if name == "Sentiment_V2"));
    }

    #[test]
    fn test_schema_check_accepts_exact_subset() {
        let bundle = ModelBundle::from_parts(
            Box::new(toy_model()),
            vec!["RSI".to_string(), "MACD".to_string()],
        );
        assert!(bundle.check_schema(&["RSI", "MACD", "Sentiment"]).is_ok());
    }
}
