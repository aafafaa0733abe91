use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use signal_scope::features::FeatureAssembler;
use signal_scope::model::LinearSignalModel;

fn main() -> Result<()> {
    build_demo_artifacts()
}

/// Writes a hand-tuned demo classifier plus its feature list into assets/.
/// The weights are heuristics (oversold RSI and positive momentum lean BUY,
/// the mirror leans SELL), good enough to exercise the full pipeline.
fn build_demo_artifacts() -> Result<()> {
    let feature_names: Vec<String> = FeatureAssembler::COLUMN_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect();

    let model = demo_model(feature_names.len());

    let assets_dir = PathBuf::from("assets");
    fs::create_dir_all(&assets_dir)
        .with_context(|| format!("creating {:?}", assets_dir))?;

    let model_path = assets_dir.join("model.json");
    let model_json = serde_json::to_string_pretty(&model)?;
    fs::write(&model_path, model_json).with_context(|| format!("writing {:?}", model_path))?;

    let features_path = assets_dir.join("features.json");
    let features_json = serde_json::to_string_pretty(&feature_names)?;
    fs::write(&features_path, features_json)
        .with_context(|| format!("writing {:?}", features_path))?;

    println!(
        "✅ Demo model '{}' ({} classes, {} features) written to {:?} / {:?}",
        model.name,
        model.classes.len(),
        feature_names.len(),
        model_path,
        features_path
    );
    Ok(())
}

fn demo_model(n_features: usize) -> LinearSignalModel {
    // Column order: RSI, MACD, BB_high, BB_low, SMA_20, Volume_Change,
    //               Momentum, Volatility, Sentiment
    let sell = vec![0.018, -0.9, 0.0, 0.0, 0.0, -0.12, -0.45, 0.05, -0.3];
    let hold = vec![0.0; n_features];
    let buy = vec![-0.018, 0.9, 0.0, 0.0, 0.0, 0.12, 0.45, -0.05, 0.3];

    LinearSignalModel {
        name: "demo-linear-v1".to_string(),
        classes: vec![-1, 0, 1],
        weights: vec![sell, hold, buy],
        // Biased towards HOLD so weak evidence does not flip the signal
        intercepts: vec![-0.55, 0.35, -0.55],
    }
}
