#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{FetchIntradaySeries, FetchOutcome, PriceSeries, YahooChartProvider};
pub use domain::Signal;
pub use features::{FeatureAssembler, FeatureFrame};
pub use model::{ModelBundle, Predictor};
pub use pipeline::{RequestError, RequestOutcome};
pub use ui::SignalScopeApp;

use std::path::PathBuf;
use std::sync::Arc;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the trained model artifact (JSON)
    #[arg(long, default_value = "assets/model.json")]
    pub model_path: PathBuf,

    /// Path to the ordered feature-name list the model expects (JSON)
    #[arg(long, default_value = "assets/features.json")]
    pub features_path: PathBuf,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    bundle: Arc<ModelBundle>,
    runtime: tokio::runtime::Handle,
) -> Box<dyn eframe::App> {
    let app = ui::SignalScopeApp::new(cc, bundle, runtime);
    Box::new(app)
}
