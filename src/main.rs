use clap::Parser;
use eframe::NativeOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use signal_scope::features::FeatureAssembler;
use signal_scope::model::ModelBundle;
use signal_scope::{Cli, run_app};

const APP_STATE_PATH: &str = "app_state.json";

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Load the model bundle once, before the GUI starts. A feature list
    // that names columns the assembler never produces is a configuration
    // fault, so it aborts here rather than on the first request.
    let bundle = match ModelBundle::load(&args.model_path, &args.features_path) {
        Ok(bundle) => {
            if let Err(e) = bundle.check_schema(FeatureAssembler::COLUMN_NAMES) {
                log::error!("❌ Feature list does not match assembler output: {e:#}");
                std::process::exit(1);
            }
            Arc::new(bundle)
        }
        Err(e) => {
            log::error!("❌ Failed to load model artifact: {e:#}");
            log::error!("Run `cargo run --bin make_demo_model` to write a demo artifact.");
            std::process::exit(1);
        }
    };

    log::info!(
        "Loaded model '{}' expecting {} features.",
        bundle.model_name(),
        bundle.feature_names().len()
    );

    // D. Runtime for the market-data fetches. Owned by main so its handle
    // stays valid for the whole eframe session.
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let runtime_handle = rt.handle().clone();

    // E. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        "Signal Scope - Fetch. Score. Signal.",
        options,
        Box::new(move |cc| Ok(run_app(cc, bundle, runtime_handle))),
    )
}
