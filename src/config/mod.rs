//! Configuration module for the signal-scope application.

pub mod analysis;
pub mod market;
pub mod plot;

mod debug; // Private; forces files to use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, IndicatorWindows};
pub use market::MARKET;
pub use plot::PLOT_CONFIG;
