// User interface components
pub mod app;
pub mod app_async;
pub mod config;
pub mod ui_panels;
pub mod ui_plot_view;
pub mod utils;

// Re-export main app
pub use app::SignalScopeApp;
pub use config::UI_CONFIG;
