use eframe::egui::Color32;

use crate::domain::Signal;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub warning: Color32,
    pub error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 22, 28),
        side_panel: Color32::from_rgb(25, 25, 25),
        warning: Color32::from_rgb(230, 200, 90),
        error: Color32::from_rgb(220, 120, 120),
    },
};

/// All user-facing strings in one place
pub struct UiText {
    pub ticker_heading: &'static str,
    pub ticker_hint: &'static str,
    pub fetch_button: &'static str,
    pub model_heading: &'static str,
    pub sentiment_note: &'static str,
    pub working: &'static str,
    pub idle_hint: &'static str,
    pub warning_prefix: &'static str,
    pub error_prefix: &'static str,
    pub signal_prefix: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub legend_close: &'static str,
}

pub static UI_TEXT: UiText = UiText {
    ticker_heading: "Ticker",
    ticker_hint: "e.g. AAPL, MSFT, TSLA",
    fetch_button: "Fetch & Predict",
    model_heading: "Model",
    sentiment_note: "Sentiment is a random placeholder; repeated runs can differ.",
    working: "Fetching data and scoring…",
    idle_hint: "Enter a ticker and hit Fetch & Predict.",
    warning_prefix: "⚠️",
    error_prefix: "❌",
    signal_prefix: "Latest signal for",
    plot_x_axis: "Time (UTC)",
    plot_y_axis: "Price",
    legend_close: "Close",
};

/// Display string for a signal, matching the original dashboard's badges.
pub fn signal_display(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "📈 BUY",
        Signal::Sell => "🔻 SELL",
        Signal::Hold => "⏸️ HOLD",
    }
}
