//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub close_line_color: Color32,
    pub close_line_width: f32,
    pub buy_marker_color: Color32,
    pub sell_marker_color: Color32,
    pub hold_marker_color: Color32,
    /// Radius of the BUY/SELL triangles
    pub signal_marker_radius: f32,
    /// Radius of the HOLD circles (smaller so they read as background)
    pub hold_marker_radius: f32,
    /// Headroom added above/below the close range so markers aren't clipped
    pub y_margin_pct: f64,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    close_line_color: Color32::from_rgb(200, 200, 210), // Light gray
    close_line_width: 1.5,
    buy_marker_color: Color32::from_rgb(0, 200, 0),    // Green
    sell_marker_color: Color32::from_rgb(220, 40, 40), // Red
    hold_marker_color: Color32::from_rgb(70, 130, 240), // Blue
    signal_marker_radius: 5.0,
    hold_marker_radius: 3.5,
    y_margin_pct: 0.02,
};
