use eframe::egui;
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::Signal;
use crate::model::PredictedFrame;
use crate::ui::config::UI_TEXT;
use crate::utils::{maths_utils, time_utils};

/// Per-class marker overlays, partitioned from the predicted frame.
/// Every retained row lands in exactly one bucket.
#[derive(Default)]
pub struct SignalPartition {
    pub buy: Vec<[f64; 2]>,
    pub sell: Vec<[f64; 2]>,
    pub hold: Vec<[f64; 2]>,
}

pub fn partition_by_signal(predicted: &PredictedFrame) -> SignalPartition {
    let mut partition = SignalPartition::default();
    for ((ts, close), signal) in predicted
        .frame
        .timestamps_ms
        .iter()
        .zip(&predicted.frame.close)
        .zip(&predicted.predictions)
    {
        let point = [*ts as f64 / 1000.0, *close];
        match signal {
            Signal::Buy => partition.buy.push(point),
            Signal::Sell => partition.sell.push(point),
            Signal::Hold => partition.hold.push(point),
        }
    }
    partition
}

#[derive(Default)]
pub struct PlotView;

impl PlotView {
    pub fn show_signal_plot(&self, ui: &mut egui::Ui, predicted: &PredictedFrame) {
        let frame = &predicted.frame;
        if frame.is_empty() {
            return;
        }

        let line_points: Vec<[f64; 2]> = frame
            .timestamps_ms
            .iter()
            .zip(&frame.close)
            .map(|(ts, close)| [*ts as f64 / 1000.0, *close])
            .collect();
        let partition = partition_by_signal(predicted);

        let (y_min, y_max) = maths_utils::get_min_max(&frame.close);
        let y_margin = ((y_max - y_min).max(f64::EPSILON)) * PLOT_CONFIG.y_margin_pct;
        let x_min = frame.timestamps_ms[0] as f64 / 1000.0;
        let x_max = frame.timestamps_ms[frame.len() - 1] as f64 / 1000.0;

        let legend = Legend::default().position(Corner::RightTop);

        Plot::new("signal_plot")
            .legend(legend)
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis(&frame.ticker)])
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_y((y_min - y_margin)..=(y_max + y_margin));
                plot_ui.set_plot_bounds_x(x_min..=x_max);

                plot_ui.line(
                    Line::new(UI_TEXT.legend_close, PlotPoints::new(line_points))
                        .color(PLOT_CONFIG.close_line_color)
                        .width(PLOT_CONFIG.close_line_width),
                );

                plot_ui.points(
                    Points::new("BUY", PlotPoints::new(partition.buy))
                        .shape(MarkerShape::Up)
                        .color(PLOT_CONFIG.buy_marker_color)
                        .filled(true)
                        .radius(PLOT_CONFIG.signal_marker_radius),
                );
                plot_ui.points(
                    Points::new("SELL", PlotPoints::new(partition.sell))
                        .shape(MarkerShape::Down)
                        .color(PLOT_CONFIG.sell_marker_color)
                        .filled(true)
                        .radius(PLOT_CONFIG.signal_marker_radius),
                );
                plot_ui.points(
                    Points::new("HOLD", PlotPoints::new(partition.hold))
                        .shape(MarkerShape::Circle)
                        .color(PLOT_CONFIG.hold_marker_color)
                        .filled(true)
                        .radius(PLOT_CONFIG.hold_marker_radius),
                );
            });
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| time_utils::format_axis_time(grid_mark.value))
}

fn create_y_axis(ticker: &str) -> AxisHints<'static> {
    let label = format!("{}  {}", ticker, UI_TEXT.plot_y_axis);
    AxisHints::new_y()
        .label(label)
        .formatter(|grid_mark, _range| format!("${:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}
