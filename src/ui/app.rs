use std::sync::Arc;
use std::time::Duration;

use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::config::MARKET;
use crate::domain::Signal;
use crate::model::{ModelBundle, PredictedFrame};
use crate::ui::app_async::RequestReport;
use crate::ui::config::{UI_CONFIG, UI_TEXT, signal_display};
use crate::ui::ui_panels::{ModelInfoPanel, Panel, TickerEvent, TickerPanel};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::{format_price, setup_custom_visuals, spaced_separator};
use crate::utils::time_utils::format_timestamp_ms;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// What the central panel currently shows. Runtime-only state, never persisted.
#[derive(Default)]
pub(super) enum ViewState {
    #[default]
    Idle,
    /// Recoverable: the request completed but there was nothing to score.
    Warning(String),
    /// The request failed outright.
    Error(String),
    Ready {
        ticker: String,
        predicted: Arc<PredictedFrame>,
        signal: Signal,
        elapsed: Duration,
    },
}

#[derive(Deserialize, Serialize)]
pub struct SignalScopeApp {
    // UI state
    #[serde(default = "default_ticker_input")]
    pub(super) ticker_input: String,

    // Runtime state - skipped during serialization
    #[serde(skip)]
    pub(super) bundle: Option<Arc<ModelBundle>>,
    #[serde(skip)]
    pub(super) runtime: Option<tokio::runtime::Handle>,
    #[serde(skip)]
    pub(super) request_promise: Option<Promise<RequestReport>>,
    #[serde(skip)]
    pub(super) view: ViewState,
    #[serde(skip)]
    pub(super) plot_view: PlotView,
}

/// Default ticker input - used by serde and initialization
fn default_ticker_input() -> String {
    MARKET.default_ticker.to_string()
}

impl SignalScopeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        bundle: Arc<ModelBundle>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let mut app: SignalScopeApp;

        // Attempt to load the persisted state
        if let Some(storage) = cc.storage {
            if let Some(value) = eframe::get_value(storage, eframe::APP_KEY) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted state");
                }
                app = value;
            } else {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No persisted state found. Creating anew.");
                }
                app = SignalScopeApp::new_with_initial_state();
            }
        } else {
            app = SignalScopeApp::new_with_initial_state();
        }

        if app.ticker_input.trim().is_empty() {
            app.ticker_input = default_ticker_input();
        }

        // Wire up the runtime-only fields (all skipped during serialization)
        app.bundle = Some(bundle);
        app.runtime = Some(runtime);
        app.request_promise = None;
        app.view = ViewState::Idle;
        app.plot_view = PlotView::default();

        app
    }

    pub fn new_with_initial_state() -> Self {
        Self {
            ticker_input: default_ticker_input(),
            bundle: None,
            runtime: None,
            request_promise: None,
            view: ViewState::Idle,
            plot_view: PlotView::default(),
        }
    }

    fn render_side_panel(&mut self, ctx: &egui::Context) {
        let mut submitted: Option<String> = None;

        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                let in_flight = self.is_requesting();
                let mut ticker_panel = TickerPanel::new(&mut self.ticker_input, in_flight);
                for event in ticker_panel.render(ui) {
                    match event {
                        TickerEvent::Submitted(ticker) => submitted = Some(ticker),
                    }
                }

                if let Some(bundle) = &self.bundle {
                    let mut model_panel =
                        ModelInfoPanel::new(bundle.model_name(), bundle.feature_names().len());
                    model_panel.render(ui);
                }
            });

        if let Some(ticker) = submitted {
            self.start_request(ticker);
        }
    }

    fn render_status_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = if self.is_requesting() {
                    UI_TEXT.working.to_string()
                } else {
                    match &self.view {
                        ViewState::Idle => "Idle".to_string(),
                        ViewState::Warning(_) => "Last request: insufficient data".to_string(),
                        ViewState::Error(_) => "Last request: failed".to_string(),
                        ViewState::Ready {
                            ticker, elapsed, ..
                        } => {
                            format!("Last request: {} in {:.2}s", ticker, elapsed.as_secs_f32())
                        }
                    }
                };
                ui.label(
                    egui::RichText::new(status)
                        .small()
                        .color(UI_CONFIG.colors.label),
                );
            });
        });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match &self.view {
            ViewState::Idle => {
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(UI_TEXT.idle_hint).color(UI_CONFIG.colors.label),
                );
            }
            ViewState::Warning(message) => {
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!("{} {}", UI_TEXT.warning_prefix, message))
                        .color(UI_CONFIG.colors.warning),
                );
            }
            ViewState::Error(message) => {
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!("{} {}", UI_TEXT.error_prefix, message))
                        .color(UI_CONFIG.colors.error),
                );
            }
            ViewState::Ready {
                ticker,
                predicted,
                signal,
                elapsed,
            } => {
                let latest_close = predicted.frame.close.last().copied();

                ui.horizontal(|ui| {
                    ui.heading(format!(
                        "{} {}: {}",
                        UI_TEXT.signal_prefix,
                        ticker,
                        signal_display(*signal)
                    ));
                    if let Some(close) = latest_close {
                        ui.label(
                            egui::RichText::new(format_price(close))
                                .color(UI_CONFIG.colors.subsection_heading),
                        );
                    }
                });
                let as_of = predicted
                    .frame
                    .timestamps_ms
                    .last()
                    .map(|ts| format_timestamp_ms(*ts))
                    .unwrap_or_default();
                ui.label(
                    egui::RichText::new(format!(
                        "{} rows scored in {:.2}s, as of {}",
                        predicted.frame.len(),
                        elapsed.as_secs_f32(),
                        as_of
                    ))
                    .small()
                    .color(UI_CONFIG.colors.label),
                );
                spaced_separator(ui);

                self.plot_view.show_signal_plot(ui, predicted);
            }
        });
    }
}

impl eframe::App for SignalScopeApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop any in-flight request to avoid a "Sender dropped" panic
        if let Some(promise) = self.request_promise.take() {
            drop(promise);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_request(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
