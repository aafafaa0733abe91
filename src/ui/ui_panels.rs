use eframe::egui::{Color32, Key, RichText, TextEdit, Ui};

use crate::ui::config::UI_TEXT;
use crate::ui::utils::{section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Panel for the ticker input and the request trigger
pub struct TickerPanel<'a> {
    ticker: &'a mut String,
    request_in_flight: bool,
}

impl<'a> TickerPanel<'a> {
    pub fn new(ticker: &'a mut String, request_in_flight: bool) -> Self {
        Self {
            ticker,
            request_in_flight,
        }
    }
}

#[derive(Debug)]
pub enum TickerEvent {
    Submitted(String),
}

impl<'a> Panel for TickerPanel<'a> {
    type Event = TickerEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.ticker_heading);

        let response = ui.add(
            TextEdit::singleline(self.ticker)
                .hint_text(UI_TEXT.ticker_hint)
                .char_limit(12),
        );
        let submitted_via_enter =
            response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        ui.add_space(5.0);
        let button = ui.add_enabled(
            !self.request_in_flight,
            eframe::egui::Button::new(UI_TEXT.fetch_button),
        );

        if (button.clicked() || submitted_via_enter) && !self.request_in_flight {
            let ticker = self.ticker.trim().to_uppercase();
            if !ticker.is_empty() {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Ticker submitted: {ticker}");
                }
                events.push(TickerEvent::Submitted(ticker));
            }
        }

        if self.request_in_flight {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(UI_TEXT.working).small().color(Color32::GRAY));
            });
        }

        ui.add_space(10.0);
        events
    }
}

/// Panel describing the loaded model bundle
pub struct ModelInfoPanel<'a> {
    model_name: &'a str,
    feature_count: usize,
}

impl<'a> ModelInfoPanel<'a> {
    pub fn new(model_name: &'a str, feature_count: usize) -> Self {
        Self {
            model_name,
            feature_count,
        }
    }
}

impl<'a> Panel for ModelInfoPanel<'a> {
    type Event = ();

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        spaced_separator(ui);
        section_heading(ui, UI_TEXT.model_heading);
        ui.label(format!("{} ({} features)", self.model_name, self.feature_count));
        ui.label(
            RichText::new(UI_TEXT.sentiment_note)
                .small()
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);
        Vec::new()
    }
}
