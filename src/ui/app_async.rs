use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use poll_promise::Promise;

use crate::config::{ANALYSIS, MARKET};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{FetchIntradaySeries, FetchOutcome, YahooChartProvider};
use crate::features::UniformSentiment;
use crate::model::ModelBundle;
use crate::pipeline::{run_request, RequestError, RequestOutcome};
use crate::ui::app::{SignalScopeApp, ViewState};

pub(super) struct RequestReport {
    pub(super) ticker: String,
    pub(super) result: Result<RequestOutcome, RequestError>,
    elapsed_time: Duration,
}

impl RequestReport {
    pub(super) fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }
}

impl SignalScopeApp {
    pub(super) fn start_request(&mut self, ticker: String) {
        if self.request_promise.is_some() {
            return;
        }

        let (Some(bundle), Some(handle)) = (self.bundle.clone(), self.runtime.clone()) else {
            self.view = ViewState::Error("Application not fully initialised".to_string());
            return;
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_requests {
            log::info!(
                "Requesting {} ({} @ {})",
                ticker,
                MARKET.lookback_range,
                MARKET.sample_interval
            );
        }

        let promise = Promise::spawn_thread("signal_request", move || {
            run_signal_request(ticker, bundle, handle)
        });

        self.request_promise = Some(promise);
    }

    pub(super) fn poll_request(&mut self, ctx: &egui::Context) {
        let finished = self
            .request_promise
            .as_ref()
            .is_some_and(|promise| promise.ready().is_some());

        if finished {
            // ready() returned Some, so block_and_take cannot block here
            let report = match self.request_promise.take() {
                Some(promise) => promise.block_and_take(),
                None => return,
            };

            let elapsed = report.elapsed_time();

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_requests {
                log::info!(
                    "Request for {} finished in {:.2}s",
                    report.ticker,
                    elapsed.as_secs_f32()
                );
            }

            self.view = match report.result {
                Ok(RequestOutcome::Ready { predicted, signal }) => ViewState::Ready {
                    ticker: report.ticker,
                    predicted: Arc::new(predicted),
                    signal,
                    elapsed,
                },
                Ok(RequestOutcome::InsufficientData(reason)) => {
                    log::warn!("{}: {}", report.ticker, reason);
                    ViewState::Warning(format!("{}: {}", report.ticker, reason))
                }
                Err(error) => {
                    log::error!("Request for {} failed: {}", report.ticker, error);
                    ViewState::Error(error.to_string())
                }
            };
        } else if self.request_promise.is_some() {
            ctx.request_repaint();
        }
    }

    pub(super) fn is_requesting(&self) -> bool {
        self.request_promise.is_some()
    }
}

fn run_signal_request(
    ticker: String,
    bundle: Arc<ModelBundle>,
    handle: tokio::runtime::Handle,
) -> RequestReport {
    let request_start = Instant::now();

    let result = fetch_and_score(&ticker, &bundle, &handle);

    RequestReport {
        ticker,
        result,
        elapsed_time: request_start.elapsed(),
    }
}

fn fetch_and_score(
    ticker: &str,
    bundle: &ModelBundle,
    handle: &tokio::runtime::Handle,
) -> Result<RequestOutcome, RequestError> {
    let provider = YahooChartProvider::new()
        .map_err(|e| RequestError::Processing(format!("could not build HTTP client: {e}")))?;
    log::debug!("fetching {ticker} via {}", provider.signature());

    let fetch = match handle.block_on(provider.fetch_intraday(
        ticker,
        MARKET.lookback_range,
        MARKET.sample_interval,
    )) {
        Ok(outcome) => outcome,
        // The provider folds transport problems into FetchOutcome::Failed;
        // anything surfacing here is unexpected, treat it the same way.
        Err(e) => FetchOutcome::Failed(e.to_string()),
    };

    run_request(fetch, bundle, &UniformSentiment, &ANALYSIS)
}
