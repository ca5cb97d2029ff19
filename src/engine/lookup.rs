use crate::config::TIMING;
use crate::data::ApiError;
use crate::domain::{Instrument, Timeframe};
use crate::models::SignalReport;

#[cfg(debug_assertions)]
use crate::config::DF;

use super::messages::{ApiRequest, DeskTimer, Generation};
use super::scheduler::{Scheduler, TimerId};

/// Where a displayed report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Lookup,
    LiveFeed,
}

/// What the signal panel currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SignalView {
    #[default]
    Idle,
    Loading {
        instrument: Instrument,
    },
    Ready {
        instrument: Instrument,
        timeframe: Timeframe,
        report: SignalReport,
        source: SignalSource,
    },
    Failed {
        instrument: Instrument,
        reason: String,
    },
}

impl SignalView {
    pub fn instrument(&self) -> Option<&Instrument> {
        match self {
            SignalView::Idle => None,
            SignalView::Loading { instrument }
            | SignalView::Ready { instrument, .. }
            | SignalView::Failed { instrument, .. } => Some(instrument),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SignalView::Loading { .. })
    }
}

/// Single-slot signal lookup.
///
/// Every request bumps the generation the moment it is made, so a response still in flight
/// for an earlier request can never overwrite the view. Debounced requests dispatch the
/// generation that is current when the timer fires.
#[derive(Debug, Default)]
pub struct LookupPipeline {
    generation: Generation,
    debounce: Option<TimerId>,
    pending: Option<Instrument>,
    view: SignalView,
}

impl LookupPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &SignalView {
        &self.view
    }

    pub fn is_debouncing(&self) -> bool {
        self.debounce.is_some()
    }

    /// Show Loading now and (re)arm the debounce. Nothing is sent until the timer fires.
    pub fn request(&mut self, instrument: Instrument, now_ms: i64, scheduler: &mut Scheduler<DeskTimer>) {
        self.supersede(scheduler);
        self.view = SignalView::Loading {
            instrument: instrument.clone(),
        };
        self.pending = Some(instrument);
        self.debounce = Some(scheduler.schedule(
            now_ms + TIMING.lookup_debounce_ms,
            DeskTimer::DispatchLookup,
        ));

        #[cfg(debug_assertions)]
        if DF.log_lookup {
            log::info!("LOOKUP: armed debounce (gen {})", self.generation);
        }
    }

    /// Debounce timer fired. A timer that is no longer the armed one yields nothing.
    pub fn fire_debounce(&mut self, timer: TimerId, timeframe: Timeframe) -> Option<ApiRequest> {
        if self.debounce != Some(timer) {
            return None;
        }
        self.debounce = None;
        let instrument = self.pending.take()?;
        Some(ApiRequest::LookupSignal {
            instrument,
            timeframe,
            generation: self.generation,
        })
    }

    /// Undebounced lookup, used when the timeframe changes under a selected instrument.
    pub fn request_now(
        &mut self,
        instrument: Instrument,
        timeframe: Timeframe,
        scheduler: &mut Scheduler<DeskTimer>,
    ) -> ApiRequest {
        self.supersede(scheduler);
        self.view = SignalView::Loading {
            instrument: instrument.clone(),
        };
        ApiRequest::LookupSignal {
            instrument,
            timeframe,
            generation: self.generation,
        }
    }

    /// Display a report that arrived through the live feed. Takes the slot like a new request.
    pub fn show_report(
        &mut self,
        instrument: Instrument,
        timeframe: Timeframe,
        report: SignalReport,
        scheduler: &mut Scheduler<DeskTimer>,
    ) {
        self.supersede(scheduler);
        self.view = SignalView::Ready {
            instrument,
            timeframe,
            report,
            source: SignalSource::LiveFeed,
        };
    }

    /// Apply a settled response. Returns false (and changes nothing) for a stale generation.
    pub fn apply(
        &mut self,
        generation: Generation,
        instrument: Instrument,
        timeframe: Timeframe,
        result: Result<SignalReport, ApiError>,
    ) -> bool {
        if generation != self.generation {
            #[cfg(debug_assertions)]
            if DF.log_lookup {
                log::info!(
                    "LOOKUP: dropping stale response for {} (gen {} < {})",
                    instrument,
                    generation,
                    self.generation
                );
            }
            return false;
        }

        self.view = match result {
            Ok(report) => SignalView::Ready {
                instrument,
                timeframe,
                report,
                source: SignalSource::Lookup,
            },
            Err(e) => {
                log::warn!("Signal lookup for {} failed: {}", instrument, e);
                SignalView::Failed {
                    instrument,
                    reason: e.reason(),
                }
            }
        };
        true
    }

    fn supersede(&mut self, scheduler: &mut Scheduler<DeskTimer>) {
        self.generation += 1;
        self.pending = None;
        if let Some(timer) = self.debounce.take() {
            scheduler.cancel(timer);
        }
    }
}
