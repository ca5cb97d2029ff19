use std::sync::mpsc::{Receiver, TryRecvError};

use crate::config::TIMING;
use crate::data::{ApiError, ConnectionStatus, Transport};
use crate::domain::{Instrument, ScannerCategory, Timeframe};
use crate::models::{CatalogPayload, CatalogStore, ScannerState};
use crate::projection::{self, ProjectionInput, RenderModel};

#[cfg(debug_assertions)]
use crate::config::DF;

use super::favorites::FavoriteCoordinator;
use super::live_feed::{EntryId, LiveFeed};
use super::lookup::{LookupPipeline, SignalView};
use super::messages::{ApiRequest, ApiResponse, DeskEvent, DeskTimer, StreamEvent};
use super::scanner::ScannerCoordinator;
use super::scheduler::{Scheduler, TimerId};

/// Instrument the signal panel is about, and the timeframe lookups are made with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub instrument: Option<Instrument>,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Everything the UI can ask of the desk.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    ToggleFavorite(Instrument),
    RequestSignal(Instrument),
    SetTimeframe(Timeframe),
    SetSearch(String),
    DismissEntry(EntryId),
    SelectEntry(EntryId),
    ToggleScanner(ScannerCategory),
}

#[derive(Debug, Default)]
struct SearchFilter {
    input: String,
    applied: String,
    timer: Option<TimerId>,
}

/// Session state and the only place it changes.
///
/// Network results and stream frames arrive on `events`; timers live in the scheduler. Both are
/// drained by [`SignalDesk::pump`], so every handler runs on the caller's thread, one at a time.
pub struct SignalDesk {
    store: CatalogStore,
    catalog_status: CatalogStatus,
    favorites: FavoriteCoordinator,
    live_feed: LiveFeed,
    lookup: LookupPipeline,
    scanner: ScannerCoordinator,
    selection: Selection,
    search: SearchFilter,
    stream_status: ConnectionStatus,

    scheduler: Scheduler<DeskTimer>,
    transport: Box<dyn Transport>,
    events: Receiver<DeskEvent>,
}

impl SignalDesk {
    pub fn new(transport: Box<dyn Transport>, events: Receiver<DeskEvent>) -> Self {
        Self {
            store: CatalogStore::new(),
            catalog_status: CatalogStatus::default(),
            favorites: FavoriteCoordinator::new(),
            live_feed: LiveFeed::new(),
            lookup: LookupPipeline::new(),
            scanner: ScannerCoordinator::new(),
            selection: Selection::default(),
            search: SearchFilter::default(),
            stream_status: ConnectionStatus::default(),
            scheduler: Scheduler::new(),
            transport,
            events,
        }
    }

    /// Kick off the one-shot startup fetches.
    pub fn start(&mut self) {
        self.catalog_status = CatalogStatus::Loading;
        self.dispatch(ApiRequest::FetchCatalog);
        self.dispatch(ApiRequest::FetchScannerStatus);
    }

    /// Drain inbound events, then fire every timer due at `now_ms`. Returns how many of either
    /// were handled, so the host knows whether to redraw.
    pub fn pump(&mut self, now_ms: i64) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.handle_event(event, now_ms);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Desk event channel closed; no more network results will arrive");
                    break;
                }
            }
        }
        handled + self.fire_due_timers(now_ms)
    }

    pub fn handle_event(&mut self, event: DeskEvent, now_ms: i64) {
        match event {
            DeskEvent::Api(response) => self.handle_response(response),
            DeskEvent::Stream(event) => self.handle_stream(event, now_ms),
        }
    }

    pub fn fire_due_timers(&mut self, now_ms: i64) -> usize {
        let mut fired = 0;
        while let Some((id, task)) = self.scheduler.pop_due(now_ms) {
            fired += 1;
            match task {
                DeskTimer::DispatchLookup => {
                    if let Some(request) = self.lookup.fire_debounce(id, self.selection.timeframe) {
                        self.dispatch(request);
                    }
                }
                DeskTimer::ExpireEntry(entry) => {
                    self.live_feed.expire(entry);
                }
                DeskTimer::ApplySearch => {
                    if self.search.timer == Some(id) {
                        self.search.timer = None;
                        self.search.applied = self.search.input.clone();
                    }
                }
            }
        }
        fired
    }

    pub fn apply(&mut self, action: UserAction, now_ms: i64) {
        match action {
            UserAction::ToggleFavorite(instrument) => self.toggle_favorite(&instrument),
            UserAction::RequestSignal(instrument) => self.request_signal(instrument, now_ms),
            UserAction::SetTimeframe(timeframe) => self.set_timeframe(timeframe),
            UserAction::SetSearch(text) => self.set_search(text, now_ms),
            UserAction::DismissEntry(id) => self.dismiss_entry(id),
            UserAction::SelectEntry(id) => self.select_entry(id),
            UserAction::ToggleScanner(category) => self.toggle_scanner(category),
        }
    }

    // --- USER OPERATIONS ---

    pub fn toggle_favorite(&mut self, instrument: &Instrument) {
        let request = self.favorites.toggle(&mut self.store, instrument);
        self.dispatch(request);
    }

    pub fn request_signal(&mut self, instrument: Instrument, now_ms: i64) {
        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!("SELECT: {} ({})", instrument, self.selection.timeframe);
        }
        self.selection.instrument = Some(instrument.clone());
        self.lookup.request(instrument, now_ms, &mut self.scheduler);
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.selection.timeframe = timeframe;
        if let Some(instrument) = self.selection.instrument.clone() {
            let request = self.lookup.request_now(instrument, timeframe, &mut self.scheduler);
            self.dispatch(request);
        }
    }

    pub fn set_search(&mut self, text: String, now_ms: i64) {
        self.search.input = text;
        if let Some(timer) = self.search.timer.take() {
            self.scheduler.cancel(timer);
        }
        self.search.timer = Some(
            self.scheduler
                .schedule(now_ms + TIMING.search_debounce_ms, DeskTimer::ApplySearch),
        );
    }

    pub fn dismiss_entry(&mut self, id: EntryId) {
        self.live_feed.dismiss(id, &mut self.scheduler);
    }

    /// Show a live entry's report in the signal panel. The feed itself is left as it is.
    pub fn select_entry(&mut self, id: EntryId) {
        let Some(entry) = self.live_feed.get(id) else {
            return;
        };
        let instrument = entry.instrument.clone();
        let report = entry.report.clone();

        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!("SELECT: {} from live feed", instrument);
        }
        self.selection.instrument = Some(instrument.clone());
        self.lookup.show_report(
            instrument,
            self.selection.timeframe,
            report,
            &mut self.scheduler,
        );
    }

    pub fn toggle_scanner(&mut self, category: ScannerCategory) {
        let request = self.scanner.toggle(category);
        self.dispatch(request);
    }

    // --- INBOUND ---

    fn handle_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Catalog(result) => self.apply_catalog(result),
            ApiResponse::ScannerStatus(result) => self.scanner.apply_status(result),
            ApiResponse::ScannerToggled { generation, result } => {
                self.scanner.settle(generation, result);
            }
            ApiResponse::FavoriteToggled {
                instrument,
                generation,
                result,
            } => {
                self.favorites
                    .settle(&mut self.store, &instrument.key(), generation, result);
            }
            ApiResponse::Signal {
                instrument,
                timeframe,
                generation,
                result,
            } => {
                self.lookup.apply(generation, instrument, timeframe, result);
            }
        }
    }

    fn apply_catalog(&mut self, result: Result<CatalogPayload, ApiError>) {
        match result {
            Ok(payload) => {
                let catalog = self.store.load(&payload);
                log::info!(
                    "Catalog loaded: {} sections, {} favorites",
                    catalog.sections.len(),
                    payload.watchlist.len()
                );
                self.catalog_status = CatalogStatus::Ready;
            }
            Err(e) => {
                log::error!("Catalog fetch failed: {}", e);
                self.catalog_status = CatalogStatus::Failed(e.reason());
            }
        }
    }

    fn handle_stream(&mut self, event: StreamEvent, now_ms: i64) {
        match event {
            StreamEvent::Message(raw) => {
                self.live_feed.ingest(&raw, now_ms, &mut self.scheduler);
            }
            StreamEvent::Status(status) => {
                if status != self.stream_status {
                    log::info!("Live stream {:?}", status);
                }
                self.stream_status = status;
            }
            StreamEvent::Error(error) => self.live_feed.record_stream_error(&error),
        }
    }

    fn dispatch(&mut self, request: ApiRequest) {
        self.transport.dispatch(request);
    }

    // --- READ SIDE ---

    pub fn render_model(&self, now_ms: i64) -> RenderModel {
        projection::project(
            &ProjectionInput {
                store: &self.store,
                catalog_status: &self.catalog_status,
                filter: &self.search.applied,
                view: self.lookup.view(),
                timeframe: self.selection.timeframe,
                live_feed: &self.live_feed,
                scanner: self.scanner.state(),
                stream_status: self.stream_status,
            },
            now_ms,
        )
    }

    /// Earliest pending timer, for scheduling the next wake-up.
    pub fn next_deadline(&self) -> Option<i64> {
        self.scheduler.next_deadline()
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    pub fn is_favorite(&self, instrument: &Instrument) -> bool {
        self.store.is_favorite(&instrument.key())
    }

    pub fn live_feed(&self) -> &LiveFeed {
        &self.live_feed
    }

    pub fn signal_view(&self) -> &SignalView {
        self.lookup.view()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scanner_state(&self) -> &ScannerState {
        self.scanner.state()
    }

    pub fn stream_status(&self) -> ConnectionStatus {
        self.stream_status
    }

    pub fn search_input(&self) -> &str {
        &self.search.input
    }

    pub fn applied_filter(&self) -> &str {
        &self.search.applied
    }
}
