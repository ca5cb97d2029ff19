use std::sync::mpsc::{Sender, channel};
use std::sync::{Arc, Mutex};

use signal_desk::data::{ApiError, ConnectionStatus, Transport};
use signal_desk::domain::{Instrument, ScannerCategory, Timeframe};
use signal_desk::engine::{
    ApiRequest, ApiResponse, DeskEvent, Generation, SignalDesk, SignalView, StreamEvent, UserAction,
};
use signal_desk::models::{CatalogPayload, FavoriteAck, ScannerState, SignalReport, Tone};
use signal_desk::projection::{CatalogPanel, SignalPanel};

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl RecordingTransport {
    fn take(&self) -> Vec<ApiRequest> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl Transport for RecordingTransport {
    fn dispatch(&self, request: ApiRequest) {
        self.sent.lock().unwrap().push(request);
    }
}

struct Harness {
    desk: SignalDesk,
    transport: RecordingTransport,
    inbox: Sender<DeskEvent>,
}

impl Harness {
    fn new() -> Self {
        let transport = RecordingTransport::default();
        let (inbox, events) = channel();
        let desk = SignalDesk::new(Box::new(transport.clone()), events);
        Self {
            desk,
            transport,
            inbox,
        }
    }

    /// Started desk with the catalog already delivered.
    fn loaded(catalog_json: &str) -> Self {
        let mut h = Self::new();
        h.desk.start();
        h.respond(ApiResponse::Catalog(Ok(
            CatalogPayload::from_json(catalog_json).unwrap()
        )));
        h.pump(0);
        h.transport.take();
        h
    }

    fn respond(&self, response: ApiResponse) {
        self.inbox.send(DeskEvent::Api(response)).unwrap();
    }

    fn push(&self, raw: &str) {
        self.inbox
            .send(DeskEvent::Stream(StreamEvent::Message(raw.to_string())))
            .unwrap();
    }

    fn pump(&mut self, now_ms: i64) {
        self.desk.pump(now_ms);
    }
}

const CATALOG: &str = r#"{
    "forex": [{"title": "London", "pairs": ["EUR/USD", "GBP/USD"]}],
    "crypto": ["BTC/USDT"],
    "watchlist": ["EURUSD"]
}"#;

fn favorite_generation(request: &ApiRequest) -> Generation {
    match request {
        ApiRequest::ToggleFavorite { generation, .. } => *generation,
        other => panic!("expected a favorite toggle, got {:?}", other),
    }
}

fn ack() -> Result<FavoriteAck, ApiError> {
    Ok(FavoriteAck {
        success: true,
        favorite: None,
        error: None,
    })
}

#[test]
fn startup_loads_catalog_and_renders_favorites_in_display_form() {
    let mut h = Harness::new();
    h.desk.start();
    assert_eq!(
        h.transport.take(),
        vec![ApiRequest::FetchCatalog, ApiRequest::FetchScannerStatus]
    );
    assert_eq!(h.desk.render_model(0).catalog, CatalogPanel::Loading);

    h.respond(ApiResponse::Catalog(Ok(CatalogPayload::from_json(CATALOG).unwrap())));
    h.respond(ApiResponse::ScannerStatus(Ok(
        ScannerState::from_json(r#"{"forex": true}"#).unwrap()
    )));
    h.pump(0);

    let model = h.desk.render_model(0);
    let sections = model.catalog.sections();
    assert_eq!(sections[0].title, "⭐ Favorites");
    assert_eq!(sections[0].items[0].label, "EUR/USD");
    assert!(
        model
            .scanner
            .iter()
            .any(|b| b.category == ScannerCategory::Forex && b.enabled)
    );
}

#[test]
fn search_filter_applies_after_debounce() {
    let mut h = Harness::loaded(CATALOG);
    h.desk.apply(UserAction::SetSearch("eur".into()), 1_000);

    h.pump(1_100);
    assert_eq!(h.desk.render_model(1_100).catalog.sections().len(), 3);

    h.pump(1_300);
    let model = h.desk.render_model(1_300);
    let titles: Vec<_> = model
        .catalog
        .sections()
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, vec!["⭐ Favorites", "London"]);
    assert_eq!(model.catalog.sections()[1].items.len(), 1);
}

#[test]
fn failed_toggle_restores_prior_membership() {
    let mut h = Harness::loaded(CATALOG);
    let eur = Instrument::new("EUR/USD");

    h.desk.toggle_favorite(&eur);
    assert!(!h.desk.is_favorite(&eur));
    let g = favorite_generation(&h.transport.take()[0]);

    h.respond(ApiResponse::FavoriteToggled {
        instrument: eur.clone(),
        generation: g,
        result: Err(ApiError::Status {
            status: 500,
            reason: "HTTP 500".into(),
        }),
    });
    h.pump(10);
    assert!(h.desk.is_favorite(&eur));
}

#[test]
fn alternating_confirmed_toggles_settle_on_last_confirmation() {
    let mut h = Harness::loaded(CATALOG);
    let btc = Instrument::new("BTC/USDT");

    for round in 0..4 {
        h.desk.toggle_favorite(&btc);
        let g = favorite_generation(&h.transport.take()[0]);
        h.respond(ApiResponse::FavoriteToggled {
            instrument: btc.clone(),
            generation: g,
            result: ack(),
        });
        h.pump(round);
    }
    assert!(!h.desk.is_favorite(&btc));
}

#[test]
fn late_response_of_superseded_toggle_is_ignored() {
    let mut h = Harness::loaded(CATALOG);
    let btc = Instrument::new("BTC/USDT");

    h.desk.toggle_favorite(&btc);
    h.desk.toggle_favorite(&btc);
    let sent = h.transport.take();
    let (g1, g2) = (favorite_generation(&sent[0]), favorite_generation(&sent[1]));

    h.respond(ApiResponse::FavoriteToggled {
        instrument: btc.clone(),
        generation: g2,
        result: ack(),
    });
    h.respond(ApiResponse::FavoriteToggled {
        instrument: btc.clone(),
        generation: g1,
        result: Err(ApiError::Rejected("late".into())),
    });
    h.pump(0);
    assert!(!h.desk.is_favorite(&btc));
}

#[test]
fn stacked_toggles_that_both_fail_leave_server_membership() {
    let mut h = Harness::loaded(CATALOG);
    let btc = Instrument::new("BTC/USDT");

    h.desk.toggle_favorite(&btc);
    h.desk.toggle_favorite(&btc);
    let sent = h.transport.take();
    for request in &sent {
        h.respond(ApiResponse::FavoriteToggled {
            instrument: btc.clone(),
            generation: favorite_generation(request),
            result: Err(ApiError::Transport("down".into())),
        });
    }
    h.pump(0);

    assert!(!h.desk.is_favorite(&btc));
    let model = h.desk.render_model(0);
    assert!(
        model.catalog.sections()[0]
            .items
            .iter()
            .all(|item| item.label != "BTC/USDT")
    );
}

#[test]
fn lookups_within_debounce_window_send_one_request() {
    let mut h = Harness::loaded(CATALOG);

    h.desk.request_signal(Instrument::new("EUR/USD"), 0);
    h.desk.request_signal(Instrument::new("GBP/USD"), 150);
    h.pump(300);
    assert!(h.transport.take().is_empty());

    h.pump(450);
    let sent = h.transport.take();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        ApiRequest::LookupSignal { instrument, timeframe: Timeframe::M1, .. }
            if instrument.symbol() == "GBP/USD"
    ));
}

#[test]
fn stale_lookup_response_never_overwrites_newer_one() {
    let mut h = Harness::loaded(CATALOG);
    let eur = Instrument::new("EUR/USD");
    let gbp = Instrument::new("GBP/USD");

    h.desk.request_signal(eur.clone(), 0);
    h.pump(300);
    let ApiRequest::LookupSignal { generation: old, .. } = h.transport.take().remove(0) else {
        panic!("expected a lookup");
    };

    h.desk.request_signal(gbp.clone(), 400);
    h.pump(700);
    let ApiRequest::LookupSignal { generation: new, .. } = h.transport.take().remove(0) else {
        panic!("expected a lookup");
    };

    h.respond(ApiResponse::Signal {
        instrument: gbp.clone(),
        timeframe: Timeframe::M1,
        generation: new,
        result: Ok(SignalReport {
            pair: Some("GBP/USD".into()),
            score: Some(30.0),
            ..Default::default()
        }),
    });
    h.respond(ApiResponse::Signal {
        instrument: eur,
        timeframe: Timeframe::M1,
        generation: old,
        result: Ok(SignalReport {
            pair: Some("EUR/USD".into()),
            score: Some(90.0),
            ..Default::default()
        }),
    });
    h.pump(900);

    let SignalPanel::Report(report) = h.desk.render_model(900).signal else {
        panic!("expected a report");
    };
    assert_eq!(report.label, "GBP/USD");
    assert_eq!(report.tone, Tone::Bearish);
    assert_eq!(report.bears, "70%");
}

#[test]
fn lookup_error_body_is_shown_inline() {
    let mut h = Harness::loaded(CATALOG);
    let eur = Instrument::new("EUR/USD");

    h.desk.apply(UserAction::RequestSignal(eur.clone()), 0);
    assert!(matches!(
        h.desk.render_model(0).signal,
        SignalPanel::Loading { .. }
    ));
    h.pump(300);
    let ApiRequest::LookupSignal { generation, .. } = h.transport.take().remove(0) else {
        panic!("expected a lookup");
    };

    h.respond(ApiResponse::Signal {
        instrument: eur,
        timeframe: Timeframe::M1,
        generation,
        result: Err(ApiError::from_status(504, r#"{"error": "Request timed out."}"#)),
    });
    h.pump(400);
    assert_eq!(
        h.desk.render_model(400).signal,
        SignalPanel::Error {
            label: "EUR/USD".into(),
            reason: "Request timed out.".into()
        }
    );
}

#[test]
fn live_entry_expires_after_lifetime_and_fades_first() {
    let mut h = Harness::loaded(CATALOG);
    h.push(r#"{"_ping": true}"#);
    h.push(r#"{"pair": "EUR/USD", "verdict_text": "BUY", "score": 81}"#);
    h.pump(1_000);

    let model = h.desk.render_model(1_000);
    assert_eq!(model.live_feed.len(), 1);
    assert_eq!(model.live_feed[0].tone, Tone::Bullish);
    assert_eq!(model.live_feed[0].opacity, 1.0);

    let fading = h.desk.render_model(300_750);
    assert!(fading.live_feed[0].opacity < 1.0);

    h.pump(300_999);
    assert_eq!(h.desk.live_feed().len(), 1);
    h.pump(301_000);
    assert!(h.desk.live_feed().is_empty());
    assert_eq!(h.desk.next_deadline(), None);
}

#[test]
fn dismissed_entry_never_fires_its_timer() {
    let mut h = Harness::loaded(CATALOG);
    h.push(r#"{"pair": "EUR/USD", "score": 50}"#);
    h.push(r#"{"pair": "BTC/USDT", "score": 10}"#);
    h.pump(0);

    let ids: Vec<_> = h.desk.live_feed().entries().map(|e| e.id).collect();
    assert_eq!(
        h.desk.live_feed().get(ids[0]).map(|e| e.instrument.symbol()),
        Some("BTC/USDT")
    );

    h.desk.apply(UserAction::DismissEntry(ids[0]), 10);
    h.desk.apply(UserAction::DismissEntry(ids[0]), 20);
    assert_eq!(h.desk.live_feed().len(), 1);

    h.pump(400_000);
    assert!(h.desk.live_feed().is_empty());
}

#[test]
fn selecting_a_live_entry_shows_its_report_and_supersedes_lookup() {
    let mut h = Harness::loaded(CATALOG);
    let eur = Instrument::new("EUR/USD");

    h.desk.set_timeframe(Timeframe::M5);
    h.desk.request_signal(eur.clone(), 0);
    h.pump(300);
    let ApiRequest::LookupSignal { generation, .. } = h.transport.take().remove(0) else {
        panic!("expected a lookup");
    };

    h.push(r#"{"pair": "BTC/USDT", "verdict_text": "SELL", "score": 20, "reasons": ["RSI"]}"#);
    h.pump(310);
    let id = h.desk.live_feed().entries().next().map(|e| e.id).unwrap();
    h.desk.apply(UserAction::SelectEntry(id), 320);

    h.respond(ApiResponse::Signal {
        instrument: eur,
        timeframe: Timeframe::M5,
        generation,
        result: Ok(SignalReport::default()),
    });
    h.pump(500);

    match h.desk.signal_view() {
        SignalView::Ready { instrument, timeframe, .. } => {
            assert_eq!(instrument.symbol(), "BTC/USDT");
            assert_eq!(*timeframe, Timeframe::M5);
        }
        other => panic!("unexpected view {:?}", other),
    }
    assert_eq!(h.desk.live_feed().len(), 1);
    assert_eq!(
        h.desk.selection().instrument.as_ref().map(|i| i.symbol()),
        Some("BTC/USDT")
    );
}

#[test]
fn missing_categories_do_not_break_the_catalog() {
    let h = Harness::loaded(r#"{"crypto": "not a list", "forex": [{"title": "Tokyo"}]}"#);
    assert!(h.desk.render_model(0).catalog.sections().is_empty());
}

#[test]
fn scanner_toggle_is_optimistic_and_rolls_back_on_failure() {
    let mut h = Harness::loaded(CATALOG);
    h.desk.apply(UserAction::ToggleScanner(ScannerCategory::Crypto), 0);
    assert!(h.desk.scanner_state().is_enabled(ScannerCategory::Crypto));

    let ApiRequest::ToggleScanner { generation, category } = h.transport.take().remove(0) else {
        panic!("expected a scanner toggle");
    };
    assert_eq!(category, ScannerCategory::Crypto);

    h.respond(ApiResponse::ScannerToggled {
        generation,
        result: Err(ApiError::Transport("down".into())),
    });
    h.pump(0);
    assert!(!h.desk.scanner_state().is_enabled(ScannerCategory::Crypto));
}

#[test]
fn stream_status_reaches_the_render_model() {
    let mut h = Harness::loaded(CATALOG);
    h.inbox
        .send(DeskEvent::Stream(StreamEvent::Status(ConnectionStatus::Connected)))
        .unwrap();
    h.push("not json at all");
    h.pump(0);

    let model = h.desk.render_model(0);
    assert_eq!(model.stream_status, ConnectionStatus::Connected);
    assert!(model.live_feed.is_empty());
}
