use strum::IntoEnumIterator;

use crate::config::TIMING;
use crate::data::ConnectionStatus;
use crate::domain::{Instrument, ScannerCategory, Timeframe};
use crate::engine::{CatalogStatus, LiveFeed, LiveSignalEntry, SignalSource, SignalView};
use crate::models::{CatalogStore, ScannerState, SignalReport};

use super::render_model::{
    CatalogPanel, LiveEntryView, PairItem, RenderModel, ReportView, ScannerButton, SectionView,
    SignalPanel,
};

pub const FAVORITES_TITLE: &str = "⭐ Favorites";

/// Borrowed view of the desk state the projector reads.
pub struct ProjectionInput<'a> {
    pub store: &'a CatalogStore,
    pub catalog_status: &'a CatalogStatus,
    pub filter: &'a str,
    pub view: &'a SignalView,
    pub timeframe: Timeframe,
    pub live_feed: &'a LiveFeed,
    pub scanner: &'a ScannerState,
    pub stream_status: ConnectionStatus,
}

pub fn project(input: &ProjectionInput, now_ms: i64) -> RenderModel {
    RenderModel {
        catalog: project_catalog(input.store, input.catalog_status, input.filter),
        signal: project_signal(input.view),
        live_feed: input
            .live_feed
            .entries()
            .map(|entry| project_entry(entry, now_ms))
            .collect(),
        scanner: project_scanner(input.scanner),
        timeframe: input.timeframe,
        stream_status: input.stream_status,
    }
}

pub fn project_catalog(store: &CatalogStore, status: &CatalogStatus, filter: &str) -> CatalogPanel {
    match status {
        CatalogStatus::Loading => return CatalogPanel::Loading,
        CatalogStatus::Failed(reason) => return CatalogPanel::Failed(reason.clone()),
        CatalogStatus::Ready => {}
    }

    let query = filter.trim().to_lowercase();
    let item = |instrument: &Instrument| PairItem {
        instrument: instrument.clone(),
        label: instrument.symbol().to_string(),
        favorite: store.is_favorite(&instrument.key()),
    };

    let favorites: Vec<PairItem> = store
        .favorites()
        .iter()
        .map(|key| store.display_for(key))
        .filter(|instrument| instrument.matches(&query))
        .map(|instrument| item(&instrument))
        .collect();

    let mut sections = Vec::new();
    if !favorites.is_empty() {
        sections.push(SectionView {
            title: FAVORITES_TITLE.to_string(),
            is_favorites: true,
            items: favorites,
        });
    }

    for section in &store.catalog().sections {
        let items: Vec<PairItem> = section
            .instruments
            .iter()
            .filter(|instrument| instrument.matches(&query))
            .map(&item)
            .collect();
        if items.is_empty() {
            continue;
        }
        sections.push(SectionView {
            title: section.title.clone(),
            is_favorites: false,
            items,
        });
    }

    CatalogPanel::Sections(sections)
}

pub fn project_signal(view: &SignalView) -> SignalPanel {
    match view {
        SignalView::Idle => SignalPanel::Idle,
        SignalView::Loading { instrument } => SignalPanel::Loading {
            label: instrument.to_string(),
        },
        SignalView::Failed { instrument, reason } => SignalPanel::Error {
            label: instrument.to_string(),
            reason: reason.clone(),
        },
        SignalView::Ready {
            instrument,
            timeframe,
            report,
            source,
        } => SignalPanel::Report(report_view(instrument, *timeframe, report, *source)),
    }
}

fn report_view(
    instrument: &Instrument,
    timeframe: Timeframe,
    report: &SignalReport,
    source: SignalSource,
) -> ReportView {
    let score = report.score();
    ReportView {
        label: instrument.to_string(),
        timeframe,
        price: report.price_label(),
        tone: report.tone(),
        verdict: report.verdict().to_string(),
        score,
        bulls: format!("{}%", score),
        bears: format!("{}%", 100 - score),
        reasons: report.reasons.clone(),
        from_live_feed: source == SignalSource::LiveFeed,
    }
}

pub fn project_entry(entry: &LiveSignalEntry, now_ms: i64) -> LiveEntryView {
    LiveEntryView {
        id: entry.id,
        label: entry.instrument.to_string(),
        verdict: entry.verdict().to_string(),
        score: entry.score(),
        tone: entry.tone(),
        created_at_ms: entry.created_at_ms,
        expires_in_ms: (entry.expires_at_ms() - now_ms).max(0),
        opacity: entry_opacity(entry.expires_at_ms(), now_ms),
    }
}

pub fn entry_opacity(expires_at_ms: i64, now_ms: i64) -> f32 {
    let remaining = expires_at_ms - now_ms;
    if remaining >= TIMING.live_entry_fade_ms {
        1.0
    } else if remaining <= 0 {
        0.0
    } else {
        remaining as f32 / TIMING.live_entry_fade_ms as f32
    }
}

fn project_scanner(state: &ScannerState) -> Vec<ScannerButton> {
    ScannerCategory::iter()
        .map(|category| ScannerButton {
            category,
            enabled: state.is_enabled(category),
        })
        .collect()
}
