use crate::data::ConnectionStatus;
use crate::domain::{Instrument, ScannerCategory, Timeframe};
use crate::engine::EntryId;
use crate::models::Tone;

/// Everything the host needs to draw one frame. Built fresh each time; holds no references
/// back into the desk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub catalog: CatalogPanel,
    pub signal: SignalPanel,
    pub live_feed: Vec<LiveEntryView>,
    pub scanner: Vec<ScannerButton>,
    pub timeframe: Timeframe,
    pub stream_status: ConnectionStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPanel {
    Loading,
    Failed(String),
    Sections(Vec<SectionView>),
}

impl CatalogPanel {
    pub fn sections(&self) -> &[SectionView] {
        match self {
            CatalogPanel::Sections(sections) => sections,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub is_favorites: bool,
    pub items: Vec<PairItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairItem {
    pub instrument: Instrument,
    pub label: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignalPanel {
    Idle,
    Loading { label: String },
    Report(ReportView),
    Error { label: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub label: String,
    pub timeframe: Timeframe,
    pub price: String,
    pub tone: Tone,
    pub verdict: String,
    pub score: u8,
    /// `"{score}%"`
    pub bulls: String,
    /// `"{100 - score}%"`
    pub bears: String,
    pub reasons: Vec<String>,
    pub from_live_feed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveEntryView {
    pub id: EntryId,
    pub label: String,
    pub verdict: String,
    pub score: u8,
    pub tone: Tone,
    pub created_at_ms: i64,
    pub expires_in_ms: i64,
    /// 1.0 until the fade window, then linearly down to 0.0 at expiry.
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerButton {
    pub category: ScannerCategory,
    pub enabled: bool,
}
