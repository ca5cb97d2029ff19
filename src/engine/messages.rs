use crate::data::{ApiError, ConnectionStatus};
use crate::domain::{Instrument, ScannerCategory, Timeframe};
use crate::models::{CatalogPayload, FavoriteAck, ScannerState, SignalReport};

use super::live_feed::EntryId;

/// Monotonic request stamp. A response is applied only while its stamp is still the current one
/// for its slot (per-instrument favorite, the lookup pipeline, the scanner).
pub type Generation = u64;

/// An outbound call the desk asks the transport to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    FetchCatalog,
    FetchScannerStatus,
    ToggleScanner {
        category: ScannerCategory,
        generation: Generation,
    },
    ToggleFavorite {
        instrument: Instrument,
        generation: Generation,
    },
    LookupSignal {
        instrument: Instrument,
        timeframe: Timeframe,
        generation: Generation,
    },
}

/// The settled outcome of an [`ApiRequest`], echoing back whatever identifies its slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Catalog(Result<CatalogPayload, ApiError>),
    ScannerStatus(Result<ScannerState, ApiError>),
    ScannerToggled {
        generation: Generation,
        result: Result<ScannerState, ApiError>,
    },
    FavoriteToggled {
        instrument: Instrument,
        generation: Generation,
        result: Result<FavoriteAck, ApiError>,
    },
    Signal {
        instrument: Instrument,
        timeframe: Timeframe,
        generation: Generation,
        result: Result<SignalReport, ApiError>,
    },
}

/// Things the live stream transport reports.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// One SSE `data` payload, still undecoded.
    Message(String),
    Status(ConnectionStatus),
    Error(String),
}

/// Everything that can arrive on the desk's inbound channel.
#[derive(Debug, Clone, PartialEq)]
pub enum DeskEvent {
    Api(ApiResponse),
    Stream(StreamEvent),
}

/// Work the desk has parked on its [`Scheduler`](super::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeskTimer {
    /// Lookup debounce elapsed: send the last requested instrument.
    DispatchLookup,
    /// A live entry reached the end of its lifetime.
    ExpireEntry(EntryId),
    /// Search debounce elapsed: apply the typed filter text.
    ApplySearch,
}
