mod catalog;
mod favorite;
mod scanner;
mod signal;

pub use {
    catalog::{Catalog, CatalogPayload, CatalogSection, CatalogStore, ForexSession, SectionKind},
    favorite::FavoriteAck,
    scanner::ScannerState,
    signal::{SignalReport, StreamMessage, Tone},
};
