// Domain types and value objects
mod instrument;
mod scanner_category;
mod timeframe;

pub use instrument::{Instrument, InstrumentKey};
pub use scanner_category::ScannerCategory;
pub use timeframe::Timeframe;
