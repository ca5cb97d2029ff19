mod core;
mod favorites;
mod live_feed;
mod lookup;
mod messages;
mod scanner;
mod scheduler;

pub use core::{CatalogStatus, Selection, SignalDesk, UserAction};
pub use favorites::{FavoriteCoordinator, Settlement};
pub use live_feed::{EntryId, FeedStats, LiveFeed, LiveSignalEntry};
pub use lookup::{LookupPipeline, SignalSource, SignalView};
pub use messages::{ApiRequest, ApiResponse, DeskEvent, DeskTimer, Generation, StreamEvent};
pub use scanner::ScannerCoordinator;
pub use scheduler::{Scheduler, TimerId};
