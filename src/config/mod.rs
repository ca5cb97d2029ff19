//! Configuration module for the signal desk.

// Can all be private now because we have a public re-export.
mod api;
mod debug;
mod signal;
mod timing;

// Re-export commonly used items
pub use api::API;
pub use debug::DF;
pub use signal::SIGNAL;
pub use timing::TIMING;
