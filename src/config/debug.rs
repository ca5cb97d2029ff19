//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit verbose logging for the SSE connection and every inbound frame.
    pub log_stream_frames: bool,

    /// Log every request handed to the transport.
    pub log_dispatch: bool,

    /// Log optimistic writes, reconciliations and rollbacks.
    pub log_favorites: bool,

    /// Log debounce arming, dispatch and dropped (superseded) lookup responses.
    pub log_lookup: bool,

    /// Log entry creation / expiry / dismissal in the live feed.
    pub log_live_feed: bool,

    /// Anything about the Selection Context
    pub log_selection: bool,
}

pub const DF: LogFlags = LogFlags {
    log_selection: true,
    log_favorites: true,

    log_lookup: false,
    log_live_feed: false,
    log_dispatch: false,
    log_stream_frames: false,
};
