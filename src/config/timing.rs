//! Time windows used by the desk (all in milliseconds).

pub struct TimingConfig {
    /// Absolute lifetime of a live signal entry, measured from creation.
    pub live_entry_lifetime_ms: i64,
    /// Trailing part of the lifetime during which an entry is drawn fading out.
    pub live_entry_fade_ms: i64,
    /// Quiet period before a signal lookup is actually sent.
    pub lookup_debounce_ms: i64,
    /// Quiet period before a new search text is applied to the catalog.
    pub search_debounce_ms: i64,
    /// Hard cap on visible live entries. Oldest is evicted first.
    pub live_feed_capacity: usize,
    /// Longest the UI sleeps between frames while waiting for network results.
    pub ui_poll_ms: i64,
}

pub const TIMING: TimingConfig = TimingConfig {
    live_entry_lifetime_ms: 300_000, // 5 minutes
    live_entry_fade_ms: 500,
    lookup_debounce_ms: 300,
    search_debounce_ms: 300,
    live_feed_capacity: 50,
    ui_poll_ms: 250,
};
