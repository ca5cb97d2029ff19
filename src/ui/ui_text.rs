use std::sync::LazyLock;

pub const ICON_STAR: &str = "★";
pub const ICON_STAR_EMPTY: &str = "☆";
pub const ICON_CLOSE: &str = "✖";
pub const ICON_SEARCH: &str = "🔍";
pub const ICON_LIVE: &str = "📡";
pub const ICON_WARNING: &str = "⚠";

pub struct UiText {
    pub app_title: String,

    // --- Top bar ---
    pub tb_search_hint: String,
    pub tb_timeframe: String,
    pub tb_scanner: String,

    // --- Catalog panel ---
    pub cat_heading: String,
    pub cat_loading: String,
    pub cat_failed: String,
    pub cat_no_matches: String,
    pub icon_favorite_on: String,
    pub icon_favorite_off: String,
    pub hover_toggle_favorite: String,

    // --- Signal panel ---
    pub sig_select_pair: String,
    pub sig_analyzing: String,
    pub sig_error_prefix: String,
    pub sig_price: String,
    pub sig_bulls: String,
    pub sig_bears: String,
    pub sig_reasons: String,
    pub sig_from_live_feed: String,

    // --- Live feed ---
    pub feed_heading: String,
    pub feed_empty: String,
    pub hover_dismiss: String,
    pub hover_open_entry: String,
    pub icon_dismiss: String,

    // --- Status bar ---
    pub status_connected: String,
    pub status_connecting: String,
    pub status_disconnected: String,
    pub status_expires_in: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Signal Desk".to_string(),

    tb_search_hint: format!("{} Search pairs", ICON_SEARCH),
    tb_timeframe: "Timeframe".to_string(),
    tb_scanner: "Scanner".to_string(),

    cat_heading: "Instruments".to_string(),
    cat_loading: "Loading instruments...".to_string(),
    cat_failed: format!("{} Could not load instruments", ICON_WARNING),
    cat_no_matches: "No pairs match your search.".to_string(),
    icon_favorite_on: ICON_STAR.to_string(),
    icon_favorite_off: ICON_STAR_EMPTY.to_string(),
    hover_toggle_favorite: "Add to / remove from favorites".to_string(),

    sig_select_pair: "Select a pair to get a signal.".to_string(),
    sig_analyzing: "Analyzing".to_string(),
    sig_error_prefix: ICON_WARNING.to_string(),
    sig_price: "Price".to_string(),
    sig_bulls: "Bulls".to_string(),
    sig_bears: "Bears".to_string(),
    sig_reasons: "Reasons".to_string(),
    sig_from_live_feed: format!("{} from live feed", ICON_LIVE),

    feed_heading: format!("{} Live signals", ICON_LIVE),
    feed_empty: "Waiting for signals...".to_string(),
    hover_dismiss: "Dismiss".to_string(),
    hover_open_entry: "Show this signal".to_string(),
    icon_dismiss: ICON_CLOSE.to_string(),

    status_connected: "Live stream connected".to_string(),
    status_connecting: "Connecting to live stream...".to_string(),
    status_disconnected: "Live stream disconnected, retrying".to_string(),
    status_expires_in: "expires in".to_string(),
});
