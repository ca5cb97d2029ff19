//! Signal presentation thresholds.

pub struct SignalConfig {
    /// Scores at or above this are bullish.
    pub bullish_min_score: u8,
    /// Scores at or below this are bearish.
    pub bearish_max_score: u8,
    /// Used when a pushed signal carries no score.
    pub default_score: u8,
    pub default_verdict: &'static str,
    pub price_decimals: usize,
}

pub const SIGNAL: SignalConfig = SignalConfig {
    bullish_min_score: 65,
    bearish_max_score: 35,
    default_score: 50,
    default_verdict: "...",
    price_decimals: 5,
};
