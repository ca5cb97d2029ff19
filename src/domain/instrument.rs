use serde::{Deserialize, Serialize};

/// Canonical set-membership key for an instrument: the display symbol with every `/` stripped.
/// `"EUR/USD"` and `"EURUSD"` share the key `EURUSD`.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct InstrumentKey(String);

impl InstrumentKey {
    pub fn from_symbol(symbol: &str) -> Self {
        Self(symbol.replace('/', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An instrument as the server names it in the catalog (e.g. `EUR/USD`, `BTC/USDT`, `AAPL`).
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct Instrument {
    symbol: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Display form, exactly as received.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn key(&self) -> InstrumentKey {
        InstrumentKey::from_symbol(&self.symbol)
    }

    /// Case-insensitive substring match against the display form or the normalized key.
    /// `query_lower` must already be lowercase.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        let display = self.symbol.to_lowercase();
        display.contains(query_lower) || display.replace('/', "").contains(query_lower)
    }
}

impl From<&str> for Instrument {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}
