use {
    crate::domain::{Instrument, InstrumentKey},
    serde::{Deserialize, Deserializer, de::DeserializeOwned},
    serde_json::Value,
    strum_macros::Display,
};

// --- WIRE SHAPE ---

/// `/api/get_pairs` body. Every field is optional and a field of the wrong type is treated as
/// missing, so a partly broken payload still loads everything that is usable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogPayload {
    #[serde(deserialize_with = "lenient")]
    pub forex: Vec<ForexSession>,
    #[serde(deserialize_with = "lenient_symbols")]
    pub crypto: Vec<String>,
    #[serde(deserialize_with = "lenient_symbols")]
    pub commodities: Vec<String>,
    #[serde(deserialize_with = "lenient_symbols")]
    pub stocks: Vec<String>,
    #[serde(deserialize_with = "lenient_symbols")]
    pub watchlist: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForexSession {
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient_symbols")]
    pub pairs: Vec<String>,
}

impl CatalogPayload {
    /// Only fails when the body is not JSON at all.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the string items of an array and skips anything else.
fn lenient_symbols<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .filter(|s| !s.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

// --- DOMAIN SHAPE ---

fn to_instruments(symbols: &[String]) -> Vec<Instrument> {
    symbols.iter().map(|s| Instrument::new(s.as_str())).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SectionKind {
    #[strum(to_string = "Forex")]
    ForexSession,
    #[strum(to_string = "💎 Crypto")]
    Crypto,
    #[strum(to_string = "🥇 Commodities")]
    Commodities,
    #[strum(to_string = "📈 Stocks / Indices")]
    Stocks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSection {
    pub title: String,
    pub kind: SectionKind,
    pub instruments: Vec<Instrument>,
}

/// Display-ordered partition of every known instrument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub sections: Vec<CatalogSection>,
}

impl Catalog {
    fn from_payload(payload: &CatalogPayload) -> Self {
        let mut sections: Vec<CatalogSection> = payload
            .forex
            .iter()
            .map(|session| CatalogSection {
                title: if session.title.trim().is_empty() {
                    SectionKind::ForexSession.to_string()
                } else {
                    session.title.clone()
                },
                kind: SectionKind::ForexSession,
                instruments: to_instruments(&session.pairs),
            })
            .collect();

        for (kind, symbols) in [
            (SectionKind::Crypto, &payload.crypto),
            (SectionKind::Commodities, &payload.commodities),
            (SectionKind::Stocks, &payload.stocks),
        ] {
            sections.push(CatalogSection {
                title: kind.to_string(),
                kind,
                instruments: to_instruments(symbols),
            });
        }

        Self { sections }
    }

    fn section_of(&self, kind: SectionKind) -> impl Iterator<Item = &Instrument> {
        self.sections
            .iter()
            .filter(move |s| s.kind == kind)
            .flat_map(|s| s.instruments.iter())
    }

    /// Every instrument in the order used for display-form resolution:
    /// forex sessions, crypto, stocks, commodities.
    pub fn known_instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.section_of(SectionKind::ForexSession)
            .chain(self.section_of(SectionKind::Crypto))
            .chain(self.section_of(SectionKind::Stocks))
            .chain(self.section_of(SectionKind::Commodities))
    }
}

/// Instrument taxonomy plus the favorites set.
/// Pure in-memory state: all I/O and all favorite writes go through the desk's coordinator.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalog: Catalog,
    // Insertion ordered; new favorites append to the end.
    favorites: Vec<InstrumentKey>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog and the favorites set from a fetched payload.
    pub fn load(&mut self, payload: &CatalogPayload) -> &Catalog {
        self.catalog = Catalog::from_payload(payload);
        self.favorites.clear();
        for symbol in &payload.watchlist {
            let key = InstrumentKey::from_symbol(symbol);
            if !self.favorites.contains(&key) {
                self.favorites.push(key);
            }
        }
        &self.catalog
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &[InstrumentKey] {
        &self.favorites
    }

    pub fn is_favorite(&self, key: &InstrumentKey) -> bool {
        self.favorites.contains(key)
    }

    /// Mutates favorites only; category membership is never touched.
    pub fn set_favorite(&mut self, key: &InstrumentKey, favorite: bool) {
        let present = self.favorites.iter().position(|k| k == key);
        match (favorite, present) {
            (true, None) => self.favorites.push(key.clone()),
            (false, Some(idx)) => {
                self.favorites.remove(idx);
            }
            _ => {}
        }
    }

    /// Display form for a normalized key, or the key itself when no known instrument matches
    /// (e.g. a favorite that has since left the catalog).
    pub fn display_for(&self, key: &InstrumentKey) -> Instrument {
        self.catalog
            .known_instruments()
            .find(|i| &i.key() == key)
            .cloned()
            .unwrap_or_else(|| Instrument::new(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_from(json: &str) -> CatalogStore {
        let mut store = CatalogStore::new();
        store.load(&CatalogPayload::from_json(json).unwrap());
        store
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let store = store_from(r#"{"crypto": ["BTC/USDT"]}"#);
        let crypto: Vec<_> = store
            .catalog()
            .sections
            .iter()
            .filter(|s| s.kind == SectionKind::Crypto)
            .collect();
        assert_eq!(crypto.len(), 1);
        assert_eq!(crypto[0].instruments, vec![Instrument::new("BTC/USDT")]);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn wrong_types_never_fail_the_load() {
        let store = store_from(
            r#"{"forex": {"oops": 1}, "crypto": ["ETH/USDT", 7, null], "stocks": "AAPL",
                "watchlist": null}"#,
        );
        let known: Vec<_> = store.catalog().known_instruments().cloned().collect();
        assert_eq!(known, vec![Instrument::new("ETH/USDT")]);

        let store = store_from(r#"[1, 2, 3]"#);
        assert_eq!(store.catalog().known_instruments().count(), 0);
    }

    #[test]
    fn session_without_pairs_is_empty() {
        let store = store_from(r#"{"forex": [{"title": "London"}]}"#);
        let london = &store.catalog().sections[0];
        assert_eq!(london.title, "London");
        assert!(london.instruments.is_empty());
    }

    #[test]
    fn watchlist_is_normalized_and_deduplicated() {
        let store = store_from(r#"{"watchlist": ["EUR/USD", "EURUSD", "BTCUSDT"]}"#);
        let keys: Vec<_> = store.favorites().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["EURUSD", "BTCUSDT"]);
    }

    #[test]
    fn set_favorite_only_touches_favorites() {
        let mut store = store_from(r#"{"crypto": ["BTC/USDT"]}"#);
        let before = store.catalog().clone();
        let key = InstrumentKey::from_symbol("BTC/USDT");

        store.set_favorite(&key, true);
        store.set_favorite(&key, true);
        assert!(store.is_favorite(&key));
        assert_eq!(store.favorites().len(), 1);

        store.set_favorite(&key, false);
        assert!(!store.is_favorite(&key));
        assert_eq!(store.catalog(), &before);
    }

    #[test]
    fn display_form_resolves_from_key_with_fallback() {
        let store = store_from(
            r#"{"forex": [{"title": "London", "pairs": ["EUR/USD"]}], "watchlist": ["EURUSD", "XAUUSD"]}"#,
        );
        assert_eq!(
            store.display_for(&InstrumentKey::from_symbol("EURUSD")).symbol(),
            "EUR/USD"
        );
        assert_eq!(
            store.display_for(&InstrumentKey::from_symbol("XAUUSD")).symbol(),
            "XAUUSD"
        );
    }
}
