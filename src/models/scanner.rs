use {
    crate::domain::ScannerCategory,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
    strum::IntoEnumIterator,
};

/// Server-side scanner switches, one per category. Unknown keys from the server are ignored and
/// missing ones read as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScannerState {
    enabled: BTreeMap<ScannerCategory, bool>,
}

impl ScannerState {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(body)?;
        let enabled = ScannerCategory::iter()
            .filter_map(|cat| {
                raw.get(&cat.to_string())
                    .and_then(|v| v.as_bool())
                    .map(|on| (cat, on))
            })
            .collect();
        Ok(Self { enabled })
    }

    pub fn is_enabled(&self, category: ScannerCategory) -> bool {
        self.enabled.get(&category).copied().unwrap_or(false)
    }

    pub fn set(&mut self, category: ScannerCategory, on: bool) {
        self.enabled.insert(category, on);
    }

    pub fn toggled(&self, category: ScannerCategory) -> Self {
        let mut next = self.clone();
        next.set(category, !self.is_enabled(category));
        next
    }
}
