use {
    crate::{config::SIGNAL, domain::Instrument},
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

/// Market bias derived from a 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Tone {
    Bullish,
    Neutral,
    Bearish,
}

impl Tone {
    pub fn from_score(score: u8) -> Self {
        if score >= SIGNAL.bullish_min_score {
            Tone::Bullish
        } else if score <= SIGNAL.bearish_max_score {
            Tone::Bearish
        } else {
            Tone::Neutral
        }
    }
}

/// Shape shared by `/api/signal` responses and live stream pushes.
/// Every field is optional on the wire; accessors apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalReport {
    pub pair: Option<String>,
    pub price: Option<f64>,
    pub verdict_text: Option<String>,
    pub score: Option<f64>,
    pub reasons: Vec<String>,
    /// Set by the server instead of the other fields when analysis failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Keepalive marker on the live stream.
    #[serde(rename = "_ping", skip_serializing_if = "std::ops::Not::not")]
    pub ping: bool,
}

impl SignalReport {
    pub fn instrument(&self) -> Option<Instrument> {
        self.pair
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(Instrument::new)
    }

    /// Score clamped into 0..=100; falls back to the neutral default when absent or not a number.
    pub fn score(&self) -> u8 {
        match self.score {
            Some(s) if s.is_finite() => s.round().clamp(0.0, 100.0) as u8,
            _ => SIGNAL.default_score,
        }
    }

    pub fn tone(&self) -> Tone {
        Tone::from_score(self.score())
    }

    pub fn verdict(&self) -> &str {
        self.verdict_text
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(SIGNAL.default_verdict)
    }

    /// Price with fixed decimals, or `N/A` when the server sent none (or zero).
    pub fn price_label(&self) -> String {
        match self.price {
            Some(p) if p.is_finite() && p != 0.0 => format!("{:.*}", SIGNAL.price_decimals, p),
            _ => "N/A".to_string(),
        }
    }
}

/// Outcome of decoding one live stream message.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    Signal(SignalReport),
    /// Keepalive or payload without an instrument: nothing to render.
    Control,
    Malformed(String),
}

impl StreamMessage {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<SignalReport>(raw) {
            Ok(report) if report.ping || report.instrument().is_none() => StreamMessage::Control,
            Ok(report) => StreamMessage::Signal(report),
            Err(e) => StreamMessage::Malformed(e.to_string()),
        }
    }
}
