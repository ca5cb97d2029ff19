use thiserror::Error;

/// Failure of one API call, reduced to what the desk needs to show or act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable, timeout, connection reset.
    #[error("network error: {0}")]
    Transport(String),
    /// Non-success HTTP status. `reason` is the server's `error` field when it sent one.
    #[error("{reason}")]
    Status { status: u16, reason: String },
    /// Body could not be decoded or lacks a required field.
    #[error("unexpected response: {0}")]
    Protocol(String),
    /// Server answered but refused the operation (`success: false`, or an `error` body).
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Text shown to the user.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Build the status variant from an error body, falling back to `HTTP <status>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let reason = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Status { status, reason }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Protocol(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Protocol(e.to_string())
    }
}
