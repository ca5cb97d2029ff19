use crate::config::API;

/// Opaque session credential issued by the host. Absent for anonymous sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    init_data: Option<String>,
}

impl Session {
    pub fn new(init_data: Option<String>) -> Self {
        Self {
            init_data: init_data.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.init_data.is_none()
    }

    /// Query pairs to append to every outbound call.
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        self.init_data
            .iter()
            .map(|d| (API.credential_param, d.clone()))
            .collect()
    }
}
