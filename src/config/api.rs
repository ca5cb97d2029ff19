//! Server endpoints and transport tuning.

pub struct Endpoints {
    pub catalog: &'static str,
    pub scanner_status: &'static str,
    pub scanner_toggle: &'static str,
    pub favorite_toggle: &'static str,
    pub signal: &'static str,
    pub signal_stream: &'static str,
}

pub struct StreamConfig {
    pub initial_reconnect_delay_sec: u64,
    pub max_reconnect_delay_sec: u64,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub user_agent: &'static str,
}

pub struct ApiConfig {
    pub fallback_base_url: &'static str,
    /// Query parameter the session credential travels in.
    pub credential_param: &'static str,
    pub endpoints: Endpoints,
    pub stream: StreamConfig,
    pub client: ClientDefaults,
}

pub const API: ApiConfig = ApiConfig {
    fallback_base_url: "https://fallback.example.com",
    credential_param: "initData",
    endpoints: Endpoints {
        catalog: "/api/get_pairs",
        scanner_status: "/api/scanner/status",
        scanner_toggle: "/api/scanner/toggle",
        favorite_toggle: "/api/toggle_watchlist",
        signal: "/api/signal",
        signal_stream: "/api/signal-stream",
    },
    stream: StreamConfig {
        initial_reconnect_delay_sec: 1,
        max_reconnect_delay_sec: 60,
    },
    client: ClientDefaults {
        timeout_ms: 30_000, // server side analysis can take a while
        connect_timeout_ms: 5_000,
        user_agent: "signal-desk/0.1",
    },
};
