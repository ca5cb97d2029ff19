use {
    crate::{
        config::API,
        data::{Session, SseDecoder},
        engine::{DeskEvent, StreamEvent},
    },
    futures::StreamExt,
    reqwest::header::{ACCEPT, CACHE_CONTROL},
    std::{sync::mpsc::Sender, time::Duration},
    tokio::{runtime::Handle, time::sleep},
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Connecting,
    Disconnected,
}

/// How one connection attempt ended.
enum StreamEnd {
    /// Server closed the stream; reconnect.
    Closed,
    /// Desk dropped its receiver; stop for good.
    ReceiverGone,
}

/// Owns the server-sent signal feed. Subscribes once and keeps reconnecting with exponential
/// backoff; every decoded `data` payload is forwarded to the desk untouched.
pub struct SignalStreamManager {
    url: String,
    session: Session,
}

impl SignalStreamManager {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                API.endpoints.signal_stream
            ),
            session,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn subscribe(&self, runtime: &Handle, events: Sender<DeskEvent>) -> anyhow::Result<()> {
        // No total timeout: the response body is meant to stay open indefinitely.
        let http = reqwest::Client::builder()
            .user_agent(API.client.user_agent)
            .connect_timeout(Duration::from_millis(API.client.connect_timeout_ms))
            .build()?;
        let url = self.url.clone();
        let query = self.session.query();

        runtime.spawn(async move {
            run_stream_with_reconnect(http, url, query, events).await;
        });
        Ok(())
    }
}

async fn run_stream_with_reconnect(
    http: reqwest::Client,
    url: String,
    query: Vec<(&'static str, String)>,
    events: Sender<DeskEvent>,
) {
    let mut reconnect_delay = API.stream.initial_reconnect_delay_sec;

    loop {
        if send_status(&events, ConnectionStatus::Connecting).is_err() {
            return;
        }

        #[cfg(debug_assertions)]
        if DF.log_stream_frames {
            log::info!("Attempting connection to signal stream {}", url);
        }

        match run_stream(&http, &url, &query, &events).await {
            Ok(StreamEnd::ReceiverGone) => return,
            Ok(StreamEnd::Closed) => {
                log::warn!("Signal stream closed by server. Reconnecting...");
                reconnect_delay = API.stream.initial_reconnect_delay_sec;
            }
            Err(e) => {
                log::error!(
                    "Signal stream failed: {:#}. Retrying in {}s...",
                    e,
                    reconnect_delay
                );
                if events
                    .send(DeskEvent::Stream(StreamEvent::Error(format!("{:#}", e))))
                    .is_err()
                {
                    return;
                }
            }
        }

        if send_status(&events, ConnectionStatus::Disconnected).is_err() {
            return;
        }

        sleep(Duration::from_secs(reconnect_delay)).await;
        reconnect_delay = (reconnect_delay * 2).min(API.stream.max_reconnect_delay_sec);
    }
}

async fn run_stream(
    http: &reqwest::Client,
    url: &str,
    query: &[(&'static str, String)],
    events: &Sender<DeskEvent>,
) -> anyhow::Result<StreamEnd> {
    let response = http
        .get(url)
        .query(query)
        .header(ACCEPT, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?
        .error_for_status()?;

    if send_status(events, ConnectionStatus::Connected).is_err() {
        return Ok(StreamEnd::ReceiverGone);
    }

    let mut decoder = SseDecoder::new();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for payload in decoder.feed(&chunk) {
            #[cfg(debug_assertions)]
            if DF.log_stream_frames {
                log::info!("[stream] {}", payload);
            }
            if events
                .send(DeskEvent::Stream(StreamEvent::Message(payload)))
                .is_err()
            {
                return Ok(StreamEnd::ReceiverGone);
            }
        }
    }

    Ok(StreamEnd::Closed)
}

fn send_status(
    events: &Sender<DeskEvent>,
    status: ConnectionStatus,
) -> Result<(), std::sync::mpsc::SendError<DeskEvent>> {
    events.send(DeskEvent::Stream(StreamEvent::Status(status)))
}
