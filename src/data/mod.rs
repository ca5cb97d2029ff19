mod api;
mod error;
mod session;
mod signal_stream;
mod sse;
mod transport;

pub use {
    api::{HttpSignalApi, SignalApi},
    error::ApiError,
    session::Session,
    signal_stream::{ConnectionStatus, SignalStreamManager},
    sse::SseDecoder,
    transport::{RuntimeTransport, Transport, execute},
};
