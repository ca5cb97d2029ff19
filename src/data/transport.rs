use {
    crate::{
        data::SignalApi,
        engine::{ApiRequest, ApiResponse, DeskEvent},
    },
    anyhow::Context,
    std::sync::{Arc, mpsc::Sender},
    tokio::runtime::{Builder, Handle, Runtime},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Fire-and-forget request execution. The response comes back later as a
/// [`DeskEvent::Api`] on the desk's inbound channel; nothing is returned synchronously.
pub trait Transport {
    fn dispatch(&self, request: ApiRequest);
}

/// Runs requests on a private tokio runtime and posts each settled response to the desk.
pub struct RuntimeTransport {
    api: Arc<dyn SignalApi>,
    runtime: Runtime,
    events: Sender<DeskEvent>,
}

impl RuntimeTransport {
    pub fn new(api: Arc<dyn SignalApi>, events: Sender<DeskEvent>) -> anyhow::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("signal-desk-io")
            .enable_all()
            .build()
            .context("Failed to create network runtime")?;
        Ok(Self {
            api,
            runtime,
            events,
        })
    }

    /// For other long-running I/O (the live stream) that should share this runtime.
    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}

impl Transport for RuntimeTransport {
    fn dispatch(&self, request: ApiRequest) {
        #[cfg(debug_assertions)]
        if DF.log_dispatch {
            log::info!("Dispatching {:?}", request);
        }

        let api = self.api.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let response = execute(api.as_ref(), request).await;
            // Receiver gone means the desk shut down; nothing left to notify.
            let _ = events.send(DeskEvent::Api(response));
        });
    }
}

/// Perform one request and tag the outcome with the request's slot identity.
pub async fn execute(api: &dyn SignalApi, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::FetchCatalog => ApiResponse::Catalog(api.fetch_catalog().await),
        ApiRequest::FetchScannerStatus => ApiResponse::ScannerStatus(api.scanner_status().await),
        ApiRequest::ToggleScanner {
            category,
            generation,
        } => ApiResponse::ScannerToggled {
            generation,
            result: api.toggle_scanner(category).await,
        },
        ApiRequest::ToggleFavorite {
            instrument,
            generation,
        } => {
            let result = api.toggle_favorite(&instrument).await;
            ApiResponse::FavoriteToggled {
                instrument,
                generation,
                result,
            }
        }
        ApiRequest::LookupSignal {
            instrument,
            timeframe,
            generation,
        } => {
            let result = api.fetch_signal(&instrument, timeframe).await;
            ApiResponse::Signal {
                instrument,
                timeframe,
                generation,
                result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ApiError;
    use crate::domain::{Instrument, ScannerCategory, Timeframe};
    use crate::models::{CatalogPayload, FavoriteAck, ScannerState, SignalReport};
    use async_trait::async_trait;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    struct CannedApi;

    #[async_trait]
    impl SignalApi for CannedApi {
        async fn fetch_catalog(&self) -> Result<CatalogPayload, ApiError> {
            Ok(CatalogPayload::from_json(r#"{"crypto": ["BTC/USDT"]}"#)?)
        }

        async fn scanner_status(&self) -> Result<ScannerState, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }

        async fn toggle_scanner(&self, category: ScannerCategory) -> Result<ScannerState, ApiError> {
            Ok(ScannerState::default().toggled(category))
        }

        async fn toggle_favorite(&self, _instrument: &Instrument) -> Result<FavoriteAck, ApiError> {
            Err(ApiError::Rejected("nope".into()))
        }

        async fn fetch_signal(
            &self,
            instrument: &Instrument,
            _timeframe: Timeframe,
        ) -> Result<SignalReport, ApiError> {
            Ok(SignalReport {
                pair: Some(instrument.symbol().to_string()),
                score: Some(70.0),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn execute_echoes_slot_identity() {
        let response = execute(
            &CannedApi,
            ApiRequest::LookupSignal {
                instrument: Instrument::new("EUR/USD"),
                timeframe: Timeframe::M5,
                generation: 7,
            },
        )
        .await;

        match response {
            ApiResponse::Signal {
                instrument,
                timeframe,
                generation,
                result,
            } => {
                assert_eq!(instrument, Instrument::new("EUR/USD"));
                assert_eq!(timeframe, Timeframe::M5);
                assert_eq!(generation, 7);
                assert_eq!(result.map(|r| r.score()), Ok(70));
            }
            other => panic!("unexpected response {:?}", other),
        }

        let response = execute(
            &CannedApi,
            ApiRequest::ToggleFavorite {
                instrument: Instrument::new("BTC/USDT"),
                generation: 3,
            },
        )
        .await;
        assert!(matches!(
            response,
            ApiResponse::FavoriteToggled {
                generation: 3,
                result: Err(ApiError::Rejected(_)),
                ..
            }
        ));
    }

    #[test]
    fn runtime_transport_posts_responses_to_the_desk_channel() {
        let (tx, rx) = channel();
        let transport = RuntimeTransport::new(Arc::new(CannedApi), tx).unwrap();

        transport.dispatch(ApiRequest::FetchScannerStatus);

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            event,
            DeskEvent::Api(ApiResponse::ScannerStatus(Err(ApiError::Transport(
                "offline".into()
            ))))
        );
    }
}
