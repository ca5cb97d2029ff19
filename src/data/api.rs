use {
    crate::{
        config::API,
        data::{ApiError, Session},
        domain::{Instrument, ScannerCategory, Timeframe},
        models::{CatalogPayload, FavoriteAck, ScannerState, SignalReport},
    },
    async_trait::async_trait,
    reqwest::Method,
    std::time::Duration,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Abstract interface for the signal server's request/response endpoints.
#[async_trait]
pub trait SignalApi: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, ApiError>;

    async fn scanner_status(&self) -> Result<ScannerState, ApiError>;

    async fn toggle_scanner(&self, category: ScannerCategory) -> Result<ScannerState, ApiError>;

    /// `Ok` only when the server accepted the toggle.
    async fn toggle_favorite(&self, instrument: &Instrument) -> Result<FavoriteAck, ApiError>;

    async fn fetch_signal(
        &self,
        instrument: &Instrument,
        timeframe: Timeframe,
    ) -> Result<SignalReport, ApiError>;
}

pub struct HttpSignalApi {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpSignalApi {
    pub fn new(base_url: impl Into<String>, session: Session) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(API.client.user_agent)
            .timeout(Duration::from_millis(API.client.timeout_ms))
            .connect_timeout(Duration::from_millis(API.client.connect_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Sends one call and returns the body of a successful response.
    /// Non-success statuses become [`ApiError::Status`] with the body's `error` text if present.
    async fn call(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        #[cfg(debug_assertions)]
        if DF.log_dispatch {
            log::info!("-> {} {} {:?}", method, url, params);
        }

        let response = self
            .http
            .request(method, &url)
            .query(params)
            .query(&self.session.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }
}

#[async_trait]
impl SignalApi for HttpSignalApi {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, ApiError> {
        let body = self.call(Method::GET, API.endpoints.catalog, &[]).await?;
        Ok(CatalogPayload::from_json(&body)?)
    }

    async fn scanner_status(&self) -> Result<ScannerState, ApiError> {
        let body = self
            .call(Method::GET, API.endpoints.scanner_status, &[])
            .await?;
        Ok(ScannerState::from_json(&body)?)
    }

    async fn toggle_scanner(&self, category: ScannerCategory) -> Result<ScannerState, ApiError> {
        let body = self
            .call(
                Method::POST,
                API.endpoints.scanner_toggle,
                &[("category", category.to_string())],
            )
            .await?;
        Ok(ScannerState::from_json(&body)?)
    }

    async fn toggle_favorite(&self, instrument: &Instrument) -> Result<FavoriteAck, ApiError> {
        let body = self
            .call(
                Method::GET,
                API.endpoints.favorite_toggle,
                &[("pair", instrument.symbol().to_string())],
            )
            .await?;
        accept_favorite_ack(&body)
    }

    async fn fetch_signal(
        &self,
        instrument: &Instrument,
        timeframe: Timeframe,
    ) -> Result<SignalReport, ApiError> {
        let body = self
            .call(
                Method::GET,
                API.endpoints.signal,
                &[
                    ("pair", instrument.symbol().to_string()),
                    ("timeframe", timeframe.as_param()),
                ],
            )
            .await?;
        accept_signal_report(&body)
    }
}

pub(crate) fn accept_favorite_ack(body: &str) -> Result<FavoriteAck, ApiError> {
    let ack: FavoriteAck = serde_json::from_str(body)?;
    if !ack.success {
        return Err(ApiError::Rejected(
            ack.error.unwrap_or_else(|| "toggle rejected".to_string()),
        ));
    }
    Ok(ack)
}

/// A 200 carrying `{error}` is still a failed lookup.
pub(crate) fn accept_signal_report(body: &str) -> Result<SignalReport, ApiError> {
    let report: SignalReport = serde_json::from_str(body)?;
    match report.error {
        Some(reason) => Err(ApiError::Rejected(reason)),
        None => Ok(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_ack_rejections() {
        assert!(accept_favorite_ack(r#"{"success": true}"#).is_ok());
        assert_eq!(
            accept_favorite_ack(r#"{"success": false, "error": "Failed to update watchlist."}"#),
            Err(ApiError::Rejected("Failed to update watchlist.".into()))
        );
        assert!(matches!(
            accept_favorite_ack(r#"{"ok": 1}"#),
            Err(ApiError::Protocol(_))
        ));
        assert!(matches!(accept_favorite_ack(""), Err(ApiError::Protocol(_))));
    }

    #[test]
    fn signal_body_with_error_is_rejected() {
        assert_eq!(
            accept_signal_report(r#"{"error": "pair is required"}"#),
            Err(ApiError::Rejected("pair is required".into()))
        );
        let report =
            accept_signal_report(r#"{"pair": "EUR/USD", "price": 1.1, "score": 40}"#).unwrap();
        assert_eq!(report.score(), 40);
        assert!(matches!(accept_signal_report(r#""oops""#), Err(ApiError::Protocol(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpSignalApi::new("https://desk.example.com/", Session::anonymous()).unwrap();
        assert_eq!(api.base_url, "https://desk.example.com");
    }
}
