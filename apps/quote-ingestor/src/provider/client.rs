//! HTTP client for the provider's intraday endpoint.

use async_trait::async_trait;
use reqwest::Client;

use super::api_types::{IntradayResponse, RawTimeSeries};
use super::error::FetchError;
use crate::config::{ConfigError, Credentials, ProviderSettings};

/// Fixed intraday granularity requested from the provider.
const INTERVAL: &str = "60min";

/// Bounded recent window (the provider's most recent ~100 entries).
const OUTPUT_SIZE: &str = "compact";

/// Port for fetching one symbol's raw time series.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetch the intraday series for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] classifying the failure; the caller never
    /// sees a partially-valid payload.
    async fn fetch(&self, symbol: &str) -> Result<RawTimeSeries, FetchError>;
}

/// Alpha Vantage intraday quote client.
///
/// Performs one GET per fetch and classifies the response. No retries at
/// this layer.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    /// Create a new client from provider settings and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is empty or the underlying HTTP
    /// client cannot be constructed.
    pub fn new(settings: &ProviderSettings, credentials: &Credentials) -> Result<Self, ConfigError> {
        if credentials.api_key().is_empty() {
            return Err(ConfigError::EmptyValue("ALPHA_VANTAGE_API_KEY".to_string()));
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: credentials.api_key().to_string(),
        })
    }

    /// Classify a decoded payload into a series or a typed failure.
    ///
    /// Order matters: an explicit error message wins over a rate-limit
    /// note, which wins over a missing series.
    fn classify(symbol: &str, payload: IntradayResponse) -> Result<RawTimeSeries, FetchError> {
        if let Some(message) = payload.error_message {
            return Err(FetchError::Provider(message));
        }

        if let Some(note) = payload.note {
            return Err(FetchError::RateLimited(note));
        }

        match payload.time_series {
            Some(entries) if !entries.is_empty() => Ok(RawTimeSeries {
                symbol: symbol.to_string(),
                entries,
            }),
            _ => Err(FetchError::EmptySeries),
        }
    }
}

#[async_trait]
impl QuoteFetcher for AlphaVantageClient {
    async fn fetch(&self, symbol: &str) -> Result<RawTimeSeries, FetchError> {
        let params = [
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", symbol),
            ("interval", INTERVAL),
            ("apikey", self.api_key.as_str()),
            ("outputsize", OUTPUT_SIZE),
        ];

        tracing::debug!(symbol, interval = INTERVAL, "Requesting intraday series");

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("unexpected status {status}")));
        }

        let payload: IntradayResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Self::classify(symbol, payload)
    }
}
