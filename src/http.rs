//! Authenticated HTTP plumbing for the Alpaca REST APIs.
//!
//! Single-shot: each request maps to exactly one outbound call, with the
//! response either parsed or turned into an [`AlpacaError`]. Retry and
//! backoff are out of scope for this layer.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api_types::ApiErrorBody;
use crate::config::AlpacaConfig;
use crate::error::AlpacaError;

/// HTTP transport shared by the trading and data API calls.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: Client,
    api_key: String,
    api_secret: String,
    trading_base_url: String,
    data_base_url: String,
}

impl HttpTransport {
    pub(crate) fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(AlpacaError::MissingCredentials);
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlpacaError::Network(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            trading_base_url: config.trading_base_url().to_string(),
            data_base_url: config.data_base_url().to_string(),
        })
    }

    /// GET from the trading API.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        let url = format!("{}{}", self.trading_base_url, path);
        self.send(self.client.get(&url)).await
    }

    /// POST a JSON body to the trading API.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AlpacaError> {
        let url = format!("{}{}", self.trading_base_url, path);
        self.send(self.client.post(&url).json(body)).await
    }

    /// DELETE on the trading API. A 2xx with an empty body is success.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), AlpacaError> {
        let url = format!("{}{}", self.trading_base_url, path);
        let _: serde_json::Value = self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    /// GET from the market data API.
    pub(crate) async fn data_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        let url = format!("{}{}", self.data_base_url, path);
        self.send(self.client.get(&url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AlpacaError> {
        let response = request
            .header("accept", "application/json")
            .header("APCA-API-KEY-ID", &self.api_key)
            .header("APCA-API-SECRET-KEY", &self.api_secret)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            if text.is_empty() {
                // DELETE returns no body
                return Ok(serde_json::from_str("null")?);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => (
                err.code
                    .map_or_else(|| status.as_u16().to_string(), |c| c.to_string()),
                err.message,
            ),
            Err(_) => (status.as_u16().to_string(), body),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AlpacaError::AuthenticationFailed,
            StatusCode::NOT_FOUND => AlpacaError::NotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY => AlpacaError::OrderRejected(message),
            _ => AlpacaError::Api { code, message },
        })
    }
}

