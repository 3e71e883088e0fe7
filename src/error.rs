//! Error types for the gateway.

use thiserror::Error;

use crate::validation::OrderValidationError;

/// Errors surfaced by [`crate::AlpacaClient`].
///
/// Validation errors are raised before any network call and are not
/// retryable by resubmitting the same request. Everything else maps a
/// transport or remote failure; this layer performs no retries.
#[derive(Debug, Error)]
pub enum AlpacaError {
    /// Order failed local validation.
    #[error("invalid order: {0}")]
    Validation(#[from] OrderValidationError),

    /// Request is malformed at the call site (empty symbol list, empty
    /// order id).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No API credentials were supplied or found in the environment.
    #[error("missing credentials: set {} and {} or pass them explicitly",
        crate::config::ENV_API_KEY, crate::config::ENV_API_SECRET)]
    MissingCredentials,

    /// API rejected the credentials (401/403).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Order was rejected by the broker (422).
    #[error("order rejected: {0}")]
    OrderRejected(String),

    /// API returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from the API (or HTTP status when absent).
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Network or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<reqwest::Error> for AlpacaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AlpacaError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts() {
        let err: AlpacaError = OrderValidationError::MissingSizing.into();
        assert!(matches!(err, AlpacaError::Validation(_)));
        assert!(err.to_string().contains("invalid order"));
    }

    #[test]
    fn missing_credentials_names_env_vars() {
        let msg = AlpacaError::MissingCredentials.to_string();
        assert!(msg.contains("ALPACA_KEY"));
        assert!(msg.contains("ALPACA_SECRET"));
    }

    #[test]
    fn json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AlpacaError = parse_err.into();
        assert!(matches!(err, AlpacaError::JsonParse(_)));
    }
}
