//! Client configuration and credential resolution.

use std::time::Duration;

use crate::error::AlpacaError;

/// Environment variable holding the Alpaca API key.
pub const ENV_API_KEY: &str = "ALPACA_KEY";

/// Environment variable holding the Alpaca API secret.
pub const ENV_API_SECRET: &str = "ALPACA_SECRET";

/// Trading environment for the Alpaca API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlpacaEnvironment {
    /// Paper trading (simulated).
    Paper,
    /// Live trading (real money).
    #[default]
    Live,
}

impl AlpacaEnvironment {
    /// Base URL for the trading API.
    #[must_use]
    pub const fn trading_base_url(&self) -> &'static str {
        match self {
            Self::Paper => "https://paper-api.alpaca.markets",
            Self::Live => "https://api.alpaca.markets",
        }
    }

    /// Base URL for the market data API.
    ///
    /// The data API uses the same URL for both environments - authentication
    /// determines access level.
    #[must_use]
    pub const fn data_base_url(&self) -> &'static str {
        "https://data.alpaca.markets"
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Map the caller's `paper` flag to an environment. Defaults to live
    /// when the flag is absent.
    #[must_use]
    pub const fn from_paper_flag(paper: Option<bool>) -> Self {
        match paper {
            Some(true) => Self::Paper,
            _ => Self::Live,
        }
    }
}

impl std::fmt::Display for AlpacaEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "PAPER"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Configuration for [`crate::AlpacaClient`].
///
/// Built explicitly per call site rather than read from ambient process
/// state; [`AlpacaConfig::resolve`] implements the credential policy of
/// explicit parameters overriding the `ALPACA_KEY` / `ALPACA_SECRET`
/// environment variables.
#[derive(Debug, Clone)]
pub struct AlpacaConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: AlpacaEnvironment,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Trading API base URL override (for test harnesses).
    pub trading_url: Option<String>,
    /// Data API base URL override (for test harnesses).
    pub data_url: Option<String>,
}

impl AlpacaConfig {
    /// Create a configuration from explicit credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::MissingCredentials`] if either credential is
    /// empty.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        environment: AlpacaEnvironment,
    ) -> Result<Self, AlpacaError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(AlpacaError::MissingCredentials);
        }
        Ok(Self {
            api_key,
            api_secret,
            environment,
            timeout: Duration::from_secs(30),
            trading_url: None,
            data_url: None,
        })
    }

    /// Resolve credentials from explicit parameters, falling back to the
    /// environment for whichever is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::MissingCredentials`] if a credential is
    /// neither supplied nor present in the environment.
    pub fn resolve(
        api_key: Option<String>,
        api_secret: Option<String>,
        environment: AlpacaEnvironment,
    ) -> Result<Self, AlpacaError> {
        let key = first_present(api_key, std::env::var(ENV_API_KEY).ok())
            .ok_or(AlpacaError::MissingCredentials)?;
        let secret = first_present(api_secret, std::env::var(ENV_API_SECRET).ok())
            .ok_or(AlpacaError::MissingCredentials)?;
        Self::new(key, secret, environment)
    }

    /// Resolve credentials entirely from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::MissingCredentials`] if either variable is
    /// unset or empty.
    pub fn from_env(environment: AlpacaEnvironment) -> Result<Self, AlpacaError> {
        Self::resolve(None, None, environment)
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the trading API base URL.
    #[must_use]
    pub fn with_trading_url(mut self, url: impl Into<String>) -> Self {
        self.trading_url = Some(url.into());
        self
    }

    /// Override the data API base URL.
    #[must_use]
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = Some(url.into());
        self
    }

    /// Effective trading API base URL.
    #[must_use]
    pub fn trading_base_url(&self) -> &str {
        self.trading_url
            .as_deref()
            .unwrap_or_else(|| self.environment.trading_base_url())
    }

    /// Effective data API base URL.
    #[must_use]
    pub fn data_base_url(&self) -> &str {
        self.data_url
            .as_deref()
            .unwrap_or_else(|| self.environment.data_base_url())
    }
}

/// First non-empty value wins; empty strings count as absent.
fn first_present(explicit: Option<String>, fallback: Option<String>) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_environment_urls() {
        let env = AlpacaEnvironment::Paper;
        assert!(env.trading_base_url().contains("paper"));
        assert!(!env.is_live());
    }

    #[test]
    fn live_environment_urls() {
        let env = AlpacaEnvironment::Live;
        assert!(!env.trading_base_url().contains("paper"));
        assert!(env.is_live());
    }

    #[test]
    fn paper_flag_defaults_to_live() {
        assert_eq!(
            AlpacaEnvironment::from_paper_flag(None),
            AlpacaEnvironment::Live
        );
        assert_eq!(
            AlpacaEnvironment::from_paper_flag(Some(false)),
            AlpacaEnvironment::Live
        );
        assert_eq!(
            AlpacaEnvironment::from_paper_flag(Some(true)),
            AlpacaEnvironment::Paper
        );
    }

    #[test]
    fn config_rejects_empty_credentials() {
        assert!(AlpacaConfig::new("", "secret", AlpacaEnvironment::Paper).is_err());
        assert!(AlpacaConfig::new("key", "", AlpacaEnvironment::Paper).is_err());
    }

    #[test]
    fn config_creation() {
        let config = AlpacaConfig::new("key", "secret", AlpacaEnvironment::Paper).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.environment.is_live());
    }

    #[test]
    fn config_url_overrides() {
        let config = AlpacaConfig::new("key", "secret", AlpacaEnvironment::Paper)
            .unwrap()
            .with_trading_url("http://localhost:8080")
            .with_data_url("http://localhost:8081");
        assert_eq!(config.trading_base_url(), "http://localhost:8080");
        assert_eq!(config.data_base_url(), "http://localhost:8081");
    }

    #[test]
    fn config_default_urls() {
        let config = AlpacaConfig::new("key", "secret", AlpacaEnvironment::Live).unwrap();
        assert_eq!(config.trading_base_url(), "https://api.alpaca.markets");
        assert_eq!(config.data_base_url(), "https://data.alpaca.markets");
    }

    #[test]
    fn explicit_credentials_win() {
        let resolved = first_present(Some("explicit".to_string()), Some("env".to_string()));
        assert_eq!(resolved.as_deref(), Some("explicit"));
    }

    #[test]
    fn empty_explicit_falls_back() {
        let resolved = first_present(Some(String::new()), Some("env".to_string()));
        assert_eq!(resolved.as_deref(), Some("env"));
    }

    #[test]
    fn absent_both_is_none() {
        assert!(first_present(None, None).is_none());
        assert!(first_present(Some(String::new()), None).is_none());
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", AlpacaEnvironment::Paper), "PAPER");
        assert_eq!(format!("{}", AlpacaEnvironment::Live), "LIVE");
    }
}
