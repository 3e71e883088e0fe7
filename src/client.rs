//! The Alpaca client: one method per forwarded operation.

use std::fmt::Write;

use chrono::{Duration, Utc};

use crate::api_types::{BarsResponse, LatestBarsResponse, LatestTradesResponse, Order, Position, SymbolBar};
use crate::config::{AlpacaConfig, AlpacaEnvironment};
use crate::error::AlpacaError;
use crate::http::HttpTransport;
use crate::order::{OrderRequest, OrderTicket};

/// Timeframe used when the caller doesn't specify one.
const DEFAULT_TIMEFRAME: &str = "1Day";

/// Lookback window for the default `start` of latest-bar queries.
const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// One or more instrument symbols.
///
/// Operations that hit the batch market data endpoints accept anything
/// convertible into this, so a single symbol is normalized into a
/// one-element collection at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols(Vec<String>);

impl Symbols {
    /// Comma-separated form for query parameters.
    #[must_use]
    pub fn join(&self) -> String {
        self.0.join(",")
    }

    /// True when no symbols were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Symbols {
    fn from(symbol: &str) -> Self {
        Self(vec![symbol.to_string()])
    }
}

impl From<String> for Symbols {
    fn from(symbol: String) -> Self {
        Self(vec![symbol])
    }
}

impl From<Vec<String>> for Symbols {
    fn from(symbols: Vec<String>) -> Self {
        Self(symbols)
    }
}

impl From<&[&str]> for Symbols {
    fn from(symbols: &[&str]) -> Self {
        Self(symbols.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Symbols {
    fn from(symbols: [&str; N]) -> Self {
        Self(symbols.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Query parameters for bar retrieval.
#[derive(Debug, Clone, Default)]
pub struct BarsQuery {
    /// Bar timeframe, e.g. "1Min", "1Hour", "1Day". Defaults to "1Day".
    pub timeframe: Option<String>,
    /// Start of the window (RFC 3339).
    pub start: Option<chrono::DateTime<Utc>>,
    /// End of the window (RFC 3339).
    pub end: Option<chrono::DateTime<Utc>>,
    /// Maximum number of bars per symbol.
    pub limit: Option<u32>,
}

impl BarsQuery {
    /// Set the timeframe.
    #[must_use]
    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }

    /// Set the window start.
    #[must_use]
    pub const fn with_start(mut self, start: chrono::DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the window end.
    #[must_use]
    pub const fn with_end(mut self, end: chrono::DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the per-symbol bar limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Client for the Alpaca trading and market data APIs.
///
/// Stateless between calls: each method issues exactly one outbound
/// request and returns the remote response.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    transport: HttpTransport,
    environment: AlpacaEnvironment,
}

impl AlpacaClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::MissingCredentials`] when credentials are
    /// absent, or a network error if the HTTP client cannot be built.
    pub fn new(config: AlpacaConfig) -> Result<Self, AlpacaError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            transport,
            environment: config.environment,
        })
    }

    /// Whether this client targets the live trading environment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    /// Validate and submit an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call when the
    /// request violates an order rule, or the remote failure otherwise.
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<Order, AlpacaError> {
        let ticket = OrderTicket::try_from(order)?;

        if self.is_live() {
            tracing::warn!(
                symbol = %ticket.symbol,
                "submitting LIVE order - this will execute real trades"
            );
        }
        tracing::info!(
            symbol = %ticket.symbol,
            side = %ticket.side,
            order_type = %ticket.kind.as_str(),
            time_in_force = %ticket.time_in_force,
            "submitting order"
        );

        self.transport.post("/v2/orders", &ticket.to_wire()).await
    }

    /// Cancel an order by its broker-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::InvalidRequest`] for an empty ID, or
    /// [`AlpacaError::NotFound`] when the order doesn't exist.
    pub async fn cancel_order(&self, order_id: &str) -> Result<(), AlpacaError> {
        if order_id.is_empty() {
            return Err(AlpacaError::InvalidRequest("order id required".to_string()));
        }
        tracing::info!(order_id = %order_id, "canceling order");
        self.transport.delete(&format!("/v2/orders/{order_id}")).await
    }

    /// List orders, optionally filtered by status ("open", "closed",
    /// "all").
    ///
    /// # Errors
    ///
    /// Returns the remote failure, if any.
    pub async fn get_orders(&self, status: Option<&str>) -> Result<Vec<Order>, AlpacaError> {
        let path = status.map_or_else(
            || "/v2/orders".to_string(),
            |s| format!("/v2/orders?status={s}"),
        );
        self.transport.get(&path).await
    }

    /// List open positions.
    ///
    /// # Errors
    ///
    /// Returns the remote failure, if any.
    pub async fn get_positions(&self) -> Result<Vec<Position>, AlpacaError> {
        self.transport.get("/v2/positions").await
    }

    /// Fetch historical bars for one or more symbols.
    ///
    /// The grouped remote response is flattened into a list ordered by
    /// symbol and then by bar order within each symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::InvalidRequest`] when `symbols` is empty,
    /// or the remote failure.
    pub async fn get_bars(
        &self,
        symbols: impl Into<Symbols>,
        query: &BarsQuery,
    ) -> Result<Vec<SymbolBar>, AlpacaError> {
        let symbols = require_symbols(symbols)?;
        let timeframe = query.timeframe.as_deref().unwrap_or(DEFAULT_TIMEFRAME);

        let mut path = format!(
            "/v2/stocks/bars?feed=iex&symbols={}&timeframe={timeframe}",
            symbols.join()
        );
        if let Some(start) = query.start {
            let _ = write!(path, "&start={}", format_timestamp(start));
        }
        if let Some(end) = query.end {
            let _ = write!(path, "&end={}", format_timestamp(end));
        }
        if let Some(limit) = query.limit {
            let _ = write!(path, "&limit={limit}");
        }

        tracing::debug!(symbols = %symbols.join(), timeframe = %timeframe, "fetching bars");
        let response: BarsResponse = self.transport.data_get(&path).await?;
        Ok(flatten_bars(response))
    }

    /// Fetch the latest bar for one or more symbols, flattened into a
    /// list ordered by symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::InvalidRequest`] when `symbols` is empty,
    /// or the remote failure.
    pub async fn get_latest_bars(
        &self,
        symbols: impl Into<Symbols>,
    ) -> Result<Vec<SymbolBar>, AlpacaError> {
        let symbols = require_symbols(symbols)?;
        let path = format!("/v2/stocks/bars/latest?symbols={}", symbols.join());

        tracing::debug!(symbols = %symbols.join(), "fetching latest bars");
        let response: LatestBarsResponse = self.transport.data_get(&path).await?;
        Ok(response
            .bars
            .into_iter()
            .map(|(symbol, bar)| SymbolBar { symbol, bar })
            .collect())
    }

    /// Fetch the most recent stock bars, newest first.
    ///
    /// Raw-adjusted IEX data sorted descending; defaults to one bar per
    /// symbol over the past year of daily bars when the query leaves
    /// those unset.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::InvalidRequest`] when `symbols` is empty,
    /// or the remote failure.
    pub async fn latest_stock_bars(
        &self,
        symbols: impl Into<Symbols>,
        query: &BarsQuery,
    ) -> Result<BarsResponse, AlpacaError> {
        let symbols = require_symbols(symbols)?;
        let timeframe = query.timeframe.as_deref().unwrap_or(DEFAULT_TIMEFRAME);
        let limit = query.limit.unwrap_or(1);
        let start = query
            .start
            .unwrap_or_else(|| Utc::now() - Duration::days(DEFAULT_LOOKBACK_DAYS));

        let mut path = format!(
            "/v2/stocks/bars?adjustment=raw&feed=iex&sort=desc&symbols={}&limit={limit}&start={}&timeframe={timeframe}",
            symbols.join(),
            format_timestamp(start),
        );
        if let Some(end) = query.end {
            let _ = write!(path, "&end={}", format_timestamp(end));
        }

        tracing::debug!(symbols = %symbols.join(), timeframe = %timeframe, "fetching latest stock bars");
        self.transport.data_get(&path).await
    }

    /// Fetch the latest trade price per symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AlpacaError::InvalidRequest`] when `symbols` is empty,
    /// or the remote failure.
    pub async fn latest_trades(
        &self,
        symbols: impl Into<Symbols>,
    ) -> Result<LatestTradesResponse, AlpacaError> {
        let symbols = require_symbols(symbols)?;
        let path = format!("/v2/stocks/trades/latest?feed=iex&symbols={}", symbols.join());

        tracing::debug!(symbols = %symbols.join(), "fetching latest trades");
        self.transport.data_get(&path).await
    }
}

fn require_symbols(symbols: impl Into<Symbols>) -> Result<Symbols, AlpacaError> {
    let symbols = symbols.into();
    if symbols.is_empty() {
        return Err(AlpacaError::InvalidRequest(
            "at least one symbol required".to_string(),
        ));
    }
    Ok(symbols)
}

fn format_timestamp(ts: chrono::DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn flatten_bars(response: BarsResponse) -> Vec<SymbolBar> {
    response
        .bars
        .into_iter()
        .flat_map(|(symbol, bars)| {
            bars.into_iter().map(move |bar| SymbolBar {
                symbol: symbol.clone(),
                bar,
            })
        })
        .collect()
}
