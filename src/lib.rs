// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)
)]

//! Thin integration layer over the Alpaca Markets REST APIs.
//!
//! Validates order requests locally, then forwards them to the remote
//! service: place/cancel orders, list orders and positions, fetch
//! historical bars, latest bars and latest trade prices. The validation
//! rule set in [`validation`] is the only logic that runs without a
//! network call; every other operation is a single-shot forward.
//!
//! # Example
//!
//! ```no_run
//! use alpaca_gateway::{AlpacaClient, AlpacaConfig, AlpacaEnvironment, OrderRequest};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), alpaca_gateway::AlpacaError> {
//! let config = AlpacaConfig::from_env(AlpacaEnvironment::Paper)?;
//! let client = AlpacaClient::new(config)?;
//!
//! let order = OrderRequest::limit("AAPL", "buy", "day", Decimal::new(100, 0))
//!     .with_qty(Decimal::ONE);
//! let placed = client.submit_order(&order).await?;
//! println!("order {} is {}", placed.id, placed.status);
//! # Ok(())
//! # }
//! ```
//!
//! This layer holds no state between calls and performs no retries;
//! transient-failure handling is the caller's responsibility.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// API response types.
pub mod api_types;

/// The Alpaca client and its request parameter types.
pub mod client;

/// Client configuration and credential resolution.
pub mod config;

/// Error types.
pub mod error;

mod http;

/// Order request and ticket types.
pub mod order;

/// The order validation rule set.
pub mod validation;

pub use api_types::{
    Bar, BarsResponse, LatestBarsResponse, LatestTradesResponse, Order, Position, SymbolBar, Trade,
};
pub use client::{AlpacaClient, BarsQuery, Symbols};
pub use config::{AlpacaConfig, AlpacaEnvironment};
pub use error::AlpacaError;
pub use order::{OrderKind, OrderRequest, OrderTicket, Sizing, TrailParams};
pub use validation::{OrderValidationError, validate};
