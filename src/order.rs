//! Order request types.
//!
//! [`OrderRequest`] is the loosely-typed wire form as received from a
//! caller (every field optional, invariants unenforced). [`OrderTicket`]
//! is the validated form: a union keyed by order type where each variant
//! carries only the price fields that apply to it. Converting a request
//! into a ticket is exactly the validation rule set in
//! [`crate::validation`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five order types accepted by the trading API.
pub const ORDER_TYPES: [&str; 5] = ["market", "limit", "stop", "stop_limit", "trailing_stop"];

/// A raw order request, prior to validation.
///
/// Mirrors the JSON shape of the Alpaca order endpoint. Construct one with
/// the helpers ([`OrderRequest::market`] etc.) or field-by-field, then
/// submit it; submission validates it first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Order type: one of [`ORDER_TYPES`].
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    /// Instrument symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Buy/sell indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Execution duration policy (e.g. "day", "gtc").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    /// Limit price, for limit and stop-limit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    /// Stop price, for stop and stop-limit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// Trail amount in dollars, for trailing-stop orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_price: Option<Decimal>,
    /// Trail amount in percent, for trailing-stop orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_percent: Option<Decimal>,
    /// Size in shares. Mutually exclusive with `notional`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<Decimal>,
    /// Size in dollars. Mutually exclusive with `qty`; requires a day
    /// order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notional: Option<Decimal>,
}

impl OrderRequest {
    fn base(order_type: &str, symbol: &str, side: &str, time_in_force: &str) -> Self {
        Self {
            order_type: Some(order_type.to_string()),
            symbol: Some(symbol.to_string()),
            side: Some(side.to_string()),
            time_in_force: Some(time_in_force.to_string()),
            ..Self::default()
        }
    }

    /// A market order.
    #[must_use]
    pub fn market(symbol: &str, side: &str, time_in_force: &str) -> Self {
        Self::base("market", symbol, side, time_in_force)
    }

    /// A limit order.
    #[must_use]
    pub fn limit(symbol: &str, side: &str, time_in_force: &str, limit_price: Decimal) -> Self {
        Self {
            limit_price: Some(limit_price),
            ..Self::base("limit", symbol, side, time_in_force)
        }
    }

    /// A stop order.
    #[must_use]
    pub fn stop(symbol: &str, side: &str, time_in_force: &str, stop_price: Decimal) -> Self {
        Self {
            stop_price: Some(stop_price),
            ..Self::base("stop", symbol, side, time_in_force)
        }
    }

    /// A stop-limit order.
    #[must_use]
    pub fn stop_limit(
        symbol: &str,
        side: &str,
        time_in_force: &str,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            stop_price: Some(stop_price),
            limit_price: Some(limit_price),
            ..Self::base("stop_limit", symbol, side, time_in_force)
        }
    }

    /// A trailing-stop order. Supply at least one of the trail parameters
    /// afterwards.
    #[must_use]
    pub fn trailing_stop(symbol: &str, side: &str, time_in_force: &str) -> Self {
        Self::base("trailing_stop", symbol, side, time_in_force)
    }

    /// Size the order in shares.
    #[must_use]
    pub const fn with_qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    /// Size the order in dollars.
    #[must_use]
    pub const fn with_notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Set the dollar trail amount.
    #[must_use]
    pub const fn with_trail_price(mut self, trail_price: Decimal) -> Self {
        self.trail_price = Some(trail_price);
        self
    }

    /// Set the percent trail amount.
    #[must_use]
    pub const fn with_trail_percent(mut self, trail_percent: Decimal) -> Self {
        self.trail_percent = Some(trail_percent);
        self
    }
}

/// Price parameters specific to one order type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKind {
    /// Execute at best available price.
    Market,
    /// Execute at the limit price or better.
    Limit {
        /// Limit price.
        limit_price: Decimal,
    },
    /// Becomes a market order once the stop price trades.
    Stop {
        /// Stop trigger price.
        stop_price: Decimal,
    },
    /// Becomes a limit order once the stop price trades.
    StopLimit {
        /// Stop trigger price.
        stop_price: Decimal,
        /// Limit price.
        limit_price: Decimal,
    },
    /// Stop that trails the market by a fixed amount.
    TrailingStop {
        /// Trail parameters (dollar and/or percent).
        trail: TrailParams,
    },
}

impl OrderKind {
    /// The wire name of this order type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit { .. } => "limit",
            Self::Stop { .. } => "stop",
            Self::StopLimit { .. } => "stop_limit",
            Self::TrailingStop { .. } => "trailing_stop",
        }
    }
}

/// Trail parameters for a trailing-stop order. At least one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailParams {
    /// Trail amount in dollars.
    pub trail_price: Option<Decimal>,
    /// Trail amount in percent.
    pub trail_percent: Option<Decimal>,
}

/// Order sizing: exactly one of share quantity or dollar amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sizing {
    /// Size in shares.
    Qty(Decimal),
    /// Size in dollars. Only valid on day orders.
    Notional(Decimal),
}

/// A validated order, ready for submission.
///
/// Invariant: a ticket can only be obtained from a request that passed
/// every validation rule; there is no partially-valid state. `symbol`,
/// `side` and `time_in_force` are kept as strings - this layer checks
/// their presence, value-level validation belongs to the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTicket {
    /// Instrument symbol.
    pub symbol: String,
    /// Buy/sell indicator.
    pub side: String,
    /// Execution duration policy.
    pub time_in_force: String,
    /// Type-specific price parameters.
    pub kind: OrderKind,
    /// Share or dollar sizing.
    pub sizing: Sizing,
}

impl OrderTicket {
    /// Render the ticket back into the wire shape for submission.
    #[must_use]
    pub fn to_wire(&self) -> OrderRequest {
        let mut wire = OrderRequest {
            order_type: Some(self.kind.as_str().to_string()),
            symbol: Some(self.symbol.clone()),
            side: Some(self.side.clone()),
            time_in_force: Some(self.time_in_force.clone()),
            ..OrderRequest::default()
        };
        match &self.kind {
            OrderKind::Market => {}
            OrderKind::Limit { limit_price } => wire.limit_price = Some(*limit_price),
            OrderKind::Stop { stop_price } => wire.stop_price = Some(*stop_price),
            OrderKind::StopLimit {
                stop_price,
                limit_price,
            } => {
                wire.stop_price = Some(*stop_price);
                wire.limit_price = Some(*limit_price);
            }
            OrderKind::TrailingStop { trail } => {
                wire.trail_price = trail.trail_price;
                wire.trail_percent = trail.trail_percent;
            }
        }
        match self.sizing {
            Sizing::Qty(qty) => wire.qty = Some(qty),
            Sizing::Notional(notional) => wire.notional = Some(notional),
        }
        wire
    }
}
