//! Alpaca API response types.
//!
//! Wire shapes as returned by the trading and market data REST APIs.
//! Money fields arrive as decimal strings and deserialize into
//! [`Decimal`]; bar and trade prices are plain floats, as the data API
//! sends them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    /// Numeric Alpaca error code, when present.
    #[serde(default)]
    pub(crate) code: Option<i64>,
    pub(crate) message: String,
}

/// An order as reported by the trading API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Broker-assigned order ID.
    pub id: String,
    /// Caller-assigned order ID.
    #[serde(default)]
    pub client_order_id: Option<String>,
    /// Instrument symbol.
    pub symbol: String,
    /// Order side.
    pub side: String,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: String,
    /// Time in force.
    pub time_in_force: String,
    /// Lifecycle status (e.g. "new", "filled", "canceled").
    pub status: String,
    /// Requested quantity in shares, absent for notional orders.
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Requested dollar amount, absent for qty orders.
    #[serde(default)]
    pub notional: Option<Decimal>,
    /// Quantity filled so far.
    #[serde(default)]
    pub filled_qty: Option<Decimal>,
    /// Average fill price.
    #[serde(default)]
    pub filled_avg_price: Option<Decimal>,
    /// Limit price, if applicable.
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop price, if applicable.
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Trail amount in dollars, if applicable.
    #[serde(default)]
    pub trail_price: Option<Decimal>,
    /// Trail amount in percent, if applicable.
    #[serde(default)]
    pub trail_percent: Option<Decimal>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Submission timestamp (RFC 3339).
    #[serde(default)]
    pub submitted_at: Option<String>,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Fill timestamp (RFC 3339), once filled.
    #[serde(default)]
    pub filled_at: Option<String>,
}

/// An open position as reported by the trading API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Instrument symbol.
    pub symbol: String,
    /// Signed quantity: positive long, negative short.
    pub qty: Decimal,
    /// Position side ("long" or "short").
    pub side: String,
    /// Average entry price.
    pub avg_entry_price: Decimal,
    /// Current market value.
    #[serde(default)]
    pub market_value: Option<Decimal>,
    /// Latest price used for valuation.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Unrealized profit/loss.
    #[serde(default)]
    pub unrealized_pl: Option<Decimal>,
    /// Unrealized profit/loss as a fraction.
    #[serde(default)]
    pub unrealized_plpc: Option<Decimal>,
    /// Total cost basis.
    #[serde(default)]
    pub cost_basis: Option<Decimal>,
}

/// A single OHLCV bar from the market data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Timestamp (RFC 3339).
    pub t: String,
    /// Open price.
    pub o: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Close price.
    pub c: f64,
    /// Volume.
    pub v: i64,
    /// Volume-weighted average price.
    #[serde(default)]
    pub vw: Option<f64>,
    /// Number of trades.
    #[serde(default)]
    pub n: Option<i64>,
}

/// Response from GET `/v2/stocks/bars`.
///
/// `BTreeMap` keeps symbol iteration order deterministic, which the
/// flattened list views rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarsResponse {
    /// Bars grouped by symbol.
    #[serde(default)]
    pub bars: BTreeMap<String, Vec<Bar>>,
    /// Pagination token, when more results are available.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response from GET `/v2/stocks/bars/latest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestBarsResponse {
    /// Latest bar per symbol.
    #[serde(default)]
    pub bars: BTreeMap<String, Bar>,
}

/// A single trade from the market data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp (RFC 3339).
    pub t: String,
    /// Trade price.
    pub p: f64,
    /// Trade size.
    pub s: i64,
    /// Exchange code.
    #[serde(default)]
    pub x: Option<String>,
    /// Condition flags.
    #[serde(default)]
    pub c: Option<Vec<String>>,
    /// Trade ID.
    #[serde(default)]
    pub i: Option<i64>,
    /// Tape.
    #[serde(default)]
    pub z: Option<String>,
}

/// Response from GET `/v2/stocks/trades/latest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestTradesResponse {
    /// Latest trade per symbol.
    #[serde(default)]
    pub trades: BTreeMap<String, Trade>,
}

/// A bar paired with its symbol, for flattened bar listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBar {
    /// Instrument symbol.
    pub symbol: String,
    /// The bar.
    pub bar: Bar,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_response_parses_notional_order() {
        let json = r#"{
            "id": "904837e3-3b76-47ec-b432-046db621571b",
            "client_order_id": "my-order",
            "symbol": "AAPL",
            "side": "buy",
            "type": "market",
            "time_in_force": "day",
            "status": "accepted",
            "qty": null,
            "notional": "100",
            "filled_qty": "0",
            "created_at": "2024-03-01T14:30:00.000000Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.symbol, "AAPL");
        assert!(order.qty.is_none());
        assert_eq!(order.notional, Some(Decimal::new(100, 0)));
        assert_eq!(order.status, "accepted");
    }

    #[test]
    fn position_parses_decimal_strings() {
        let json = r#"{
            "symbol": "TSLA",
            "qty": "-5",
            "side": "short",
            "avg_entry_price": "250.10",
            "market_value": "-1200.50",
            "unrealized_pl": "50.00"
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.qty, Decimal::new(-5, 0));
        assert_eq!(position.avg_entry_price, Decimal::new(25010, 2));
        assert!(position.cost_basis.is_none());
    }

    #[test]
    fn bars_response_orders_symbols() {
        let json = r#"{
            "bars": {
                "MSFT": [{"t":"2024-01-02T05:00:00Z","o":1.0,"h":2.0,"l":0.5,"c":1.5,"v":10}],
                "AAPL": [{"t":"2024-01-02T05:00:00Z","o":3.0,"h":4.0,"l":2.5,"c":3.5,"v":20}]
            },
            "next_page_token": null
        }"#;
        let response: BarsResponse = serde_json::from_str(json).unwrap();
        let symbols: Vec<&String> = response.bars.keys().collect();
        assert_eq!(symbols, ["AAPL", "MSFT"]);
    }

    #[test]
    fn error_body_parses_numeric_code() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code":40010001,"message":"invalid order"}"#).unwrap();
        assert_eq!(body.code, Some(40_010_001));
        assert_eq!(body.message, "invalid order");
    }

    #[test]
    fn trade_parses_optional_fields() {
        let json = r#"{"t":"2024-01-02T15:00:00Z","p":191.2,"s":100,"x":"V","c":["@"]}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.p, 191.2);
        assert_eq!(trade.x.as_deref(), Some("V"));
        assert!(trade.i.is_none());
    }
}
