//! Order validation.
//!
//! The rule set checked before any order leaves this layer. Checks run in
//! a fixed order and the first failure wins, so a given invalid request
//! always reports the same error.

use thiserror::Error;

use crate::order::{ORDER_TYPES, OrderKind, OrderRequest, OrderTicket, Sizing, TrailParams};

/// A violated order rule. One variant per rule; non-retryable - the
/// caller must fix the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// `type` is absent or not one of the five recognized order types.
    #[error("order type must be one of market, limit, stop, stop_limit, trailing_stop")]
    InvalidOrderType,

    /// Limit and stop-limit orders need a limit price.
    #[error("limit price required")]
    MissingLimitPrice,

    /// Stop and stop-limit orders need a stop price.
    #[error("stop price required")]
    MissingStopPrice,

    /// Trailing-stop orders need a trail price or a trail percent.
    #[error("trail price or trail percent required")]
    MissingTrailParameters,

    /// `symbol`, `side` and `time_in_force` are always required.
    #[error("symbol, side and time_in_force required")]
    MissingRequiredField,

    /// One of `qty` or `notional` is required.
    #[error("notional or qty required")]
    MissingSizing,

    /// `qty` and `notional` are mutually exclusive.
    #[error("notional or qty required, not both")]
    ConflictingSizing,

    /// Notional orders must be day orders.
    #[error("notional orders must be day orders")]
    NotionalRequiresDayOrder,
}

/// Check an order request against the full rule set.
///
/// Pure and deterministic; performs no I/O. Equivalent to
/// [`OrderTicket::try_from`] with the ticket discarded.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate(order: &OrderRequest) -> Result<(), OrderValidationError> {
    OrderTicket::try_from(order).map(|_| ())
}

impl TryFrom<&OrderRequest> for OrderTicket {
    type Error = OrderValidationError;

    fn try_from(order: &OrderRequest) -> Result<Self, Self::Error> {
        let order_type = order
            .order_type
            .as_deref()
            .filter(|t| ORDER_TYPES.contains(t))
            .ok_or(OrderValidationError::InvalidOrderType)?;

        let kind = match order_type {
            "limit" => OrderKind::Limit {
                limit_price: order
                    .limit_price
                    .ok_or(OrderValidationError::MissingLimitPrice)?,
            },
            "stop" => OrderKind::Stop {
                stop_price: order
                    .stop_price
                    .ok_or(OrderValidationError::MissingStopPrice)?,
            },
            "stop_limit" => OrderKind::StopLimit {
                limit_price: order
                    .limit_price
                    .ok_or(OrderValidationError::MissingLimitPrice)?,
                stop_price: order
                    .stop_price
                    .ok_or(OrderValidationError::MissingStopPrice)?,
            },
            "trailing_stop" => {
                if order.trail_price.is_none() && order.trail_percent.is_none() {
                    return Err(OrderValidationError::MissingTrailParameters);
                }
                OrderKind::TrailingStop {
                    trail: TrailParams {
                        trail_price: order.trail_price,
                        trail_percent: order.trail_percent,
                    },
                }
            }
            _ => OrderKind::Market,
        };

        let (symbol, side, time_in_force) = match (&order.symbol, &order.side, &order.time_in_force)
        {
            (Some(symbol), Some(side), Some(tif))
                if !symbol.is_empty() && !side.is_empty() && !tif.is_empty() =>
            {
                (symbol.clone(), side.clone(), tif.clone())
            }
            _ => return Err(OrderValidationError::MissingRequiredField),
        };

        let sizing = match (order.notional, order.qty) {
            (None, None) => return Err(OrderValidationError::MissingSizing),
            (Some(_), Some(_)) => return Err(OrderValidationError::ConflictingSizing),
            (None, Some(qty)) => Sizing::Qty(qty),
            (Some(notional), None) => {
                if time_in_force != "day" {
                    return Err(OrderValidationError::NotionalRequiresDayOrder);
                }
                Sizing::Notional(notional)
            }
        };

        Ok(Self {
            symbol,
            side,
            time_in_force,
            kind,
            sizing,
        })
    }
}
