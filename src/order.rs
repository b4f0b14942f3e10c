//! Order intents.
//!
//! An [`Order`] is the immutable input to the book: the caller assigns the id
//! and timestamp, the book decides whether it trades, rests, or is rejected.

use crate::types::{OrderId, Price, Side, TsNs};
use serde::{Deserialize, Serialize};

/// Order time in force options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good for the session. Identical to GTC until session rollover exists.
    Day,
    /// Immediate or cancel. Fill what is possible, discard the rest.
    IOC,
    /// Fill or kill. Fill entirely or reject entirely.
    FOK,
    /// Good till canceled. Remains on book until filled or canceled.
    GTC,
    /// Post only. Reject if it would take liquidity.
    PostOnly,
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::Day
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order with a specified price.
    Limit,
    /// Market order. Executes at the best available prices, never rests.
    Market,
}

/// An order intent submitted to the book.
///
/// Fields are public so an embedding can express any combination, including
/// invalid ones; admission is where they get rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    /// None for market orders.
    pub price: Option<Price>,
    pub qty: i64,
    pub ts_ns: TsNs,
}

impl Order {
    pub fn new_limit(
        id: OrderId,
        side: Side,
        price: Price,
        qty: i64,
        time_in_force: TimeInForce,
        ts_ns: TsNs,
    ) -> Self {
        Self {
            id,
            side,
            order_type: OrderType::Limit,
            time_in_force,
            price: Some(price),
            qty,
            ts_ns,
        }
    }

    pub fn new_market(id: OrderId, side: Side, qty: i64, ts_ns: TsNs) -> Self {
        Self {
            id,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::IOC,
            price: None,
            qty,
            ts_ns,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::Market
    }
}
