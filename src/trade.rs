// 2.0: every fill produces a trade record. the journal is append-only and
// drained by the reader; emission order is strict time order within a match
// and across matches.

use crate::types::{OrderId, Price, TsNs};
use serde::{Deserialize, Serialize};

/// A single execution between a taker and a resting maker.
///
/// `px` is always the maker's resting price; price improvement accrues to
/// the taker. `ts_ns` carries the taker's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub taker_id: OrderId,
    pub maker_id: OrderId,
    pub px: Price,
    pub qty: i64,
    pub ts_ns: TsNs,
    pub taker_is_buy: bool,
}

/// Append-only trade ledger owned by the book.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self { trades: Vec::new() }
    }

    pub(crate) fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Move out everything accumulated so far and clear the journal.
    pub fn drain(&mut self) -> Vec<Trade> {
        std::mem::take(&mut self.trades)
    }

    /// Non-draining peek at the accumulated records.
    pub fn as_slice(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
