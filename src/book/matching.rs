//! Cross-side matching sweep.
//!
//! The matcher consumes the best opposite level first and the oldest entry
//! within it, so price-time priority falls out of the ladder ordering plus
//! the FIFO queue. Trades print at the maker's resting price; residual
//! handling belongs to the caller, never to the matcher.

use super::core::Book;
use crate::order::{Order, OrderType};
use crate::trade::Trade;
use crate::types::Side;
use log::trace;

impl Book {
    /// Match `taker` against the opposite ladder, consuming up to
    /// `remaining` quantity. Returns the unfilled remainder. Every fill is
    /// appended to the journal before this returns.
    pub(super) fn match_incoming(&mut self, taker: &Order, mut remaining: i64) -> i64 {
        let is_buy = taker.side == Side::Buy;
        // market orders have no price gate
        let limit = match taker.order_type {
            OrderType::Market => None,
            OrderType::Limit => taker.price,
        };

        while remaining > 0 {
            let best = if is_buy {
                self.asks.keys().next().copied()
            } else {
                self.bids.keys().next_back().copied()
            };
            let Some(level_px) = best else { break };

            if let Some(limit_px) = limit {
                let outside = if is_buy {
                    limit_px < level_px
                } else {
                    limit_px > level_px
                };
                if outside {
                    break;
                }
            }

            let ladder = if is_buy { &mut self.asks } else { &mut self.bids };
            let Some(level) = ladder.get_mut(&level_px) else {
                break;
            };

            while remaining > 0 {
                let Some(maker) = level.front().copied() else {
                    break;
                };
                let exec = remaining.min(maker.qty_remaining);

                self.journal.push(Trade {
                    taker_id: taker.id,
                    maker_id: maker.id,
                    px: level_px,
                    qty: exec,
                    ts_ns: taker.ts_ns,
                    taker_is_buy: is_buy,
                });
                trace!(
                    "fill {} @ {} taker={:?} maker={:?}",
                    exec,
                    level_px,
                    taker.id,
                    maker.id
                );

                remaining -= exec;
                match level.consume_front(exec) {
                    Some(filled_id) => {
                        self.index.remove(&filled_id);
                    }
                    None => {
                        // maker partially filled at the head: the taker is
                        // necessarily exhausted
                        debug_assert_eq!(remaining, 0);
                        break;
                    }
                }
            }

            if level.is_empty() {
                ladder.remove(&level_px);
            }
        }

        remaining
    }
}
