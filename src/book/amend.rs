//! Cancel and replace.
//!
//! Cancel removes a resting order outright. Replace follows exchange
//! convention: shrinking keeps queue position, growing or moving price
//! forfeits it, and a price move re-enters the order as a fresh taker that
//! may trade immediately.

use super::core::Book;
use super::results::Reject;
use crate::config::ReplaceTif;
use crate::level::RestingOrder;
use crate::order::{Order, TimeInForce};
use crate::types::{OrderId, Price, Side, TsNs};
use log::debug;
use std::cmp::Ordering;

impl Book {
    /// Cancel a resting order by id. The timestamp is accepted but unused,
    /// reserved for audit trails.
    pub fn cancel(&mut self, id: OrderId, ts_ns: TsNs) -> bool {
        match self.try_cancel(id, ts_ns) {
            Ok(()) => true,
            Err(reject) => {
                debug!("cancel {:?} rejected: {}", id, reject);
                false
            }
        }
    }

    /// Same as [`Book::cancel`] but surfaces the reject reason.
    pub fn try_cancel(&mut self, id: OrderId, _ts_ns: TsNs) -> Result<(), Reject> {
        let handle = *self.index.get(&id).ok_or(Reject::UnknownOrder)?;

        let ladder = self.side_levels_mut(handle.side);
        let level = ladder.get_mut(&handle.px).ok_or(Reject::LostEntry)?;
        level.remove(id).ok_or(Reject::LostEntry)?;
        if level.is_empty() {
            ladder.remove(&handle.px);
        }

        self.index.remove(&id);
        Ok(())
    }

    /// Amend a resting order's price and/or quantity.
    pub fn replace(&mut self, id: OrderId, new_px: i64, new_qty: i64, ts_ns: TsNs) -> bool {
        match self.try_replace(id, new_px, new_qty, ts_ns) {
            Ok(()) => true,
            Err(reject) => {
                debug!("replace {:?} rejected: {}", id, reject);
                false
            }
        }
    }

    /// Same as [`Book::replace`] but surfaces the reject reason.
    ///
    /// Price unchanged: equal quantity is a no-op, smaller shrinks in place
    /// keeping queue position and timestamp, larger re-appends at the tail
    /// with the new timestamp. Price changed: the order is removed and
    /// re-entered as a fresh limit taker, which may trade immediately.
    pub fn try_replace(
        &mut self,
        id: OrderId,
        new_px: i64,
        new_qty: i64,
        ts_ns: TsNs,
    ) -> Result<(), Reject> {
        if new_qty <= 0 {
            return Err(Reject::NonPositiveQty);
        }
        let handle = *self.index.get(&id).ok_or(Reject::UnknownOrder)?;

        if new_px == handle.px.value() {
            return self.amend_qty_in_place(id, handle.side, handle.px, new_qty, ts_ns);
        }

        // price change: validate before touching anything
        if new_px <= 0 || new_px % self.config.tick != 0 {
            return Err(Reject::BadPrice);
        }
        let new_px = Price::new_unchecked(new_px);

        // pull the old entry out
        let ladder = self.side_levels_mut(handle.side);
        let level = ladder.get_mut(&handle.px).ok_or(Reject::LostEntry)?;
        let old = level.remove(id).ok_or(Reject::LostEntry)?;
        if level.is_empty() {
            ladder.remove(&handle.px);
        }
        self.index.remove(&id);

        // re-enter as a fresh limit taker; queue priority is forfeited either way
        let time_in_force = match self.config.replace_tif {
            ReplaceTif::DowngradeToDay => TimeInForce::Day,
            ReplaceTif::PreserveOriginal => old.time_in_force,
        };
        let taker = Order::new_limit(id, handle.side, new_px, new_qty, time_in_force, ts_ns);
        let residual = self.match_incoming(&taker, new_qty);
        if residual > 0 {
            self.rest(
                handle.side,
                new_px,
                RestingOrder {
                    id,
                    qty_remaining: residual,
                    ts_ns,
                    time_in_force,
                },
            );
        }
        Ok(())
    }

    fn amend_qty_in_place(
        &mut self,
        id: OrderId,
        side: Side,
        px: Price,
        new_qty: i64,
        ts_ns: TsNs,
    ) -> Result<(), Reject> {
        let level = self
            .side_levels_mut(side)
            .get_mut(&px)
            .ok_or(Reject::LostEntry)?;
        let current = level.entry(id).ok_or(Reject::LostEntry)?;

        match new_qty.cmp(&current.qty_remaining) {
            Ordering::Equal => Ok(()),
            Ordering::Less => {
                // shrink in place: queue position and timestamp survive
                level.reduce(id, new_qty);
                Ok(())
            }
            Ordering::Greater => {
                // grow: move to the back of the queue with a fresh timestamp
                let mut entry = level.remove(id).ok_or(Reject::LostEntry)?;
                entry.qty_remaining = new_qty;
                entry.ts_ns = ts_ns;
                level.enqueue(entry);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn limit(id: u64, side: Side, px: i64, qty: i64, ts: i64) -> Order {
        Order::new_limit(
            OrderId(id),
            side,
            Price::new_unchecked(px),
            qty,
            TimeInForce::Day,
            TsNs(ts),
        )
    }

    #[test]
    fn cancel_removes_only_the_target() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(10, Side::Buy, 10000, 40, 1)));
        assert!(book.add(limit(11, Side::Buy, 10000, 20, 2)));

        assert!(book.cancel(OrderId(10), TsNs(3)));
        let bids = book.bids(5);
        assert_eq!((bids[0].px.value(), bids[0].qty, bids[0].order_count), (10000, 20, 1));

        assert!(!book.cancel(OrderId(999), TsNs(4)));
        assert!(!book.cancel(OrderId(10), TsNs(5)));
    }

    #[test]
    fn cancel_deletes_emptied_level() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, 1)));
        assert!(book.cancel(OrderId(1), TsNs(2)));
        assert!(book.asks(5).is_empty());
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn replace_equal_qty_is_a_noop() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, 1)));
        assert!(book.replace(OrderId(1), 10100, 10, TsNs(2)));
        let view = book.order(OrderId(1)).unwrap();
        assert_eq!(view.qty_remaining, 10);
        assert_eq!(view.ts_ns, TsNs(1));
    }

    #[test]
    fn replace_shrink_keeps_queue_position() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, 1)));
        assert!(book.add(limit(2, Side::Sell, 10100, 10, 2)));

        assert!(book.replace(OrderId(1), 10100, 6, TsNs(3)));

        // marketable buy hits id=1 first: it kept its place
        assert!(book.add(limit(9, Side::Buy, 10150, 8, 4)));
        let trades = book.drain_trades();
        assert_eq!(trades.len(), 2);
        assert_eq!((trades[0].maker_id, trades[0].qty), (OrderId(1), 6));
        assert_eq!((trades[1].maker_id, trades[1].qty), (OrderId(2), 2));
    }

    #[test]
    fn replace_grow_moves_to_back() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, 1)));
        assert!(book.add(limit(2, Side::Sell, 10100, 10, 2)));

        assert!(book.replace(OrderId(1), 10100, 12, TsNs(3)));

        // id=2 now trades first; id=1 fills from the back
        assert!(book.add(limit(9, Side::Buy, 10150, 15, 4)));
        let trades = book.drain_trades();
        assert_eq!(trades.len(), 2);
        assert_eq!((trades[0].maker_id, trades[0].qty), (OrderId(2), 10));
        assert_eq!((trades[1].maker_id, trades[1].qty), (OrderId(1), 5));
    }

    #[test]
    fn replace_price_change_can_trade_and_rest() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(10, Side::Sell, 10200, 10, 1)));
        assert!(book.add(limit(11, Side::Sell, 10300, 10, 1)));
        assert!(book.add(limit(1, Side::Buy, 10050, 12, 2)));

        assert!(book.replace(OrderId(1), 10200, 12, TsNs(3)));

        let trades = book.drain_trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].taker_id, OrderId(1));
        assert_eq!(trades[0].px.value(), 10200);
        assert_eq!(trades[0].qty, 10);

        let bids = book.bids(5);
        assert_eq!((bids[0].px.value(), bids[0].qty), (10200, 2));
    }

    #[test]
    fn replace_rejects_bad_new_price_without_mutation() {
        let mut book = Book::new("TEST", 5);
        assert!(book.add(Order::new_limit(
            OrderId(1),
            Side::Buy,
            Price::new_unchecked(10000),
            10,
            TimeInForce::GTC,
            TsNs(1),
        )));

        assert_eq!(
            book.try_replace(OrderId(1), 10002, 10, TsNs(2)),
            Err(Reject::BadPrice)
        );
        assert_eq!(
            book.try_replace(OrderId(1), -5, 10, TsNs(2)),
            Err(Reject::BadPrice)
        );
        // still resting where it was
        let view = book.order(OrderId(1)).unwrap();
        assert_eq!(view.px.value(), 10000);
        assert_eq!(view.qty_remaining, 10);
    }

    #[test]
    fn replace_rejects_unknown_id_and_bad_qty() {
        let mut book = Book::new("TEST", 1);
        assert_eq!(
            book.try_replace(OrderId(1), 10000, 10, TsNs(1)),
            Err(Reject::UnknownOrder)
        );
        assert!(book.add(limit(1, Side::Buy, 10000, 10, 1)));
        assert_eq!(
            book.try_replace(OrderId(1), 10000, 0, TsNs(2)),
            Err(Reject::NonPositiveQty)
        );
    }

    #[test]
    fn replace_price_change_downgrades_to_day_by_default() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(Order::new_limit(
            OrderId(1),
            Side::Buy,
            Price::new_unchecked(10000),
            10,
            TimeInForce::GTC,
            TsNs(1),
        )));

        assert!(book.replace(OrderId(1), 10050, 10, TsNs(2)));
        assert_eq!(
            book.order(OrderId(1)).unwrap().time_in_force,
            TimeInForce::Day
        );
    }

    #[test]
    fn replace_price_change_can_preserve_tif() {
        use crate::config::BookConfig;

        let config = BookConfig::new("TEST", 1).with_replace_tif(ReplaceTif::PreserveOriginal);
        let mut book = Book::with_config(config);
        assert!(book.add(Order::new_limit(
            OrderId(1),
            Side::Buy,
            Price::new_unchecked(10000),
            10,
            TimeInForce::GTC,
            TsNs(1),
        )));

        assert!(book.replace(OrderId(1), 10050, 10, TsNs(2)));
        assert_eq!(
            book.order(OrderId(1)).unwrap().time_in_force,
            TimeInForce::GTC
        );
    }
}
