//! Order admission: validation and time-in-force dispatch.
//!
//! `add` is the single entry point for incoming intents. Validation happens
//! before any state is touched, so a reject can never leave a partial
//! mutation or a stray trade behind.

use super::core::Book;
use super::results::Reject;
use crate::level::RestingOrder;
use crate::order::{Order, OrderType, TimeInForce};
use crate::types::{Price, Side};
use log::debug;

impl Book {
    /// Submit an order intent. Returns false when the order is rejected;
    /// a false return means the book is untouched.
    pub fn add(&mut self, order: Order) -> bool {
        let id = order.id;
        match self.try_add(order) {
            Ok(()) => true,
            Err(reject) => {
                debug!("add {:?} rejected: {}", id, reject);
                false
            }
        }
    }

    /// Same as [`Book::add`] but surfaces the reject reason.
    pub fn try_add(&mut self, order: Order) -> Result<(), Reject> {
        if order.qty <= 0 {
            return Err(Reject::NonPositiveQty);
        }
        // duplicates must go through replace
        if self.index.contains_key(&order.id) {
            return Err(Reject::DuplicateId);
        }

        match order.order_type {
            OrderType::Market => self.admit_market(order),
            OrderType::Limit => {
                let px = order.price.ok_or(Reject::BadPrice)?;
                if px.value() % self.config.tick != 0 {
                    return Err(Reject::BadPrice);
                }
                self.admit_limit(order, px)
            }
        }
    }

    /// Market orders cross as much as possible and never rest.
    fn admit_market(&mut self, order: Order) -> Result<(), Reject> {
        match order.time_in_force {
            TimeInForce::PostOnly => Err(Reject::PostOnlyMarket),
            TimeInForce::FOK => {
                if !self.can_fully_fill(&order) {
                    return Err(Reject::CannotFill);
                }
                let residual = self.match_incoming(&order, order.qty);
                debug_assert_eq!(residual, 0, "fill-or-kill left residual after feasibility pass");
                Ok(())
            }
            _ => {
                self.match_incoming(&order, order.qty);
                Ok(())
            }
        }
    }

    fn admit_limit(&mut self, order: Order, px: Price) -> Result<(), Reject> {
        match order.time_in_force {
            TimeInForce::PostOnly => {
                if self.would_cross(&order) {
                    return Err(Reject::PostOnlyWouldTake);
                }
                // rest without matching
                self.rest(order.side, px, Self::resting_entry(&order, order.qty));
                Ok(())
            }
            TimeInForce::FOK => {
                if !self.can_fully_fill(&order) {
                    return Err(Reject::CannotFill);
                }
                let residual = self.match_incoming(&order, order.qty);
                debug_assert_eq!(residual, 0, "fill-or-kill left residual after feasibility pass");
                Ok(())
            }
            TimeInForce::IOC => {
                // residual is discarded, not rested
                self.match_incoming(&order, order.qty);
                Ok(())
            }
            TimeInForce::Day | TimeInForce::GTC => {
                let residual = self.match_incoming(&order, order.qty);
                if residual > 0 {
                    self.rest(order.side, px, Self::resting_entry(&order, residual));
                }
                Ok(())
            }
        }
    }

    fn resting_entry(order: &Order, qty_remaining: i64) -> RestingOrder {
        RestingOrder {
            id: order.id,
            qty_remaining,
            ts_ns: order.ts_ns,
            time_in_force: order.time_in_force,
        }
    }

    /// Would this order take liquidity on arrival? Market orders always do.
    pub(super) fn would_cross(&self, order: &Order) -> bool {
        let Some(px) = order.price else {
            return true;
        };
        if order.order_type == OrderType::Market {
            return true;
        }
        match order.side {
            Side::Buy => self.best_ask().map_or(false, |ask| px >= ask),
            Side::Sell => self.best_bid().map_or(false, |bid| px <= bid),
        }
    }

    /// Fill-or-kill feasibility: walk the opposite ladder best-first and sum
    /// resting quantity at acceptable prices. Pure read, no mutation, no
    /// trades.
    pub(super) fn can_fully_fill(&self, order: &Order) -> bool {
        let limit = match order.order_type {
            OrderType::Market => None,
            OrderType::Limit => order.price,
        };
        let mut need = order.qty;

        match order.side {
            Side::Buy => {
                for (px, level) in self.asks.iter() {
                    if limit.map_or(false, |l| *px > l) {
                        break;
                    }
                    need -= level.total_qty();
                    if need <= 0 {
                        return true;
                    }
                }
            }
            Side::Sell => {
                for (px, level) in self.bids.iter().rev() {
                    if limit.map_or(false, |l| *px < l) {
                        break;
                    }
                    need -= level.total_qty();
                    if need <= 0 {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, TsNs};

    fn limit(id: u64, side: Side, px: i64, qty: i64, tif: TimeInForce, ts: i64) -> Order {
        Order::new_limit(OrderId(id), side, Price::new_unchecked(px), qty, tif, TsNs(ts))
    }

    #[test]
    fn rejects_non_positive_qty() {
        let mut book = Book::new("TEST", 1);
        let order = limit(1, Side::Buy, 10000, 0, TimeInForce::Day, 1);
        assert_eq!(book.try_add(order), Err(Reject::NonPositiveQty));
        assert!(book.is_empty());
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Buy, 10000, 10, TimeInForce::Day, 1)));
        assert_eq!(
            book.try_add(limit(1, Side::Buy, 10100, 5, TimeInForce::Day, 2)),
            Err(Reject::DuplicateId)
        );
        // the original order is untouched
        assert_eq!(book.order(OrderId(1)).unwrap().qty_remaining, 10);
    }

    #[test]
    fn rejects_off_tick_price() {
        let mut book = Book::new("TEST", 5);
        assert_eq!(
            book.try_add(limit(1, Side::Buy, 10002, 10, TimeInForce::Day, 1)),
            Err(Reject::BadPrice)
        );
        assert!(book.add(limit(2, Side::Buy, 10005, 10, TimeInForce::Day, 2)));
    }

    #[test]
    fn rejects_limit_without_price() {
        let mut book = Book::new("TEST", 1);
        let mut order = limit(1, Side::Buy, 10000, 10, TimeInForce::Day, 1);
        order.price = None;
        assert_eq!(book.try_add(order), Err(Reject::BadPrice));
    }

    #[test]
    fn rejects_post_only_market() {
        let mut book = Book::new("TEST", 1);
        let mut order = Order::new_market(OrderId(1), Side::Buy, 10, TsNs(1));
        order.time_in_force = TimeInForce::PostOnly;
        assert_eq!(book.try_add(order), Err(Reject::PostOnlyMarket));
    }

    #[test]
    fn post_only_rejects_on_cross_and_rests_otherwise() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, TimeInForce::Day, 1)));

        // touching the best ask counts as crossing
        assert_eq!(
            book.try_add(limit(2, Side::Buy, 10100, 5, TimeInForce::PostOnly, 2)),
            Err(Reject::PostOnlyWouldTake)
        );
        assert!(book.trades().is_empty());

        assert!(book.add(limit(3, Side::Buy, 10050, 7, TimeInForce::PostOnly, 3)));
        let bids = book.bids(5);
        assert_eq!((bids[0].px.value(), bids[0].qty, bids[0].order_count), (10050, 7, 1));
        assert!(book.trades().is_empty());
    }

    #[test]
    fn fok_rejects_without_mutation() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, TimeInForce::Day, 1)));

        // needs 15 but only 10 is available at or below 10100
        assert_eq!(
            book.try_add(limit(2, Side::Buy, 10100, 15, TimeInForce::FOK, 2)),
            Err(Reject::CannotFill)
        );
        assert!(book.trades().is_empty());
        let asks = book.asks(5);
        assert_eq!((asks[0].px.value(), asks[0].qty), (10100, 10));
    }

    #[test]
    fn fok_fills_across_levels_when_feasible() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, TimeInForce::Day, 1)));
        assert!(book.add(limit(2, Side::Sell, 10150, 10, TimeInForce::Day, 2)));

        assert!(book.add(limit(3, Side::Buy, 10150, 15, TimeInForce::FOK, 3)));
        let trades = book.drain_trades();
        assert_eq!(trades.iter().map(|t| t.qty).sum::<i64>(), 15);
        // nothing rested for the taker
        assert!(book.order(OrderId(3)).is_none());
    }

    #[test]
    fn ioc_discards_residual() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, TimeInForce::Day, 1)));
        assert!(book.add(limit(2, Side::Sell, 10100, 10, TimeInForce::Day, 2)));

        assert!(book.add(limit(3, Side::Buy, 10100, 25, TimeInForce::IOC, 3)));
        assert!(book.asks(5).is_empty());
        assert!(book.bids(5).is_empty());
        assert_eq!(book.drain_trades().len(), 2);
    }

    #[test]
    fn market_fok_checks_whole_ladder() {
        let mut book = Book::new("TEST", 1);
        assert!(book.add(limit(1, Side::Sell, 10100, 10, TimeInForce::Day, 1)));
        assert!(book.add(limit(2, Side::Sell, 99999, 10, TimeInForce::Day, 2)));

        let mut order = Order::new_market(OrderId(3), Side::Buy, 20, TsNs(3));
        order.time_in_force = TimeInForce::FOK;
        assert!(book.add(order));
        assert!(book.asks(5).is_empty());

        let mut too_big = Order::new_market(OrderId(4), Side::Buy, 5, TsNs(4));
        too_big.time_in_force = TimeInForce::FOK;
        assert_eq!(book.try_add(too_big), Err(Reject::CannotFill));
    }
}
