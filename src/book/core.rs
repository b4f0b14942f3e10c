//! Book struct and its read side: construction, snapshots, journal access.

use crate::config::BookConfig;
use crate::level::{Level, RestingOrder};
use crate::order::TimeInForce;
use crate::trade::{Trade, TradeLog};
use crate::types::{OrderId, Price, Side, TsNs};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Where a resting order lives. Queue position inside the level is not
/// recorded; cancel and replace rediscover it by linear scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Handle {
    pub side: Side,
    pub px: Price,
}

/// Aggregated view of one price rung, returned by depth snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelView {
    pub px: Price,
    pub qty: i64,
    pub order_count: usize,
}

/// Owned copy of a resting order together with its book coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingView {
    pub id: OrderId,
    pub side: Side,
    pub px: Price,
    pub qty_remaining: i64,
    pub ts_ns: TsNs,
    pub time_in_force: TimeInForce,
}

/// Single-symbol central limit order book.
///
/// Owns the bid and ask ladders, the id index, and the trade journal. All
/// mutating operations are synchronous and must be serialised by the caller;
/// snapshots are owned copies, never aliases into book state.
#[derive(Debug, Clone)]
pub struct Book {
    pub(super) config: BookConfig,
    /// Ascending price map; best ask is the first key.
    pub(super) asks: BTreeMap<Price, Level>,
    /// Ascending price map; best bid is the last key.
    pub(super) bids: BTreeMap<Price, Level>,
    pub(super) index: HashMap<OrderId, Handle>,
    pub(super) journal: TradeLog,
}

impl Book {
    pub fn new(symbol: impl Into<String>, tick: i64) -> Self {
        Self::with_config(BookConfig::new(symbol, tick))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            config,
            asks: BTreeMap::new(),
            bids: BTreeMap::new(),
            index: HashMap::new(),
            journal: TradeLog::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn tick(&self) -> i64 {
        self.config.tick
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Up to `depth` bid rungs, best (highest) first.
    pub fn bids(&self, depth: usize) -> Vec<LevelView> {
        self.bids
            .values()
            .rev()
            .take(depth)
            .map(Self::level_view)
            .collect()
    }

    /// Up to `depth` ask rungs, best (lowest) first.
    pub fn asks(&self, depth: usize) -> Vec<LevelView> {
        self.asks
            .values()
            .take(depth)
            .map(Self::level_view)
            .collect()
    }

    fn level_view(level: &Level) -> LevelView {
        LevelView {
            px: level.px(),
            qty: level.total_qty(),
            order_count: level.count(),
        }
    }

    /// Highest resting buy price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest resting sell price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Gap between best ask and best bid.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// Diagnostic: a book at rest must never be crossed.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Total number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Owned copy of a resting order, or None if the id is not on the book.
    pub fn order(&self, id: OrderId) -> Option<RestingView> {
        let handle = self.index.get(&id)?;
        let level = self.side_levels(handle.side).get(&handle.px)?;
        let entry = level.entry(id)?;
        Some(RestingView {
            id: entry.id,
            side: handle.side,
            px: handle.px,
            qty_remaining: entry.qty_remaining,
            ts_ns: entry.ts_ns,
            time_in_force: entry.time_in_force,
        })
    }

    /// Owned copies of every resting order on one side, best price first.
    pub fn resting_orders(&self, side: Side) -> Vec<(Price, RestingOrder)> {
        let mut out = Vec::new();
        let mut push_level = |level: &Level| {
            for entry in level.iter() {
                out.push((level.px(), *entry));
            }
        };
        match side {
            Side::Buy => self.bids.values().rev().for_each(&mut push_level),
            Side::Sell => self.asks.values().for_each(&mut push_level),
        }
        out
    }

    /// Move out all accumulated trade records and clear the journal.
    pub fn drain_trades(&mut self) -> Vec<Trade> {
        self.journal.drain()
    }

    /// Non-draining peek at the journal.
    pub fn trades(&self) -> &[Trade] {
        self.journal.as_slice()
    }

    pub(super) fn side_levels(&self, side: Side) -> &BTreeMap<Price, Level> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn side_levels_mut(&mut self, side: Side) -> &mut BTreeMap<Price, Level> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Park an entry at the tail of its price level and record its handle.
    pub(super) fn rest(&mut self, side: Side, px: Price, entry: RestingOrder) {
        let id = entry.id;
        self.side_levels_mut(side)
            .entry(px)
            .or_insert_with(|| Level::new(px))
            .enqueue(entry);
        self.index.insert(id, Handle { side, px });
    }
}
