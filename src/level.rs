//! A single price rung: the FIFO queue of resting orders at one price.
//!
//! Orders execute in arrival order, so the queue is strictly
//! first-in-first-out. The level keeps a running total of resting quantity
//! so depth snapshots and fill-or-kill feasibility walks never have to sum
//! the queue.

use crate::order::TimeInForce;
use crate::types::{OrderId, Price, TsNs};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One resting order inside a level queue.
///
/// `qty_remaining` is strictly positive while the entry exists; entries are
/// removed the moment they hit zero. The time-in-force tag is unused by the
/// matcher but kept for the replace policy and future session rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    pub qty_remaining: i64,
    pub ts_ns: TsNs,
    pub time_in_force: TimeInForce,
}

/// A price level. Invariant: never empty while present in a ladder.
#[derive(Debug, Clone)]
pub struct Level {
    px: Price,
    queue: VecDeque<RestingOrder>,
    total_qty: i64,
}

impl Level {
    pub fn new(px: Price) -> Self {
        Self {
            px,
            queue: VecDeque::new(),
            total_qty: 0,
        }
    }

    pub fn px(&self) -> Price {
        self.px
    }

    /// Append at the tail (newest position).
    pub fn enqueue(&mut self, entry: RestingOrder) {
        debug_assert!(entry.qty_remaining > 0);
        self.total_qty += entry.qty_remaining;
        self.queue.push_back(entry);
    }

    /// Oldest entry, next in line to trade.
    pub fn front(&self) -> Option<&RestingOrder> {
        self.queue.front()
    }

    /// Fill `exec` against the head entry. Removes the entry when it is
    /// exhausted and returns its id so the caller can drop it from the id
    /// index; returns None while the head survives with a partial fill.
    pub fn consume_front(&mut self, exec: i64) -> Option<OrderId> {
        let front = self.queue.front_mut()?;
        debug_assert!(exec > 0 && exec <= front.qty_remaining);
        front.qty_remaining -= exec;
        self.total_qty -= exec;
        if front.qty_remaining == 0 {
            let id = front.id;
            self.queue.pop_front();
            Some(id)
        } else {
            None
        }
    }

    /// Find an entry by id. Linear scan; queue position is not indexed.
    pub fn entry(&self, id: OrderId) -> Option<&RestingOrder> {
        self.queue.iter().find(|e| e.id == id)
    }

    /// Remove an entry by id, wherever it sits in the queue.
    pub fn remove(&mut self, id: OrderId) -> Option<RestingOrder> {
        let pos = self.queue.iter().position(|e| e.id == id)?;
        let entry = self.queue.remove(pos)?;
        self.total_qty -= entry.qty_remaining;
        Some(entry)
    }

    /// Shrink an entry in place. Queue position and timestamp are preserved.
    pub fn reduce(&mut self, id: OrderId, new_qty: i64) -> bool {
        debug_assert!(new_qty > 0);
        match self.queue.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                debug_assert!(new_qty < entry.qty_remaining);
                self.total_qty += new_qty - entry.qty_remaining;
                entry.qty_remaining = new_qty;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> {
        self.queue.iter()
    }

    pub fn total_qty(&self) -> i64 {
        self.total_qty
    }

    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
