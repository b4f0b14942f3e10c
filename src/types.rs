// 1.0: all the primitives live here. nothing in the book works without these types.
// order ids, prices, timestamps, sides. prices and quantities are i64 minor units
// (no floats anywhere); each is a newtype so the compiler catches type mixups.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

// Buy rests on the bid ladder, Sell on the ask ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

// 1.1: price in minor units (e.g. ticks-of-a-cent). must be positive. tick
// alignment is the book's concern, not the type's, because the tick lives on
// the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: i64) -> Self {
        debug_assert!(value > 0);
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: nanosecond timestamp supplied by the caller. the matcher treats it as an
// opaque label; queue priority comes from insertion order, never from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TsNs(pub i64);

impl TsNs {
    pub fn now() -> Self {
        // saturates past year 2262; the demo binary is the only caller
        Self(chrono::Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX))
    }

    pub fn from_nanos(ns: i64) -> Self {
        Self(ns)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }
}
