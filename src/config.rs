//! Book configuration options.

use serde::{Deserialize, Serialize};

/// Time-in-force applied when a replace changes price and the order re-enters
/// the book as a fresh taker.
///
/// The re-entry always matches first and rests any residual; this knob only
/// controls the tag recorded on the re-entered order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplaceTif {
    /// Re-enter as Day regardless of the original tag. Matches the behavior
    /// of venues that treat a price amendment as a brand-new order.
    DowngradeToDay,
    /// Keep the original order's time-in-force tag on the re-entered order.
    PreserveOriginal,
}

impl Default for ReplaceTif {
    fn default() -> Self {
        Self::DowngradeToDay
    }
}

/// Static book configuration (immutable after creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Opaque instrument label.
    pub symbol: String,
    /// Minimum price increment; all limit prices must be multiples of it.
    pub tick: i64,
    /// Policy for the replace-with-price-change re-entry.
    pub replace_tif: ReplaceTif,
}

impl BookConfig {
    pub fn new(symbol: impl Into<String>, tick: i64) -> Self {
        debug_assert!(tick > 0);
        Self {
            symbol: symbol.into(),
            tick,
            replace_tif: ReplaceTif::default(),
        }
    }

    pub fn with_replace_tif(mut self, policy: ReplaceTif) -> Self {
        self.replace_tif = policy;
        self
    }
}
