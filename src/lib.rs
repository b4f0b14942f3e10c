//! Single-Symbol CLOB Matching Core.
//!
//! A central limit order book for one instrument: order intents go in,
//! trades and depth snapshots come out. Matching is price-time priority
//! with FIFO queues per price level. All computation is deterministic and
//! synchronous with no external I/O; prices, quantities, and timestamps are
//! 64-bit integers supplied by the caller.

pub mod book;
pub mod config;
pub mod level;
pub mod order;
pub mod trade;
pub mod types;

pub use book::*;
pub use config::*;
pub use level::*;
pub use order::*;
pub use trade::*;
pub use types::*;
