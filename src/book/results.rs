// 8.0.2: reject reasons for book operations.

/// Why a mutating call was refused.
///
/// Rejection is total: a rejected call leaves no trace in the ladder, the id
/// index, or the trade journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Reject {
    #[error("quantity must be positive")]
    NonPositiveQty,

    #[error("order id is already resting")]
    DuplicateId,

    #[error("price must be positive and a multiple of the tick")]
    BadPrice,

    #[error("unknown order id")]
    UnknownOrder,

    #[error("fill-or-kill cannot be fully filled")]
    CannotFill,

    #[error("post-only order would take liquidity")]
    PostOnlyWouldTake,

    #[error("market orders cannot be post-only")]
    PostOnlyMarket,

    #[error("id index points at a missing entry")]
    LostEntry,
}
