//! Errors raised while building state tree versions.
//!
//! The reducer owns the real state transitions; these errors only guard the
//! `with_*` builders so a malformed version is rejected before any view layer
//! ever observes it.

use crate::state::{CardOrder, Rank, SuitIndex};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("suit index {suit} is out of range for a variant with {suits} suits")]
    SuitOutOfRange { suit: SuitIndex, suits: usize },

    #[error("rank {rank} is not part of the variant")]
    RankOutOfRange { rank: Rank },

    #[error("card {found} was appended at deck position {expected}")]
    OrderMismatch { expected: CardOrder, found: CardOrder },

    #[error("card {0} is not in the deck")]
    UnknownCard(CardOrder),

    #[cfg(feature = "serde")]
    #[error("invalid variant definition: {0}")]
    InvalidVariant(String),
}
