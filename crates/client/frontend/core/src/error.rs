//! Errors surfaced by the view layer.
//!
//! Every variant is fatal: it means the upstream state machine (or the asset
//! build) handed the view something it promised never to. Callers abort the
//! transition instead of drawing a corrupted table.

use game_core::{CardOrder, SuitIndex};

use crate::scene::CardKey;

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("view invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("the image \"{name}\" was not generated")]
    MissingImage { name: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("card at deck position {position} reports order {found}")]
    OrderMismatch { position: usize, found: CardOrder },

    #[error("no card view exists for {0:?}")]
    UnknownCard(CardKey),

    #[error("trying to unmorph cards but no hypothetical was entered")]
    NotInHypothetical,

    #[error("hypothetical is active but carries no morphed identities")]
    MissingMorphedIdentities,

    #[error("the base of play stack {0} cannot be detached")]
    DetachStackBase(SuitIndex),

    #[error("suit {suit} has no play stack ({stacks} stacks)")]
    UnknownStack { suit: SuitIndex, stacks: usize },
}

impl ViewError {
    pub fn missing_image(name: impl Into<String>) -> Self {
        Self::MissingImage { name: name.into() }
    }
}
