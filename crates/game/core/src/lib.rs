//! Card table state shared between the rules layer and view layers.
//!
//! `game-core` defines the immutable state tree that the (external) reducer
//! produces once per transition: the deck of uniquely numbered cards, the
//! per-suit card status table, the play stacks and the hypothetical overlay.
//! View layers only ever read consecutive versions of [`GameState`]; the
//! `with_*` builders return a new version that shares untouched subtrees.
pub mod config;
pub mod error;
pub mod state;
pub mod variant;

pub use config::GameConfig;
pub use error::StateError;
pub use state::{
    CardIdentity, CardLocation, CardOrder, CardState, CardStatus, CardStatusTable, GameState,
    HypotheticalView, PlayerIndex, Rank, SuitIndex,
};
pub use variant::{Suit, Variant};

/// Rank reserved for the synthetic card sitting at the bottom of every play stack.
pub const STACK_BASE_RANK: Rank = 0;

/// Rank used to draw a card whose rank is not known.
pub const UNKNOWN_CARD_RANK: Rank = 6;

/// Rank of the "START" card used by some variants.
pub const START_CARD_RANK: Rank = 7;
