use std::fmt;

use crate::STACK_BASE_RANK;

pub type SuitIndex = usize;
pub type Rank = u8;
pub type PlayerIndex = usize;

/// Stable identity of a card, assigned once when it is dealt and never reused.
///
/// The order doubles as the index into every per-card array of the state tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardOrder(pub usize);

impl CardOrder {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CardOrder {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A (possibly partial) suit and rank pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardIdentity {
    pub suit_index: Option<SuitIndex>,
    pub rank: Option<Rank>,
}

impl CardIdentity {
    pub const UNKNOWN: Self = Self {
        suit_index: None,
        rank: None,
    };

    pub const fn new(suit_index: SuitIndex, rank: Rank) -> Self {
        Self {
            suit_index: Some(suit_index),
            rank: Some(rank),
        }
    }

    pub const fn is_known(&self) -> bool {
        self.suit_index.is_some() && self.rank.is_some()
    }
}

/// Where a card currently lives on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardLocation {
    #[default]
    Deck,
    Hand(PlayerIndex),
    PlayStack(SuitIndex),
    Discard,
    /// Removed from the table (e.g. "Throw It in a Hole" bookkeeping).
    OffStage,
}

impl CardLocation {
    pub const fn is_hand(self) -> bool {
        matches!(self, Self::Hand(_))
    }

    pub const fn is_played(self) -> bool {
        matches!(self, Self::PlayStack(_))
    }

    pub const fn is_discarded(self) -> bool {
        matches!(self, Self::Discard)
    }
}

/// Per-card slice of the state tree.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardState {
    pub order: CardOrder,
    pub suit_index: Option<SuitIndex>,
    /// `None` until determined; [`STACK_BASE_RANK`] marks a stack base.
    pub rank: Option<Rank>,
    pub location: CardLocation,
    pub num_positive_clues: u8,
    pub possible_cards: Vec<(SuitIndex, Rank)>,
    pub possible_cards_from_clues: Vec<(SuitIndex, Rank)>,
    pub possible_cards_for_empathy: Vec<(SuitIndex, Rank)>,
    pub positive_rank_clues: Vec<Rank>,
    pub suit_determined: bool,
    pub rank_determined: bool,
    pub in_double_discard: bool,
}

impl CardState {
    /// A freshly drawn card whose identity is still hidden.
    pub fn new(order: CardOrder, possible_cards: Vec<(SuitIndex, Rank)>) -> Self {
        Self {
            order,
            possible_cards_from_clues: possible_cards.clone(),
            possible_cards_for_empathy: possible_cards.clone(),
            possible_cards,
            ..Self::default()
        }
    }

    pub fn with_identity(mut self, suit_index: SuitIndex, rank: Rank) -> Self {
        self.suit_index = Some(suit_index);
        self.rank = Some(rank);
        self
    }

    pub fn with_location(mut self, location: CardLocation) -> Self {
        self.location = location;
        self
    }

    pub fn is_stack_base(&self) -> bool {
        self.rank == Some(STACK_BASE_RANK)
    }

    pub fn is_clued(&self) -> bool {
        self.num_positive_clues >= 1
    }

    pub fn identity(&self) -> CardIdentity {
        CardIdentity {
            suit_index: self.suit_index,
            rank: self.rank,
        }
    }
}
