use super::{Rank, SuitIndex};

/// Whether a specific card is still needed, critical, or already useless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardStatus {
    #[default]
    NeedsToBePlayed,
    /// Last remaining copy of a card that still needs to be played.
    Critical,
    Trash,
}

/// `status[suit][rank]` lookup computed by the rules layer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardStatusTable {
    rows: Vec<Vec<CardStatus>>,
}

impl CardStatusTable {
    /// Every card starts as [`CardStatus::NeedsToBePlayed`]; index 0 of each
    /// row is the stack base slot.
    pub fn new(num_suits: usize, max_rank: Rank) -> Self {
        Self {
            rows: vec![vec![CardStatus::default(); max_rank as usize + 1]; num_suits],
        }
    }

    pub fn get(&self, suit_index: SuitIndex, rank: Rank) -> Option<CardStatus> {
        self.rows.get(suit_index)?.get(rank as usize).copied()
    }

    /// Returns `false` if the slot does not exist.
    pub fn set(&mut self, suit_index: SuitIndex, rank: Rank, status: CardStatus) -> bool {
        match self
            .rows
            .get_mut(suit_index)
            .and_then(|row| row.get_mut(rank as usize))
        {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    pub fn num_suits(&self) -> usize {
        self.rows.len()
    }
}
