//! Authoritative table state.
//!
//! A [`GameState`] is one immutable version of the tree. Large subtrees sit
//! behind `Arc` so consecutive versions share everything a transition did not
//! touch; the `with_*` builders clone-on-write only the subtree they change.
pub mod card;
pub mod hypothetical;
pub mod status;

use std::sync::Arc;

pub use card::{CardIdentity, CardLocation, CardOrder, CardState, PlayerIndex, Rank, SuitIndex};
pub use hypothetical::HypotheticalView;
pub use status::{CardStatus, CardStatusTable};

use crate::config::GameConfig;
use crate::error::StateError;
use crate::variant::Variant;

/// Canonical snapshot of the visible table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub num_players: usize,
    /// Cards indexed by order. Only grows at the tail, and only shrinks at the
    /// tail (undo, leaving a hypothetical).
    pub deck: Arc<Vec<CardState>>,
    /// Identities revealed so far, indexed by order.
    pub card_identities: Arc<Vec<Option<CardIdentity>>>,
    pub card_status: Arc<CardStatusTable>,
    /// Played card orders per suit, bottom to top (stack bases excluded).
    pub play_stacks: Arc<Vec<Vec<CardOrder>>>,
    pub hypothetical: HypotheticalView,
}

impl GameState {
    /// Creates an empty table for `variant`.
    pub fn new(variant: &Variant, config: &GameConfig) -> Self {
        Self {
            num_players: config.num_players,
            deck: Arc::new(Vec::new()),
            card_identities: Arc::new(Vec::new()),
            card_status: Arc::new(CardStatusTable::new(
                variant.suits.len(),
                variant.max_rank(),
            )),
            play_stacks: Arc::new(vec![Vec::new(); variant.suits.len()]),
            hypothetical: HypotheticalView::real(),
        }
    }

    pub fn card(&self, order: CardOrder) -> Option<&CardState> {
        self.deck.get(order.index())
    }

    pub fn identity(&self, order: CardOrder) -> Option<CardIdentity> {
        self.card_identities.get(order.index()).copied().flatten()
    }

    /// Status of the card with the given identity, if both halves are known.
    pub fn status_of(&self, suit_index: Option<SuitIndex>, rank: Option<Rank>) -> Option<CardStatus> {
        self.card_status.get(suit_index?, rank?)
    }

    /// Appends a newly drawn card. Its order must be the next deck position.
    pub fn with_drawn_card(&self, card: CardState) -> Result<Self, StateError> {
        let expected = CardOrder(self.deck.len());
        if card.order != expected {
            return Err(StateError::OrderMismatch {
                expected,
                found: card.order,
            });
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.deck).push(card);
        let identities = Arc::make_mut(&mut next.card_identities);
        if identities.len() < next.deck.len() {
            identities.resize(next.deck.len(), None);
        }
        Ok(next)
    }

    /// Drops every card from `len` onwards (undo, leaving a hypothetical).
    pub fn with_deck_truncated(&self, len: usize) -> Self {
        let mut next = self.clone();
        if len < next.deck.len() {
            Arc::make_mut(&mut next.deck).truncate(len);
            Arc::make_mut(&mut next.card_identities).truncate(len);
            for stack in Arc::make_mut(&mut next.play_stacks).iter_mut() {
                stack.retain(|order| order.index() < len);
            }
        }
        next
    }

    /// Replaces one card, leaving the rest of the deck shared.
    pub fn with_card(
        &self,
        order: CardOrder,
        update: impl FnOnce(&mut CardState),
    ) -> Result<Self, StateError> {
        if order.index() >= self.deck.len() {
            return Err(StateError::UnknownCard(order));
        }
        let mut next = self.clone();
        update(&mut Arc::make_mut(&mut next.deck)[order.index()]);
        Ok(next)
    }

    pub fn with_identity(
        &self,
        order: CardOrder,
        identity: Option<CardIdentity>,
    ) -> Result<Self, StateError> {
        if order.index() >= self.deck.len() {
            return Err(StateError::UnknownCard(order));
        }
        let mut next = self.clone();
        let identities = Arc::make_mut(&mut next.card_identities);
        if identities.len() <= order.index() {
            identities.resize(order.index() + 1, None);
        }
        identities[order.index()] = identity;
        Ok(next)
    }

    pub fn with_status(
        &self,
        suit_index: SuitIndex,
        rank: Rank,
        status: CardStatus,
    ) -> Result<Self, StateError> {
        let mut next = self.clone();
        let suits = next.card_status.num_suits();
        if suit_index >= suits {
            return Err(StateError::SuitOutOfRange {
                suit: suit_index,
                suits,
            });
        }
        if !Arc::make_mut(&mut next.card_status).set(suit_index, rank, status) {
            return Err(StateError::RankOutOfRange { rank });
        }
        Ok(next)
    }

    /// Moves `order` onto the top of its suit's play stack.
    pub fn with_played_card(&self, order: CardOrder, suit_index: SuitIndex) -> Result<Self, StateError> {
        let suits = self.play_stacks.len();
        if suit_index >= suits {
            return Err(StateError::SuitOutOfRange {
                suit: suit_index,
                suits,
            });
        }
        let mut next = self.with_card(order, |card| {
            card.location = CardLocation::PlayStack(suit_index);
        })?;
        Arc::make_mut(&mut next.play_stacks)[suit_index].push(order);
        Ok(next)
    }

    pub fn with_hypothetical(&self, hypothetical: HypotheticalView) -> Self {
        let mut next = self.clone();
        next.hypothetical = hypothetical;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_state() -> GameState {
        GameState::new(&Variant::no_variant(), &GameConfig::default())
    }

    #[test]
    fn drawn_cards_must_arrive_in_order() {
        let state = base_state();
        let state = state
            .with_drawn_card(CardState::new(CardOrder(0), vec![]))
            .unwrap();

        let result = state.with_drawn_card(CardState::new(CardOrder(2), vec![]));
        assert_eq!(
            result,
            Err(StateError::OrderMismatch {
                expected: CardOrder(1),
                found: CardOrder(2),
            })
        );
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let state = base_state()
            .with_drawn_card(CardState::new(CardOrder(0), vec![]))
            .unwrap();
        let next = state
            .with_status(0, 5, CardStatus::Critical)
            .unwrap();

        assert!(Arc::ptr_eq(&state.deck, &next.deck));
        assert!(!Arc::ptr_eq(&state.card_status, &next.card_status));
        assert_eq!(next.status_of(Some(0), Some(5)), Some(CardStatus::Critical));
    }

    #[test]
    fn truncation_drops_played_orders() {
        let mut state = base_state();
        for order in 0..3 {
            state = state
                .with_drawn_card(CardState::new(CardOrder(order), vec![]))
                .unwrap();
        }
        let state = state.with_played_card(CardOrder(2), 1).unwrap();
        let state = state.with_deck_truncated(2);

        assert_eq!(state.deck.len(), 2);
        assert!(state.play_stacks[1].is_empty());
    }

    #[test]
    fn morphed_identity_requires_active_hypothetical() {
        let mut hypothetical = HypotheticalView::active(vec![None, Some(CardIdentity::new(1, 3))]);
        assert_eq!(hypothetical.morphed(CardOrder(1)), Some(CardIdentity::new(1, 3)));
        assert_eq!(hypothetical.morphed(CardOrder(0)), None);

        hypothetical.active = false;
        assert_eq!(hypothetical.morphed(CardOrder(1)), None);
    }
}
