//! Card nodes.

use arrayvec::ArrayVec;
use game_core::{CardOrder, GameConfig, PlayerIndex, Rank, STACK_BASE_RANK, SuitIndex};

use super::{Point, Transform};
use crate::view::decorations::BorderKind;

/// Identifies a card node in the [`Scene`](super::Scene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardKey {
    /// A dealt card, by order.
    Deck(CardOrder),
    /// The synthetic bottom card of a play stack.
    StackBase(SuitIndex),
}

impl CardKey {
    pub const fn is_stack_base(self) -> bool {
        matches!(self, Self::StackBase(_))
    }
}

/// The container a card node is currently attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardParent {
    Deck,
    Hand(PlayerIndex),
    PlayStack(SuitIndex),
    Discard,
}

/// Suit and rank pips drawn on an undetermined card.
///
/// Entries are aligned with the variant's suits and ranks.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PipView {
    pub visible: bool,
    pub suit_struck: ArrayVec<bool, { GameConfig::MAX_SUITS }>,
    pub rank_struck: ArrayVec<bool, { GameConfig::MAX_RANK_PIPS }>,
    /// Ranks this card was positively clued with.
    pub rank_positive: ArrayVec<bool, { GameConfig::MAX_RANK_PIPS }>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusOverlay {
    pub critical: bool,
    pub faded: bool,
    pub double_discard: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NoteIndicator {
    pub visible: bool,
    pub disproved: bool,
}

/// What one card node should look like.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    key: CardKey,
    /// Identity currently drawn (possibly morphed).
    pub suit_index: Option<SuitIndex>,
    pub rank: Option<Rank>,
    /// Absolute transform.
    pub transform: Transform,
    pub visible: bool,
    /// `None` while detached from every container.
    pub parent: Option<CardParent>,
    pub border: Option<BorderKind>,
    pub raised: bool,
    pub shadow: bool,
    pub pips: PipView,
    pub status: StatusOverlay,
    pub bare_image: Option<String>,
    pub note: NoteIndicator,
    pub direction_arrow: bool,
    busy: bool,
}

impl CardView {
    pub fn new(key: CardKey, resting: Point) -> Self {
        Self {
            key,
            suit_index: None,
            rank: None,
            transform: Transform::at(resting),
            visible: false,
            parent: Some(CardParent::Deck),
            border: None,
            raised: false,
            shadow: false,
            pips: PipView::default(),
            status: StatusOverlay::default(),
            bare_image: None,
            note: NoteIndicator::default(),
            direction_arrow: false,
            busy: false,
        }
    }

    pub fn stack_base(suit_index: SuitIndex, position: Point) -> Self {
        Self {
            suit_index: Some(suit_index),
            rank: Some(STACK_BASE_RANK),
            visible: true,
            parent: Some(CardParent::PlayStack(suit_index)),
            ..Self::new(CardKey::StackBase(suit_index), position)
        }
    }

    pub fn key(&self) -> CardKey {
        self.key
    }

    pub fn is_stack_base(&self) -> bool {
        self.rank == Some(STACK_BASE_RANK)
    }

    /// Puts the card back on the deck so a later re-add starts from a known state.
    pub fn move_to_deck_position(&mut self, deck_position: Point) {
        self.transform = Transform::at(deck_position);
        self.visible = false;
        self.parent = Some(CardParent::Deck);
        self.raised = false;
        self.busy = false;
    }

    /// Marks the card as animating; other writers leave its transform alone.
    pub fn started_tweening(&mut self) {
        self.busy = true;
    }

    pub fn finished_tweening(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_to_deck() {
        let mut view = CardView::new(CardKey::Deck(CardOrder(4)), Point::ORIGIN);
        view.transform = Transform::at(Point::new(300.0, 120.0));
        view.visible = true;
        view.parent = Some(CardParent::Hand(1));
        view.started_tweening();

        view.move_to_deck_position(Point::new(-50.0, 10.0));

        assert_eq!(view.transform, Transform::at(Point::new(-50.0, 10.0)));
        assert_eq!(view.parent, Some(CardParent::Deck));
        assert!(!view.visible);
        assert!(!view.is_busy());
    }

    #[test]
    fn stack_base_is_recognized_by_rank() {
        let base = CardView::stack_base(2, Point::ORIGIN);
        assert!(base.is_stack_base());
        assert!(base.key().is_stack_base());
        assert_eq!(base.parent, Some(CardParent::PlayStack(2)));
    }
}
