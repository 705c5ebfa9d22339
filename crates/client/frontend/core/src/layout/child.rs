use game_core::PlayerIndex;

use crate::animation::TweenHandle;
use crate::scene::{CardKey, CardParent, CardView, Transform};

/// One card inside a container, with the container-local state the card
/// view itself does not carry.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutChild {
    pub card: CardKey,
    /// Local transform relative to the container.
    pub transform: Transform,
    /// Height of the card before container scaling.
    pub natural_height: f64,
    /// In-flight tween. Only the child may cancel or clear it.
    pub tween: Option<TweenHandle>,
    pub draggable: bool,
    pub visible: bool,
}

impl LayoutChild {
    pub fn new(card: CardKey, transform: Transform, natural_height: f64) -> Self {
        Self {
            card,
            transform,
            natural_height,
            tween: None,
            draggable: false,
            visible: true,
        }
    }

    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    /// Only cards sitting in the local player's own hand can be dragged, and
    /// never during a replay.
    pub fn check_set_draggable(&mut self, view: &CardView, our_player: Option<PlayerIndex>, replay: bool) {
        self.draggable = !replay
            && !view.is_busy()
            && our_player.is_some_and(|us| view.parent == Some(CardParent::Hand(us)));
    }
}
