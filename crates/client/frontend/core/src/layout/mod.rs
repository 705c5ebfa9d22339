//! Animated card containers.
//!
//! A container owns an ordered list of [`LayoutChild`] records and drives
//! their transforms through the shared [`Animator`]. The only container in
//! this crate is the per-suit [`PlayStack`].
pub mod child;
pub mod stack;

use game_core::PlayerIndex;

pub use child::LayoutChild;
pub use stack::PlayStack;

use crate::animation::Animator;
use crate::scene::Scene;

/// Table-wide rules a layout pass needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRules {
    /// "Throw It in a Hole": played cards are hidden from the players.
    pub hidden_stacks: bool,
    pub replay: bool,
    pub our_player: Option<PlayerIndex>,
    /// Seconds.
    pub tween_duration: f64,
}

impl LayoutRules {
    /// Stack bases are always shown; replays reveal everything.
    pub fn target_opacity(&self, is_stack_base: bool) -> f64 {
        if self.hidden_stacks && !self.replay && !is_stack_base {
            0.0
        } else {
            1.0
        }
    }
}

/// Mutable table parts a layout pass writes to.
pub struct LayoutEnv<'a> {
    pub scene: &'a mut Scene,
    pub animator: &'a mut Animator,
    pub rules: LayoutRules,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(hidden_stacks: bool, replay: bool) -> LayoutRules {
        LayoutRules {
            hidden_stacks,
            replay,
            our_player: None,
            tween_duration: 0.8,
        }
    }

    #[test]
    fn base_is_always_opaque() {
        for (hidden, replay) in [(false, false), (true, false), (false, true), (true, true)] {
            assert_eq!(rules(hidden, replay).target_opacity(true), 1.0);
        }
    }

    #[test]
    fn hidden_stacks_hide_played_cards_outside_replays() {
        assert_eq!(rules(true, false).target_opacity(false), 0.0);
        assert_eq!(rules(true, true).target_opacity(false), 1.0);
        assert_eq!(rules(false, false).target_opacity(false), 1.0);
    }
}
