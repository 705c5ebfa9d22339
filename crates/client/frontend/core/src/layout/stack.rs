//! Per-suit play stack.
//!
//! Index 0 is always the stack base; the last child is the most recently
//! played card. Stacks are append-only; the only removal is an explicit
//! [`PlayStack::detach`] of a played card (undo, leaving a hypothetical).

use game_core::{CardOrder, GameState, Rank, STACK_BASE_RANK, SuitIndex};
use tracing::debug;

use super::{LayoutChild, LayoutEnv};
use crate::animation::{Easing, TweenFinished, TweenOwner, TweenSpec};
use crate::error::{InvariantViolation, Result};
use crate::scene::{CardKey, CardParent, LayerId, Point, Scene, Transform};

#[derive(Clone, Debug, PartialEq)]
pub struct PlayStack {
    suit_index: SuitIndex,
    /// Absolute position of the stack origin.
    position: Point,
    /// Height every child is scaled to.
    height: f64,
    children: Vec<LayoutChild>,
}

fn to_absolute(origin: Point, local: Transform) -> Transform {
    Transform {
        position: origin + local.position,
        ..local
    }
}

impl PlayStack {
    /// Creates a stack holding only its base.
    pub fn new(suit_index: SuitIndex, position: Point, height: f64, base_height: f64) -> Self {
        let base = LayoutChild::new(
            CardKey::StackBase(suit_index),
            Transform {
                scale: height / base_height,
                ..Transform::IDENTITY
            },
            base_height,
        );
        Self {
            suit_index,
            position,
            height,
            children: vec![base],
        }
    }

    pub fn suit_index(&self) -> SuitIndex {
        self.suit_index
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn children(&self) -> &[LayoutChild] {
        &self.children
    }

    /// Played cards, bottom to top (the base excluded).
    pub fn members(&self) -> impl Iterator<Item = CardOrder> + '_ {
        self.children.iter().filter_map(|child| match child.card {
            CardKey::Deck(order) => Some(order),
            CardKey::StackBase(_) => None,
        })
    }

    pub fn is_settled(&self) -> bool {
        !self.children.iter().any(LayoutChild::is_tweening)
    }

    /// Appends `order` as the new top, keeping its current absolute position
    /// so the layout tween starts where the card was.
    pub fn insert(&mut self, order: CardOrder, natural_height: f64, env: &mut LayoutEnv<'_>) -> Result<()> {
        let key = CardKey::Deck(order);
        let view = env
            .scene
            .card_mut(key)
            .ok_or(InvariantViolation::UnknownCard(key))?;

        let absolute = view.transform;
        view.parent = Some(CardParent::PlayStack(self.suit_index));
        view.visible = true;

        let local = Transform {
            position: absolute.position - self.position,
            ..absolute
        };
        self.children.push(LayoutChild::new(key, local, natural_height));

        debug!(
            target: "frontend::layout",
            suit = self.suit_index,
            %order,
            len = self.children.len(),
            "card inserted into play stack"
        );
        self.layout(env)
    }

    /// Starts a tween from every child's current transform to its target.
    pub fn layout(&mut self, env: &mut LayoutEnv<'_>) -> Result<()> {
        let owner = TweenOwner::PlayStack(self.suit_index);

        for child in self.children.iter_mut() {
            let view = env
                .scene
                .card_mut(child.card)
                .ok_or(InvariantViolation::UnknownCard(child.card))?;

            let target = Transform {
                position: Point::ORIGIN,
                scale: self.height / child.natural_height,
                rotation: 0.0,
                opacity: env.rules.target_opacity(child.card.is_stack_base()),
            };

            // Never two writers on one transform.
            if let Some(previous) = child.tween.take() {
                env.animator.cancel(previous);
            }

            view.started_tweening();
            let handle = env.animator.start(
                owner,
                child.card,
                TweenSpec {
                    from: child.transform,
                    to: target,
                    duration: env.rules.tween_duration,
                    easing: Easing::EaseOut,
                },
            );
            child.tween = Some(handle);
        }

        env.scene.batch_draw(LayerId::Card);
        Ok(())
    }

    /// Hides every child but the top one once nothing is tweening.
    ///
    /// Returns whether the cull ran.
    pub fn visibility_cull(&mut self, scene: &mut Scene) -> bool {
        if !self.is_settled() {
            return false;
        }

        let top = self.children.len() - 1;
        for (index, child) in self.children.iter_mut().enumerate() {
            child.visible = index == top;
            if let Some(view) = scene.card_mut(child.card) {
                view.visible = child.visible;
            }
        }
        scene.batch_draw(LayerId::Card);
        true
    }

    /// Rank of the topmost card as the state knows it; the base rank on an
    /// empty stack.
    ///
    /// Reads the state rather than the card view, so viewer settings that
    /// change what is drawn (empathy) do not change the answer.
    pub fn top_rank(&self, state: &GameState) -> Option<Rank> {
        let top = self
            .children
            .last()
            .expect("a play stack always holds its base");
        match top.card {
            CardKey::StackBase(_) => Some(STACK_BASE_RANK),
            CardKey::Deck(order) => state
                .hypothetical
                .morphed(order)
                .or_else(|| state.identity(order))
                .and_then(|identity| identity.rank)
                .or_else(|| state.card(order).and_then(|card| card.rank)),
        }
    }

    /// Removes a played card from the stack.
    ///
    /// Returns `Ok(None)` if the card is not on this stack.
    pub fn detach(&mut self, card: CardKey, env: &mut LayoutEnv<'_>) -> Result<Option<LayoutChild>> {
        if card.is_stack_base() {
            return Err(InvariantViolation::DetachStackBase(self.suit_index).into());
        }
        let Some(index) = self.children.iter().position(|child| child.card == card) else {
            return Ok(None);
        };

        let child = self.children.remove(index);
        if let Some(handle) = child.tween {
            env.animator.cancel(handle);
        }
        if let Some(view) = env.scene.card_mut(card) {
            view.finished_tweening();
            view.transform.scale = 1.0;
            view.transform.opacity = 1.0;
            // The card may already have been sent back to the deck.
            if view.parent == Some(CardParent::PlayStack(self.suit_index)) {
                view.parent = None;
            }
        }

        debug!(target: "frontend::layout", suit = self.suit_index, ?card, "card detached from play stack");
        self.visibility_cull(env.scene);
        Ok(Some(child))
    }

    /// Brings the members in line with `played` (bottom to top).
    ///
    /// The common prefix is kept; everything above it is detached from the
    /// top down, then the missing cards are inserted in order. Returns
    /// whether anything changed.
    pub fn sync_members(
        &mut self,
        played: &[CardOrder],
        natural_height: f64,
        env: &mut LayoutEnv<'_>,
    ) -> Result<bool> {
        let current: Vec<CardOrder> = self.members().collect();
        let common = current
            .iter()
            .zip(played)
            .take_while(|(have, want)| have == want)
            .count();
        if common == current.len() && common == played.len() {
            return Ok(false);
        }

        for &order in current[common..].iter().rev() {
            self.detach(CardKey::Deck(order), env)?;
        }
        for &order in &played[common..] {
            self.insert(order, natural_height, env)?;
        }
        Ok(true)
    }

    /// Writes the current sample of every live tween to the scene.
    pub fn apply_frame(&mut self, env: &mut LayoutEnv<'_>) {
        let mut moved = false;
        for child in self.children.iter_mut() {
            let Some(sample) = child.tween.and_then(|handle| env.animator.sample(handle)) else {
                continue;
            };
            child.transform = sample;
            if let Some(view) = env.scene.card_mut(child.card) {
                view.transform = to_absolute(self.position, sample);
                moved = true;
            }
        }
        if moved {
            env.scene.batch_draw(LayerId::Card);
        }
    }

    /// Settles the child that owned `finished`.
    ///
    /// A completion whose child, card view or parent link is gone is a
    /// no-op. Returns whether the child was settled.
    pub fn on_tween_finished(&mut self, finished: &TweenFinished, env: &mut LayoutEnv<'_>) -> bool {
        let suit = self.suit_index;
        let Some(child) = self
            .children
            .iter_mut()
            .find(|child| child.tween == Some(finished.handle))
        else {
            debug!(target: "frontend::layout", suit, handle = %finished.handle, "stale tween completion: child detached");
            return false;
        };
        let Some(view) = env.scene.card_mut(child.card) else {
            debug!(target: "frontend::layout", suit, card = ?child.card, "stale tween completion: no card view");
            return false;
        };
        if view.parent != Some(CardParent::PlayStack(suit)) {
            debug!(target: "frontend::layout", suit, card = ?child.card, parent = ?view.parent, "stale tween completion: card left the stack");
            return false;
        }

        child.tween = None;
        child.transform = finished.to;
        view.transform = to_absolute(self.position, finished.to);
        view.finished_tweening();
        child.check_set_draggable(view, env.rules.our_player, env.rules.replay);

        self.visibility_cull(env.scene);
        true
    }
}
