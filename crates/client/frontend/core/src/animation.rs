//! Frame-clock driven tweens.
//!
//! Starting a tween never blocks: [`Animator::start`] returns a handle right
//! away, the application advances the clock once per frame, and completions
//! come back as [`TweenFinished`] events on a later frame. The owner of a
//! handle (a layout child) is the only one allowed to cancel it.

use std::fmt;

use game_core::SuitIndex;

use crate::scene::{CardKey, Transform};

/// Handle to an in-flight tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenHandle(u64);

impl fmt::Display for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Monotonic easing curves (quadratic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub from: Transform,
    pub to: Transform,
    /// Seconds. Zero finishes on the next frame.
    pub duration: f64,
    pub easing: Easing,
}

/// Who gets told when a tween settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenOwner {
    PlayStack(SuitIndex),
}

/// Completion event delivered by [`Animator::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFinished {
    pub handle: TweenHandle,
    pub owner: TweenOwner,
    pub card: CardKey,
    /// Final transform; identical to `spec.to`.
    pub to: Transform,
}

#[derive(Clone, Debug)]
struct Tween {
    handle: TweenHandle,
    owner: TweenOwner,
    card: CardKey,
    spec: TweenSpec,
    elapsed: f64,
}

impl Tween {
    fn progress(&self) -> f64 {
        if self.spec.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.spec.duration).min(1.0)
        }
    }

    fn sample(&self) -> Transform {
        let eased = self.spec.easing.apply(self.progress());
        self.spec.from.lerp(&self.spec.to, eased)
    }
}

/// Runs every tween of the table against one frame clock.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, owner: TweenOwner, card: CardKey, spec: TweenSpec) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            handle,
            owner,
            card,
            spec,
            elapsed: 0.0,
        });
        handle
    }

    /// Destroys a tween without delivering its completion.
    ///
    /// Returns `false` if the tween already finished or was cancelled.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.handle != handle);
        self.tweens.len() != before
    }

    pub fn is_live(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|tween| tween.handle == handle)
    }

    /// Current interpolated transform of a live tween.
    pub fn sample(&self, handle: TweenHandle) -> Option<Transform> {
        self.tweens
            .iter()
            .find(|tween| tween.handle == handle)
            .map(Tween::sample)
    }

    /// Advances the clock by `dt` seconds.
    ///
    /// Finished tweens are removed and returned in start order; the caller
    /// routes them to their owners.
    pub fn advance(&mut self, dt: f64) -> Vec<TweenFinished> {
        let dt = dt.max(0.0);
        let mut finished = Vec::new();
        self.tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            if tween.progress() < 1.0 {
                return true;
            }
            finished.push(TweenFinished {
                handle: tween.handle,
                owner: tween.owner,
                card: tween.card,
                to: tween.spec.to,
            });
            false
        });
        finished
    }

    pub fn live_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Point;
    use game_core::CardOrder;

    fn spec(duration: f64) -> TweenSpec {
        TweenSpec {
            from: Transform::at(Point::new(100.0, 0.0)),
            to: Transform::IDENTITY,
            duration,
            easing: Easing::EaseOut,
        }
    }

    const CARD: CardKey = CardKey::Deck(CardOrder(0));

    #[test]
    fn easings_are_monotonic_and_bounded() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let mut last = 0.0;
            for step in 0..=20 {
                let value = easing.apply(step as f64 / 20.0);
                assert!(value >= last, "{easing:?} decreased at step {step}");
                last = value;
            }
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_out_front_loads_motion() {
        let mut animator = Animator::new();
        let handle = animator.start(TweenOwner::PlayStack(0), CARD, spec(0.8));

        animator.advance(0.4);
        let halfway = animator.sample(handle).unwrap();
        // Eased progress at t=0.5 is 0.75.
        assert!((halfway.position.x - 25.0).abs() < 1e-9);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut animator = Animator::new();
        let handle = animator.start(TweenOwner::PlayStack(1), CARD, spec(0.8));

        assert!(animator.advance(0.5).is_empty());
        let finished = animator.advance(0.5);
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].handle, handle);
        assert_eq!(finished[0].owner, TweenOwner::PlayStack(1));
        assert_eq!(finished[0].to, Transform::IDENTITY);

        assert!(!animator.is_live(handle));
        assert!(animator.advance(1.0).is_empty());
    }

    #[test]
    fn cancelled_tween_never_completes() {
        let mut animator = Animator::new();
        let handle = animator.start(TweenOwner::PlayStack(0), CARD, spec(0.8));

        assert!(animator.cancel(handle));
        assert!(!animator.cancel(handle));
        assert!(animator.advance(5.0).is_empty());
        assert!(animator.is_idle());
    }

    #[test]
    fn zero_duration_finishes_on_next_frame() {
        let mut animator = Animator::new();
        animator.start(TweenOwner::PlayStack(0), CARD, spec(0.0));

        assert_eq!(animator.advance(0.0).len(), 1);
    }
}
