//! Frontend configuration structures and loaders.
//!
//! Sizes are expressed in the unscaled card coordinate space; the embedding
//! application scales the whole stage to the window.

use std::env;

use crate::scene::Point;

/// Natural width of a card image.
pub const CARD_W: f64 = 286.0;
/// Natural height of a card image.
pub const CARD_H: f64 = 406.0;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontendConfig {
    pub cards: CardConfig,
    pub animation: AnimationConfig,
    pub stacks: StackConfig,
}

impl FrontendConfig {
    pub const fn new(cards: CardConfig, animation: AnimationConfig, stacks: StackConfig) -> Self {
        Self {
            cards,
            animation,
            stacks,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CARD_WIDTH` - Natural card width (default: 286)
    /// - `CARD_HEIGHT` - Natural card height (default: 406)
    /// - `TWEEN_DURATION_SECS` - Play stack animation length (default: 0.8)
    /// - `SPEEDRUN` - Skip animations and shadows (default: false)
    /// - `STACK_HEIGHT` - Height of a play stack slot (default: 406)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = read_env::<f64>("CARD_WIDTH").filter(|w| *w > 0.0) {
            config.cards.width = width;
        }
        if let Some(height) = read_env::<f64>("CARD_HEIGHT").filter(|h| *h > 0.0) {
            config.cards.height = height;
        }

        if let Some(duration) = read_env::<f64>("TWEEN_DURATION_SECS") {
            config.animation.tween_duration = duration.max(0.0);
        }
        if let Some(speedrun) = read_env_bool("SPEEDRUN") {
            config.animation.speedrun = speedrun;
        }

        if let Some(height) = read_env::<f64>("STACK_HEIGHT").filter(|h| *h > 0.0) {
            config.stacks.height = height;
        }

        config
    }

    /// Duration of a layout tween, in seconds. Zero in speedrun mode.
    pub fn tween_duration(&self) -> f64 {
        if self.animation.speedrun {
            0.0
        } else {
            self.animation.tween_duration
        }
    }

    /// Whether cards draw drop shadows.
    pub fn shadows_enabled(&self) -> bool {
        !self.animation.speedrun
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub width: f64,
    pub height: f64,
    /// How far a clued card in a hand is raised, as a fraction of its height.
    pub raise_fraction: f64,
    /// Resting position of cards that are not on the table (the deck).
    pub deck_position: Point,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: CARD_W,
            height: CARD_H,
            raise_fraction: 0.1,
            deck_position: Point::new(0.0, 0.0),
        }
    }
}

impl CardConfig {
    pub fn raise_offset(&self) -> f64 {
        self.height * self.raise_fraction
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub tween_duration: f64,
    pub speedrun: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tween_duration: 0.8,
            speedrun: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StackConfig {
    /// Height every card is scaled to once it lands on a play stack.
    pub height: f64,
    /// Absolute position of the first play stack.
    pub origin: Point,
    /// Horizontal distance between two play stacks.
    pub spacing: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            height: CARD_H,
            origin: Point::new(0.0, 0.0),
            spacing: CARD_W * 1.15,
        }
    }
}

impl StackConfig {
    /// Absolute position of the play stack for `suit_index`.
    pub fn position(&self, suit_index: usize) -> Point {
        Point::new(
            self.origin.x + self.spacing * suit_index as f64,
            self.origin.y,
        )
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speedrun_skips_tweens_and_shadows() {
        let mut config = FrontendConfig::default();
        assert_eq!(config.tween_duration(), 0.8);
        assert!(config.shadows_enabled());

        config.animation.speedrun = true;
        assert_eq!(config.tween_duration(), 0.0);
        assert!(!config.shadows_enabled());
    }

    #[test]
    fn stacks_are_laid_out_left_to_right() {
        let stacks = StackConfig::default();
        assert_eq!(stacks.position(0), Point::new(0.0, 0.0));
        assert!(stacks.position(2).x > stacks.position(1).x);
    }
}
