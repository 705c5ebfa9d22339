//! Registry of generated card images.
//!
//! Images are produced by the asset build; the view only looks them up by
//! name. Asking for a name that was never generated is a content defect and
//! fails with [`ViewError::MissingImage`].

use std::collections::HashMap;

use game_core::{Rank, STACK_BASE_RANK, Suit, UNKNOWN_CARD_RANK, Variant};

use crate::config::{CARD_H, CARD_W};
use crate::error::{Result, ViewError};

/// Name of the image drawn for cards still in the deck.
pub const DECK_BACK: &str = "deck-back";

/// Suit name used for cards whose suit is not known.
pub const UNKNOWN_SUIT: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn halved(self) -> Self {
        Self::new(self.width / 2, self.height / 2)
    }
}

/// Image name for a (possibly partial) identity.
pub fn card_image_name(suit: Option<&Suit>, rank: Option<Rank>) -> String {
    let suit_name = suit.map_or(UNKNOWN_SUIT, |suit| suit.name.as_str());
    format!("card-{suit_name}-{}", rank.unwrap_or(UNKNOWN_CARD_RANK))
}

#[derive(Clone, Debug, Default)]
pub struct CardImages {
    images: HashMap<String, ImageSize>,
    /// Downscaled copies per image, one entry per halving step.
    scaled: HashMap<String, Vec<ImageSize>>,
}

impl CardImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the full set of images the asset build generates for `variant`.
    pub fn standard(variant: &Variant) -> Self {
        let mut images = Self::new();
        let size = ImageSize::new(CARD_W as u32, CARD_H as u32);

        images.insert(DECK_BACK, size);
        let suits = variant.suits.iter().map(Some).chain(std::iter::once(None));
        for suit in suits {
            for &rank in &variant.ranks {
                images.insert(card_image_name(suit, Some(rank)), size);
            }
            images.insert(card_image_name(suit, None), size);
            if let Some(suit) = suit {
                images.insert(card_image_name(Some(suit), Some(STACK_BASE_RANK)), size);
            }
        }
        images
    }

    pub fn insert(&mut self, name: impl Into<String>, size: ImageSize) {
        let name = name.into();
        self.scaled.remove(&name);
        self.images.insert(name, size);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn require(&self, name: &str) -> Result<ImageSize> {
        self.images
            .get(name)
            .copied()
            .ok_or_else(|| ViewError::missing_image(name))
    }

    /// Picks the source to draw `name` at `display` pixels.
    ///
    /// The source is halved in each dimension until it is no more than twice
    /// the display width. Halved copies are memoized per name. Returns `None`
    /// when the target is smaller than one pixel and nothing should be drawn.
    pub fn scaled_source(&mut self, name: &str, display_w: f64, display_h: f64) -> Result<Option<ImageSize>> {
        let mut source = self.require(name)?;
        if display_w < 1.0 || display_h < 1.0 {
            return Ok(None);
        }

        let steps = self.scaled.entry(name.to_owned()).or_default();
        let mut step = 0;
        while display_w < f64::from(source.width) / 2.0 {
            let next = match steps.get(step) {
                Some(cached) => *cached,
                None => {
                    let halved = source.halved();
                    steps.push(halved);
                    halved
                }
            };
            source = next;
            step += 1;
        }
        Ok(Some(source))
    }

    /// Number of memoized halving steps for `name`.
    pub fn scaled_steps(&self, name: &str) -> usize {
        self.scaled.get(name).map_or(0, Vec::len)
    }
}
