//! Variant definitions: which suits and ranks are in play and which special
//! rules change how the table is drawn.

use crate::config::GameConfig;
use crate::state::{Rank, SuitIndex};

/// One suit of a variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suit {
    pub name: String,
    /// Single-letter abbreviation used when parsing notes.
    pub abbreviation: char,
    /// Fill color, or `"multi"` for rainbow-like suits drawn with a gradient.
    pub fill: String,
    /// Name of the pip shape.
    pub pip: String,
    /// Reversed suits are played from 5 down to 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reversed: bool,
}

impl Suit {
    pub fn new(name: &str, abbreviation: char, fill: &str, pip: &str) -> Self {
        Self {
            name: name.to_owned(),
            abbreviation,
            fill: fill.to_owned(),
            pip: pip.to_owned(),
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn is_multi_fill(&self) -> bool {
        self.fill == "multi"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub name: String,
    pub suits: Vec<Suit>,
    pub ranks: Vec<Rank>,
    /// "Throw It in a Hole": played cards are hidden from the players.
    #[cfg_attr(feature = "serde", serde(default))]
    pub throw_it_in_a_hole: bool,
}

impl Variant {
    pub fn new(name: &str, suits: Vec<Suit>, ranks: Vec<Rank>) -> Self {
        debug_assert!(suits.len() <= GameConfig::MAX_SUITS);
        debug_assert!(ranks.len() <= GameConfig::MAX_RANK_PIPS);
        Self {
            name: name.to_owned(),
            suits,
            ranks,
            throw_it_in_a_hole: false,
        }
    }

    /// The standard five-suit game.
    pub fn no_variant() -> Self {
        Self::new(
            "No Variant",
            vec![
                Suit::new("Red", 'r', "#d72a2a", "heart"),
                Suit::new("Yellow", 'y', "#d8d545", "star"),
                Suit::new("Green", 'g', "#00cc00", "leaf"),
                Suit::new("Blue", 'b', "#0044cc", "moon"),
                Suit::new("Purple", 'p', "#6600cc", "spade"),
            ],
            vec![1, 2, 3, 4, 5],
        )
    }

    pub fn with_throw_it_in_a_hole(mut self) -> Self {
        self.throw_it_in_a_hole = true;
        self
    }

    /// Whether played cards are hidden from the players.
    pub fn is_throw_it_in_a_hole(&self) -> bool {
        self.throw_it_in_a_hole
    }

    pub fn has_reversed_suits(&self) -> bool {
        self.suits.iter().any(|suit| suit.reversed)
    }

    /// Whether cards draw colored corner triangles, which pushes the corner
    /// indicators inwards.
    pub fn offset_corner_elements(&self) -> bool {
        self.suits.iter().any(Suit::is_multi_fill)
    }

    pub fn suit(&self, suit_index: SuitIndex) -> Option<&Suit> {
        self.suits.get(suit_index)
    }

    pub fn max_rank(&self) -> Rank {
        self.ranks.iter().copied().max().unwrap_or(0)
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.ranks.contains(&rank)
    }

    pub fn suit_by_abbreviation(&self, abbreviation: char) -> Option<SuitIndex> {
        let wanted = abbreviation.to_ascii_lowercase();
        self.suits
            .iter()
            .position(|suit| suit.abbreviation.to_ascii_lowercase() == wanted)
    }

    /// Parses a variant definition from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::StateError> {
        let variant: Self = serde_json::from_str(json)
            .map_err(|err| crate::StateError::InvalidVariant(err.to_string()))?;
        if variant.suits.is_empty() || variant.suits.len() > GameConfig::MAX_SUITS {
            return Err(crate::StateError::InvalidVariant(format!(
                "{} suits (expected 1..={})",
                variant.suits.len(),
                GameConfig::MAX_SUITS
            )));
        }
        if variant.ranks.len() > GameConfig::MAX_RANK_PIPS {
            return Err(crate::StateError::InvalidVariant(format!(
                "{} ranks (expected at most {})",
                variant.ranks.len(),
                GameConfig::MAX_RANK_PIPS
            )));
        }
        Ok(variant)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::no_variant()
    }
}
