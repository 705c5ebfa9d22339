//! Card decorations: borders, pip templates and corner indicators.
//!
//! Pip placements only depend on the variant, so they are computed once per
//! variant and shared by every card through the [`DecorationCache`] that the
//! table context owns.

use std::f64::consts::PI;
use std::sync::Arc;

use arrayvec::ArrayVec;
use game_core::{CardState, GameConfig, Rank, START_CARD_RANK, SuitIndex, Variant};

use crate::config::{CARD_H, CARD_W};
use crate::scene::Point;
use crate::view::notes::Note;

/// Outer stroke of every border.
pub const OFF_BLACK: &str = "#0d0d0d";

/// Opacity of a hand card that can no longer be played.
pub const FADED_OPACITY: f64 = 0.4;

/// Border drawn around a card in a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BorderKind {
    Clued,
    ChopMove,
    Finesse,
}

impl BorderKind {
    pub const fn inner_color(self) -> &'static str {
        match self {
            BorderKind::Clued => "orange",
            BorderKind::ChopMove => "#fffce6",
            BorderKind::Finesse => "aqua",
        }
    }

    pub const fn outer_color(self) -> &'static str {
        OFF_BLACK
    }

    /// Picks the border for `card`, if any.
    ///
    /// Touched cards always get the clue border; note-driven borders are only
    /// drawn on untouched cards.
    pub fn for_card(card: &CardState, note: Option<&Note>) -> Option<Self> {
        if card.location.is_played() || card.location.is_discarded() {
            return None;
        }
        if card.is_clued() {
            return Some(BorderKind::Clued);
        }
        let note = note?;
        if note.chop_moved {
            Some(BorderKind::ChopMove)
        } else if note.finessed {
            Some(BorderKind::Finesse)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuitPipPlacement {
    pub suit_index: SuitIndex,
    pub offset: Point,
    /// The pip shape was already used by an earlier suit and is drawn in its
    /// secondary form.
    pub secondary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankPipPlacement {
    pub rank: Rank,
    pub x: f64,
}

/// Where the pips of one variant go on the back of a card.
#[derive(Clone, Debug, PartialEq)]
pub struct PipLayout {
    pub variant_name: String,
    /// Center the suit pips are arranged around.
    pub center: Point,
    pub suit_scale: f64,
    pub suits: ArrayVec<SuitPipPlacement, { GameConfig::MAX_SUITS }>,
    /// Vertical position of the rank pip row.
    pub rank_row_y: f64,
    pub ranks: ArrayVec<RankPipPlacement, { GameConfig::MAX_RANK_PIPS }>,
}

impl PipLayout {
    pub fn for_variant(variant: &Variant) -> Self {
        let num_suits = variant.suits.len() as f64;
        let offset_base = CARD_W * 0.7;

        let mut seen_pips: Vec<&str> = Vec::new();
        let suits = variant
            .suits
            .iter()
            .take(GameConfig::MAX_SUITS)
            .enumerate()
            .map(|(i, suit)| {
                let secondary = seen_pips.contains(&suit.pip.as_str());
                seen_pips.push(suit.pip.as_str());

                let angle = (-(i as f64) / num_suits + 0.25) * PI * 2.0;
                SuitPipPlacement {
                    suit_index: i,
                    offset: Point::new(
                        (offset_base * angle.cos()).floor(),
                        (offset_base * angle.sin()).floor(),
                    ),
                    secondary,
                }
            })
            .collect();

        let five_ranks = variant.ranks.len() == 5;
        let ranks = variant
            .ranks
            .iter()
            .take(GameConfig::MAX_RANK_PIPS)
            .map(|&rank| {
                let x = if five_ranks {
                    (CARD_W * (f64::from(rank) * 0.19 - 0.14)).floor()
                } else {
                    let slot = if rank == START_CARD_RANK { 0 } else { rank };
                    (CARD_W * (f64::from(slot) * 0.15 + 0.05)).floor()
                };
                RankPipPlacement { rank, x }
            })
            .collect();

        Self {
            variant_name: variant.name.clone(),
            center: Point::new((CARD_W * 0.5).floor(), (CARD_H * 0.5).floor()),
            suit_scale: 0.4,
            suits,
            rank_row_y: (CARD_H * 0.81).floor(),
            ranks,
        }
    }
}

/// Placement of the corner indicators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorLayout {
    pub note: Point,
    pub critical: Point,
    pub double_discard: Point,
    pub size: f64,
}

impl IndicatorLayout {
    /// Corner triangles (multi-colored suits) push the indicators inwards so
    /// they do not overlap.
    pub fn for_variant(variant: &Variant) -> Self {
        let shift = if variant.offset_corner_elements() { 0.05 } else { 0.0 };
        let bottom_left = Point::new((0.06 + shift) * CARD_W, (0.82 - shift) * CARD_H);
        Self {
            note: Point::new((0.78 - shift) * CARD_W, (0.03 + shift) * CARD_H),
            critical: bottom_left,
            double_discard: bottom_left,
            size: 0.2 * CARD_W,
        }
    }
}

/// Per-session cache of variant-dependent decoration templates.
#[derive(Clone, Debug, Default)]
pub struct DecorationCache {
    /// Variant the templates were built for.
    source: Option<Variant>,
    pips: Option<Arc<PipLayout>>,
    indicators: Option<IndicatorLayout>,
    rebuilds: usize,
}

impl DecorationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pip layout for `variant`, rebuilding it only when the
    /// variant changed since the last call.
    pub fn pips_for(&mut self, variant: &Variant) -> Arc<PipLayout> {
        match &self.pips {
            Some(layout) if self.source.as_ref() == Some(variant) => Arc::clone(layout),
            _ => {
                let layout = Arc::new(PipLayout::for_variant(variant));
                self.source = Some(variant.clone());
                self.pips = Some(Arc::clone(&layout));
                self.indicators = Some(IndicatorLayout::for_variant(variant));
                self.rebuilds += 1;
                layout
            }
        }
    }

    pub fn indicators_for(&mut self, variant: &Variant) -> IndicatorLayout {
        self.pips_for(variant);
        self.indicators
            .unwrap_or_else(|| IndicatorLayout::for_variant(variant))
    }

    /// Number of times the templates were (re)built.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}
