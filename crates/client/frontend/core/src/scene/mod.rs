//! Retained scene the view layer mutates.
//!
//! Pixels are someone else's problem: the scene only records what every card
//! node should look like, and which layers need to be drawn again. Redraw
//! requests are coalesced in a [`LayerSet`] and handed to a [`LayerRenderer`]
//! once per transition or frame.

pub mod card;

use bitflags::bitflags;
use game_core::{CardOrder, SuitIndex};

pub use card::{CardKey, CardParent, CardView, NoteIndicator, PipView, StatusOverlay};

/// Absolute or stack-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The animatable properties of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Point,
    pub scale: f64,
    /// Degrees.
    pub rotation: f64,
    pub opacity: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        scale: 1.0,
        rotation: 0.0,
        opacity: 1.0,
    };

    pub const fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Interpolates towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, to: &Transform, t: f64) -> Transform {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Transform {
            position: Point::new(
                mix(self.position.x, to.position.x),
                mix(self.position.y, to.position.y),
            ),
            scale: mix(self.scale, to.scale),
            rotation: mix(self.rotation, to.rotation),
            opacity: mix(self.opacity, to.opacity),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Render layers that can be redrawn independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LayerId {
    Card,
    Ui,
}

bitflags! {
    /// Layers with a pending redraw request.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct LayerSet: u8 {
        const CARD = 0b01;
        const UI   = 0b10;
    }
}

impl From<LayerId> for LayerSet {
    fn from(layer: LayerId) -> Self {
        match layer {
            LayerId::Card => Self::CARD,
            LayerId::Ui => Self::UI,
        }
    }
}

/// Drawing substrate for the retained scene.
pub trait LayerRenderer {
    /// Draws one layer of `scene`. Called at most once per layer per flush.
    fn draw_layer(&mut self, layer: LayerId, scene: &Scene);
}

/// All card nodes of the table plus the pending redraw set.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Deck cards, indexed by order. Views are never dropped, only reset.
    cards: Vec<CardView>,
    /// Stack base cards, indexed by suit.
    stack_bases: Vec<CardView>,
    dirty: LayerSet,
    starting_hand_hidden: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the stack base nodes, one per suit.
    pub fn with_stack_bases(num_suits: usize, positions: impl Fn(SuitIndex) -> Point) -> Self {
        let stack_bases = (0..num_suits)
            .map(|suit| CardView::stack_base(suit, positions(suit)))
            .collect();
        Self {
            stack_bases,
            ..Self::default()
        }
    }

    pub fn card(&self, key: CardKey) -> Option<&CardView> {
        match key {
            CardKey::Deck(order) => self.cards.get(order.index()),
            CardKey::StackBase(suit) => self.stack_bases.get(suit),
        }
    }

    pub fn card_mut(&mut self, key: CardKey) -> Option<&mut CardView> {
        match key {
            CardKey::Deck(order) => self.cards.get_mut(order.index()),
            CardKey::StackBase(suit) => self.stack_bases.get_mut(suit),
        }
    }

    /// Returns the view for `order`, creating it (and any missing view below
    /// it) at `resting` if it does not exist yet.
    pub fn materialize(&mut self, order: CardOrder, resting: Point) -> &mut CardView {
        while self.cards.len() <= order.index() {
            let next = CardOrder(self.cards.len());
            self.cards.push(CardView::new(CardKey::Deck(next), resting));
        }
        &mut self.cards[order.index()]
    }

    /// Number of deck card views ever created.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        self.cards.iter().chain(self.stack_bases.iter())
    }

    /// Requests a redraw of `layer` at the end of the current batch.
    pub fn batch_draw(&mut self, layer: LayerId) {
        self.dirty |= LayerSet::from(layer);
    }

    pub fn is_dirty(&self, layer: LayerId) -> bool {
        self.dirty.contains(LayerSet::from(layer))
    }

    pub fn dirty_layers(&self) -> LayerSet {
        self.dirty
    }

    /// Draws every dirty layer exactly once and clears the redraw requests.
    ///
    /// Returns the number of layers drawn.
    pub fn flush<R: LayerRenderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        use strum::IntoEnumIterator;

        let dirty = std::mem::take(&mut self.dirty);
        let mut drawn = 0;
        for layer in LayerId::iter() {
            if dirty.contains(LayerSet::from(layer)) {
                renderer.draw_layer(layer, self);
                drawn += 1;
            }
        }
        drawn
    }

    pub fn starting_hand_hidden(&self) -> bool {
        self.starting_hand_hidden
    }

    pub fn set_starting_hand_hidden(&mut self, hidden: bool) {
        self.starting_hand_hidden = hidden;
        self.batch_draw(LayerId::Card);
        self.batch_draw(LayerId::Ui);
    }
}
