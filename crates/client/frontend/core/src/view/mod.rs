//! What a card looks like, derived from the state tree.
//!
//! - `decorations`: borders, pip templates and indicator placement
//! - `images`: generated card image registry
//! - `notes`: player notes and what they claim
//! - `updaters`: the functions subscriptions call to rewrite a card view
pub mod decorations;
pub mod images;
pub mod notes;
pub mod updaters;

pub use decorations::{BorderKind, DecorationCache, IndicatorLayout, PipLayout};
pub use images::{CardImages, ImageSize, card_image_name};
pub use notes::{Note, NoteBook};
pub use updaters::CardRefresh;
