use std::sync::Arc;

use super::{CardIdentity, CardOrder};

/// Hypothetical ("what-if") overlay of the state tree.
///
/// `morphed_identities` is only meaningful while `active` is set, or in the
/// first version right after it was cleared. Index `i` overrides the identity
/// shown for card order `i`; `None` means "not morphed".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HypotheticalView {
    pub active: bool,
    pub morphed_identities: Option<Arc<Vec<Option<CardIdentity>>>>,
    /// Whether cards drawn during the hypothetical are revealed.
    pub show_drawn_cards: bool,
}

impl HypotheticalView {
    /// The overlay outside of any hypothetical.
    pub const fn real() -> Self {
        Self {
            active: false,
            morphed_identities: None,
            show_drawn_cards: false,
        }
    }

    /// An active hypothetical with the given morphed identities.
    pub fn active(morphed_identities: Vec<Option<CardIdentity>>) -> Self {
        Self {
            active: true,
            morphed_identities: Some(Arc::new(morphed_identities)),
            show_drawn_cards: false,
        }
    }

    /// The identity shown for `order` while this overlay is active.
    pub fn morphed(&self, order: CardOrder) -> Option<CardIdentity> {
        if !self.active {
            return None;
        }
        self.morphed_identities
            .as_ref()
            .and_then(|identities| identities.get(order.index()).copied().flatten())
    }
}
