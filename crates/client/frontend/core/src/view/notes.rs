//! Player notes attached to cards.
//!
//! Notes are free text. The view only cares about a few things it can read
//! out of them: the card identities the note claims, and the chop move and
//! finesse markers that change the card border.

use std::collections::HashMap;

use game_core::{CardOrder, Rank, SuitIndex, Variant};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Note {
    pub text: String,
    /// Identities the note claims the card could be.
    pub identities: Vec<(SuitIndex, Rank)>,
    pub chop_moved: bool,
    pub finessed: bool,
}

impl Note {
    /// Parses `text` against the suits and ranks of `variant`.
    ///
    /// Recognized tokens (case-insensitive, separated by whitespace, commas or
    /// `|`): `cm` / `chop move`, `f` / `finesse`, a suit abbreviation followed
    /// by a rank (`r3`), a bare rank (`3`, every suit) and a bare suit
    /// abbreviation (`r`, every rank). Everything else is ignored.
    pub fn parse(text: &str, variant: &Variant) -> Self {
        let lowered = text.to_lowercase();
        let mut note = Note {
            text: text.to_owned(),
            chop_moved: lowered.contains("chop move"),
            ..Note::default()
        };

        let tokens = lowered
            .split(|c: char| c.is_whitespace() || c == ',' || c == '|')
            .filter(|token| !token.is_empty());

        for token in tokens {
            match token {
                "cm" => note.chop_moved = true,
                "f" | "finesse" => note.finessed = true,
                _ => note.push_identities(token, variant),
            }
        }
        note
    }

    fn push_identities(&mut self, token: &str, variant: &Variant) {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return;
        };
        let rest = chars.as_str();

        if let Ok(rank) = token.parse::<Rank>() {
            if variant.has_rank(rank) {
                for suit_index in 0..variant.suits.len() {
                    self.push(suit_index, rank);
                }
            }
            return;
        }

        let Some(suit_index) = variant.suit_by_abbreviation(first) else {
            return;
        };
        if rest.is_empty() {
            for &rank in &variant.ranks {
                self.push(suit_index, rank);
            }
        } else if let Ok(rank) = rest.parse::<Rank>() {
            if variant.has_rank(rank) {
                self.push(suit_index, rank);
            }
        }
    }

    fn push(&mut self, suit_index: SuitIndex, rank: Rank) {
        if !self.identities.contains(&(suit_index, rank)) {
            self.identities.push((suit_index, rank));
        }
    }

    /// A note is disproved when it names identities and none of them is still
    /// possible.
    pub fn is_disproved(&self, possible_cards: &[(SuitIndex, Rank)]) -> bool {
        !self.identities.is_empty()
            && self
                .identities
                .iter()
                .all(|identity| !possible_cards.contains(identity))
    }
}

/// Notes of the local player, by card.
#[derive(Clone, Debug, Default)]
pub struct NoteBook {
    notes: HashMap<CardOrder, Note>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a note. An empty text removes it.
    pub fn set(&mut self, order: CardOrder, text: &str, variant: &Variant) {
        if text.trim().is_empty() {
            self.notes.remove(&order);
        } else {
            self.notes.insert(order, Note::parse(text, variant));
        }
    }

    pub fn get(&self, order: CardOrder) -> Option<&Note> {
        self.notes.get(&order)
    }

    pub fn remove(&mut self, order: CardOrder) -> Option<Note> {
        self.notes.remove(&order)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
