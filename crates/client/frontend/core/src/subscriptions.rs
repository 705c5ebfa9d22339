//! Per-card subscription bundles.
//!
//! Every card in the visible state owns one bundle of five subscriptions,
//! each projecting a small slice of the state tree and calling one updater
//! when that slice changes. Bundles are created and destroyed strictly at the
//! tail, in lock-step with the length of the deck.

use std::sync::Arc;

use game_core::{CardIdentity, CardLocation, CardOrder, CardState, CardStatus, GameState, Rank, SuitIndex};
use observe_store::{BundleId, Selected, StateObserver, Subscription};
use tracing::{debug, trace};

use crate::error::{InvariantViolation, Result, ViewError};
use crate::scene::{CardKey, LayerId};
use crate::table::TableView;
use crate::view::updaters;

/// Observer specialized to the card table.
pub type ViewObserver = StateObserver<GameState, TableView, ViewError>;

type ViewSubscription = Subscription<GameState, TableView, ViewError>;

#[derive(Clone, Debug, PartialEq, Eq)]
struct BorderProjection {
    num_positive_clues: u8,
    location: CardLocation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct StatusProjection {
    status: Option<CardStatus>,
    clued: bool,
    location: CardLocation,
    in_double_discard: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NoteProjection {
    possible_cards: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PipProjection {
    possible_cards_from_clues: usize,
    possible_cards: usize,
    possible_cards_for_empathy: usize,
    positive_rank_clues: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct VisualProjection {
    rank: Option<Rank>,
    suit_index: Option<SuitIndex>,
    location: CardLocation,
    suit_determined: bool,
    rank_determined: bool,
    possible_cards_from_clues: usize,
    identity: Option<CardIdentity>,
}

/// Wraps a selector so it yields [`Selected::Skip`] while `order` is outside
/// the visible deck.
fn guarded<T>(
    order: CardOrder,
    select: impl Fn(&GameState, &CardState) -> T + 'static,
) -> impl Fn(&GameState) -> Selected<T> + 'static {
    move |state: &GameState| match state.card(order) {
        Some(card) => Selected::Value(select(state, card)),
        None => Selected::Skip,
    }
}

fn card_subscription<T>(
    order: CardOrder,
    label: &'static str,
    select: impl Fn(&GameState, &CardState) -> T + 'static,
    update: fn(&mut TableView, CardOrder) -> Result<()>,
) -> ViewSubscription
where
    T: PartialEq + 'static,
{
    Subscription::notify(guarded(order, select), move |table: &mut TableView| {
        trace!(target: "frontend::subscriptions", %order, subscription = label, "listener fired");
        update(table, order)
    })
}

/// The five subscriptions of one card.
fn card_bundle(order: CardOrder) -> Vec<ViewSubscription> {
    vec![
        card_subscription(
            order,
            "border",
            |_, card| BorderProjection {
                num_positive_clues: card.num_positive_clues,
                location: card.location,
            },
            updaters::update_border,
        ),
        card_subscription(
            order,
            "status",
            |state, card| StatusProjection {
                status: state.status_of(card.suit_index, card.rank),
                clued: card.is_clued(),
                location: card.location,
                in_double_discard: card.in_double_discard,
            },
            updaters::update_card_status,
        ),
        card_subscription(
            order,
            "note",
            |_, card| NoteProjection {
                possible_cards: card.possible_cards.len(),
            },
            updaters::check_note_disproved,
        ),
        card_subscription(
            order,
            "pips",
            |_, card| PipProjection {
                possible_cards_from_clues: card.possible_cards_from_clues.len(),
                possible_cards: card.possible_cards.len(),
                possible_cards_for_empathy: card.possible_cards_for_empathy.len(),
                positive_rank_clues: card.positive_rank_clues.len(),
            },
            updaters::update_pips,
        ),
        card_subscription(
            order,
            "visuals",
            move |state, card| VisualProjection {
                rank: card.rank,
                suit_index: card.suit_index,
                location: card.location,
                suit_determined: card.suit_determined,
                rank_determined: card.rank_determined,
                possible_cards_from_clues: card.possible_cards_from_clues.len(),
                identity: state.identity(order),
            },
            updaters::update_card_visuals,
        ),
    ]
}

/// Keeps one subscription bundle per visible card.
#[derive(Debug, Default)]
pub struct CardSubscriptions {
    /// Bundle of card `i` at index `i`.
    bundles: Vec<BundleId>,
}

impl CardSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bundles, which is also the number of subscribed cards.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Subscribes every card in `[len, visible)`.
    ///
    /// Each new bundle fires once against the current state. Returns the
    /// number of bundles created.
    pub fn on_cards_possibly_added(
        &mut self,
        visible: usize,
        observer: &mut ViewObserver,
        table: &mut TableView,
    ) -> Result<usize> {
        let state = Arc::clone(&table.state);
        let deck_position = table.config.cards.deck_position;
        let start = self.bundles.len();

        for index in start..visible {
            let order = CardOrder(index);
            if let Some(card) = state.card(order) {
                if card.order != order {
                    return Err(InvariantViolation::OrderMismatch {
                        position: index,
                        found: card.order,
                    }
                    .into());
                }
            }

            table.scene.materialize(order, deck_position);
            let bundle = observer.observe(&state, table, card_bundle(order))?;
            self.bundles.push(bundle);
        }

        let added = visible.saturating_sub(start);
        if added > 0 {
            debug!(target: "frontend::subscriptions", added, live = self.bundles.len(), "card bundles created");
        }
        Ok(added)
    }

    /// Unsubscribes cards from the tail until only `visible` remain.
    ///
    /// Each removed card view is sent back to the deck first, so a later
    /// re-add starts from a known position. Returns the number removed.
    pub fn on_cards_possibly_removed(
        &mut self,
        visible: usize,
        observer: &mut ViewObserver,
        table: &mut TableView,
    ) -> Result<usize> {
        let deck_position = table.config.cards.deck_position;
        let mut removed = 0;

        while self.bundles.len() > visible {
            let order = CardOrder(self.bundles.len() - 1);
            let key = CardKey::Deck(order);
            table
                .scene
                .card_mut(key)
                .ok_or(InvariantViolation::UnknownCard(key))?
                .move_to_deck_position(deck_position);

            if let Some(bundle) = self.bundles.pop() {
                observer.unsubscribe(bundle);
            }
            removed += 1;
        }

        if removed > 0 {
            table.scene.batch_draw(LayerId::Card);
            debug!(target: "frontend::subscriptions", removed, live = self.bundles.len(), "card bundles dropped");
        }
        Ok(removed)
    }

    /// Runs both paths; afterwards exactly `visible` cards are subscribed.
    pub fn sync(
        &mut self,
        visible: usize,
        observer: &mut ViewObserver,
        table: &mut TableView,
    ) -> Result<(usize, usize)> {
        let added = self.on_cards_possibly_added(visible, observer, table)?;
        let removed = self.on_cards_possibly_removed(visible, observer, table)?;
        Ok((added, removed))
    }
}
