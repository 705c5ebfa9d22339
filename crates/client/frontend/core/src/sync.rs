//! Per-transition driver.
//!
//! [`ViewSync`] is what the application calls once per state transition. It
//! keeps the card subscriptions in step with the deck, diffs every live
//! subscription against the new version, brings the play stacks in line and
//! draws each dirty layer once.

use std::sync::Arc;

use game_core::{GameState, HypotheticalView};
use observe_store::{BundleId, Selected, Subscription};
use tracing::debug;

use crate::error::{Result, ViewError};
use crate::scene::LayerRenderer;
use crate::subscriptions::{CardSubscriptions, ViewObserver};
use crate::table::TableView;

/// What one transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TransitionReport {
    pub bundles_added: usize,
    pub bundles_removed: usize,
    /// Listeners fired while diffing the new version.
    pub listeners_fired: usize,
    pub stacks_changed: usize,
    pub layers_drawn: usize,
}

fn hypothetical_subscription() -> Subscription<GameState, TableView, ViewError> {
    Subscription::new(
        |state: &GameState| Selected::Value(state.hypothetical.clone()),
        |current: &HypotheticalView, previous: Option<&HypotheticalView>, table: &mut TableView| {
            table.reconcile_hypothetical(previous, current).map(|_| ())
        },
    )
}

pub struct ViewSync {
    observer: ViewObserver,
    cards: CardSubscriptions,
    hypothetical: BundleId,
}

impl ViewSync {
    /// Subscribes the table to its current state.
    ///
    /// The hypothetical subscription is registered first so it is evaluated
    /// before every existing card bundle. Bundles added by a transition fire
    /// at registration, against the new state, before the observer runs.
    pub fn new(table: &mut TableView) -> Result<Self> {
        let mut observer = ViewObserver::new();
        let state = Arc::clone(table.state());

        let hypothetical = observer.observe(&state, table, vec![hypothetical_subscription()])?;
        let mut cards = CardSubscriptions::new();
        cards.sync(state.deck.len(), &mut observer, table)?;
        table.sync_stacks()?;

        Ok(Self {
            observer,
            cards,
            hypothetical,
        })
    }

    /// Number of subscribed cards.
    pub fn card_bundles(&self) -> usize {
        self.cards.len()
    }

    pub fn observer(&self) -> &ViewObserver {
        &self.observer
    }

    pub fn hypothetical_bundle(&self) -> BundleId {
        self.hypothetical
    }

    /// Applies the transition to `next`.
    ///
    /// Any error aborts the transition; dirty layers are only flushed on
    /// success.
    pub fn on_transition<R: LayerRenderer + ?Sized>(
        &mut self,
        next: Arc<GameState>,
        table: &mut TableView,
        renderer: &mut R,
    ) -> Result<TransitionReport> {
        let visible = next.deck.len();
        table.set_state(Arc::clone(&next));

        let bundles_added = self
            .cards
            .on_cards_possibly_added(visible, &mut self.observer, table)?;
        let bundles_removed = self
            .cards
            .on_cards_possibly_removed(visible, &mut self.observer, table)?;
        debug_assert_eq!(self.cards.len(), visible);

        let listeners_fired = self.observer.apply(&next, table)?;
        let stacks_changed = table.sync_stacks()?;
        let layers_drawn = table.scene_mut().flush(renderer);

        let report = TransitionReport {
            bundles_added,
            bundles_removed,
            listeners_fired,
            stacks_changed,
            layers_drawn,
        };
        debug!(target: "frontend::sync", ?report, "transition applied");
        Ok(report)
    }
}
