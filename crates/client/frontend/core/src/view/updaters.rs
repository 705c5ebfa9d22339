//! Stateless card updaters.
//!
//! Each updater reads the current state version from the [`TableView`],
//! rewrites one aspect of a card view and requests a batched redraw of the
//! card layer. An order past the end of the deck is silently skipped (the
//! card left the visible state in the same transition); an order inside the
//! deck without a view is an invariant violation.

use std::sync::Arc;

use bitflags::bitflags;
use game_core::{CardLocation, CardOrder, CardState, CardStatus, GameState};
use tracing::trace;

use crate::error::{InvariantViolation, Result};
use crate::scene::{CardKey, CardParent, CardView, LayerId};
use crate::table::TableView;
use crate::view::decorations::{BorderKind, FADED_OPACITY};
use crate::view::images::{DECK_BACK, card_image_name};

bitflags! {
    /// Aspects of a card view to recompute.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CardRefresh: u8 {
        const BORDER  = 0b00001;
        const STATUS  = 0b00010;
        const NOTE    = 0b00100;
        const PIPS    = 0b01000;
        const VISUALS = 0b10000;

        const ALL = Self::BORDER.bits()
                  | Self::STATUS.bits()
                  | Self::NOTE.bits()
                  | Self::PIPS.bits()
                  | Self::VISUALS.bits();
    }
}

/// Runs every updater selected by `scope`, in a fixed order.
pub fn refresh(table: &mut TableView, order: CardOrder, scope: CardRefresh) -> Result<()> {
    if scope.contains(CardRefresh::BORDER) {
        update_border(table, order)?;
    }
    if scope.contains(CardRefresh::STATUS) {
        update_card_status(table, order)?;
    }
    if scope.contains(CardRefresh::NOTE) {
        check_note_disproved(table, order)?;
    }
    if scope.contains(CardRefresh::PIPS) {
        update_pips(table, order)?;
    }
    if scope.contains(CardRefresh::VISUALS) {
        update_card_visuals(table, order)?;
    }
    Ok(())
}

/// Resolves the state and the view of `order`.
///
/// Returns `Ok(None)` when the card is not part of the visible state.
fn resolve<'a>(
    state: &'a GameState,
    table: &'a mut TableView,
    order: CardOrder,
) -> Result<Option<(&'a CardState, &'a mut CardView)>> {
    let Some(card) = state.card(order) else {
        return Ok(None);
    };
    let key = CardKey::Deck(order);
    let view = table
        .scene
        .card_mut(key)
        .ok_or(InvariantViolation::UnknownCard(key))?;
    Ok(Some((card, view)))
}

/// Border, shadow and raise offset.
pub fn update_border(table: &mut TableView, order: CardOrder) -> Result<()> {
    let state = Arc::clone(&table.state);
    let Some(card) = state.card(order) else {
        return Ok(());
    };
    let border = BorderKind::for_card(card, table.notes.get(order));
    let shadow = table.config.shadows_enabled();
    let raise_offset = table.config.cards.raise_offset();

    let Some((card, view)) = resolve(&state, table, order)? else {
        return Ok(());
    };
    view.border = border;
    view.shadow = shadow;

    // Raised cards sit `raise_offset` above their slot.
    let raised = card.is_clued() && card.location.is_hand();
    if raised != view.raised {
        view.transform.position.y += if raised { -raise_offset } else { raise_offset };
        view.raised = raised;
    }

    trace!(target: "frontend::view", %order, ?border, "border updated");
    table.scene.batch_draw(LayerId::Card);
    Ok(())
}

/// Critical indicator, trash fade and double discard indicator.
pub fn update_card_status(table: &mut TableView, order: CardOrder) -> Result<()> {
    let state = Arc::clone(&table.state);
    let Some((card, view)) = resolve(&state, table, order)? else {
        return Ok(());
    };

    let status = state.status_of(card.suit_index, card.rank);
    let on_table = card.location.is_played() || card.location.is_discarded();
    let in_hand = card.location.is_hand();

    view.status.critical = status == Some(CardStatus::Critical) && !on_table;
    view.status.faded = status == Some(CardStatus::Trash) && in_hand;
    view.status.double_discard = card.in_double_discard && in_hand;

    // A tweening card belongs to its layout; its opacity is not ours to touch.
    if in_hand && !view.is_busy() {
        view.transform.opacity = if view.status.faded { FADED_OPACITY } else { 1.0 };
    }

    table.scene.batch_draw(LayerId::Card);
    Ok(())
}

/// Note indicator, marked when every identity the note names is impossible.
pub fn check_note_disproved(table: &mut TableView, order: CardOrder) -> Result<()> {
    let state = Arc::clone(&table.state);
    let (visible, disproved) = match (state.card(order), table.notes.get(order)) {
        (None, _) => return Ok(()),
        (Some(_), None) => (false, false),
        (Some(card), Some(note)) => (true, note.is_disproved(&card.possible_cards)),
    };

    let Some((_, view)) = resolve(&state, table, order)? else {
        return Ok(());
    };
    view.note.visible = visible;
    view.note.disproved = disproved;

    table.scene.batch_draw(LayerId::Card);
    Ok(())
}

/// Struck-out suit and rank pips.
pub fn update_pips(table: &mut TableView, order: CardOrder) -> Result<()> {
    let state = Arc::clone(&table.state);
    let variant = Arc::clone(&table.settings.variant);
    let layout = table.decorations.pips_for(&variant);
    let empathy = table.settings.empathy;

    let Some((card, view)) = resolve(&state, table, order)? else {
        return Ok(());
    };

    let possible = if empathy {
        &card.possible_cards_for_empathy
    } else {
        &card.possible_cards
    };

    view.pips.visible = !(card.suit_determined && card.rank_determined);
    view.pips.suit_struck = layout
        .suits
        .iter()
        .map(|pip| !possible.iter().any(|&(suit, _)| suit == pip.suit_index))
        .collect();
    view.pips.rank_struck = layout
        .ranks
        .iter()
        .map(|pip| !possible.iter().any(|&(_, rank)| rank == pip.rank))
        .collect();
    view.pips.rank_positive = layout
        .ranks
        .iter()
        .map(|pip| card.positive_rank_clues.contains(&pip.rank))
        .collect();

    table.scene.batch_draw(LayerId::Card);
    Ok(())
}

/// Bare image, container and direction arrow.
///
/// The drawn identity is, in priority order: the morphed identity of an
/// active hypothetical, the revealed identity, then whatever the card itself
/// has determined. Empathy ignores revealed identities of cards in a hand;
/// played and discarded cards are public.
pub fn update_card_visuals(table: &mut TableView, order: CardOrder) -> Result<()> {
    let state = Arc::clone(&table.state);
    let variant = Arc::clone(&table.settings.variant);
    let empathy = table.settings.empathy;

    let Some(card) = state.card(order) else {
        return Ok(());
    };

    let revealed = if empathy && card.location.is_hand() {
        None
    } else {
        state.identity(order)
    };
    let identity = state.hypothetical.morphed(order).or(revealed);
    let suit_index = identity
        .and_then(|identity| identity.suit_index)
        .or_else(|| card.suit_determined.then_some(card.suit_index).flatten());
    let rank = identity
        .and_then(|identity| identity.rank)
        .or_else(|| card.rank_determined.then_some(card.rank).flatten());

    let suit = suit_index.and_then(|index| variant.suit(index));
    let image = match card.location {
        CardLocation::Deck => DECK_BACK.to_owned(),
        _ => card_image_name(suit, rank),
    };
    table.images.require(&image)?;

    let direction_arrow =
        variant.has_reversed_suits() && suit.is_some_and(|suit| suit.reversed);

    let Some((card, view)) = resolve(&state, table, order)? else {
        return Ok(());
    };
    view.suit_index = suit_index;
    view.rank = rank;
    view.bare_image = Some(image);
    view.direction_arrow = direction_arrow;

    // Play stacks own the parent of their members.
    match card.location {
        CardLocation::Deck => {
            view.parent = Some(CardParent::Deck);
            view.visible = false;
        }
        CardLocation::Hand(player) => {
            view.parent = Some(CardParent::Hand(player));
            view.visible = true;
        }
        CardLocation::Discard => {
            view.parent = Some(CardParent::Discard);
            view.visible = true;
        }
        CardLocation::OffStage => {
            view.parent = None;
            view.visible = false;
        }
        CardLocation::PlayStack(_) => {}
    }

    trace!(target: "frontend::view", %order, ?suit_index, ?rank, "card visuals updated");
    table.scene.batch_draw(LayerId::Card);
    Ok(())
}
