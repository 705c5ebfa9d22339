mod common;

use client_frontend_core::{CardKey, HypotheticalPhase, InvariantViolation, ViewError};
use common::Table;
use game_core::{CardIdentity, CardOrder, HypotheticalView, Variant};

fn drawn(table: &Table, order: usize) -> (Option<usize>, Option<u8>, Option<String>) {
    let view = table.view.scene().card(CardKey::Deck(CardOrder(order))).unwrap();
    (view.suit_index, view.rank, view.bare_image.clone())
}

fn unknown() -> (Option<usize>, Option<u8>, Option<String>) {
    (None, None, Some("card-Unknown-6".to_owned()))
}

#[test]
fn entering_only_changes_starting_hand_visibility() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(3);
    assert!(!table.view.scene().starting_hand_hidden());

    // A morph present on entry is not drawn: entering never diffs per card.
    let entered = table
        .state()
        .with_hypothetical(HypotheticalView::active(vec![Some(CardIdentity::new(0, 3))]));
    let report = table.transition(entered);

    assert_eq!(report.listeners_fired, 1);
    assert_eq!(table.view.hypothetical_phase(), HypotheticalPhase::EnteringHypothetical);
    assert!(table.view.scene().starting_hand_hidden());
    assert_eq!(drawn(&table, 0), unknown());
}

#[test]
fn morphing_redraws_only_changed_cards_and_exit_restores_them() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(3);
    table.transition(table.state().with_hypothetical(HypotheticalView::active(vec![])));

    let morphed = table.state().with_hypothetical(HypotheticalView::active(vec![
        None,
        Some(CardIdentity::new(1, 4)),
        None,
    ]));
    table.transition(morphed);
    assert_eq!(table.view.hypothetical_phase(), HypotheticalPhase::InHypothetical);
    assert_eq!(
        drawn(&table, 1),
        (Some(1), Some(4), Some("card-Yellow-4".to_owned()))
    );
    assert_eq!(drawn(&table, 0), unknown());

    let morphed_again = table.state().with_hypothetical(HypotheticalView::active(vec![
        Some(CardIdentity::new(4, 5)),
        Some(CardIdentity::new(1, 4)),
    ]));
    table.transition(morphed_again);
    assert_eq!(
        drawn(&table, 0),
        (Some(4), Some(5), Some("card-Purple-5".to_owned()))
    );

    table.transition(table.state().with_hypothetical(HypotheticalView::real()));
    assert_eq!(table.view.hypothetical_phase(), HypotheticalPhase::Real);
    assert!(!table.view.scene().starting_hand_hidden());
    assert_eq!(drawn(&table, 0), unknown());
    assert_eq!(drawn(&table, 1), unknown());
}

#[test]
fn exit_falls_back_to_revealed_identity() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(1);
    let revealed = table
        .state()
        .with_identity(CardOrder(0), Some(CardIdentity::new(2, 2)))
        .unwrap();
    table.transition(revealed);
    table.transition(table.state().with_hypothetical(HypotheticalView::active(vec![])));
    table.transition(
        table
            .state()
            .with_hypothetical(HypotheticalView::active(vec![Some(CardIdentity::new(0, 1))])),
    );
    assert_eq!(drawn(&table, 0).2.as_deref(), Some("card-Red-1"));

    table.transition(table.state().with_hypothetical(HypotheticalView::real()));
    assert_eq!(drawn(&table, 0).2.as_deref(), Some("card-Green-2"));
}

#[test]
fn cards_drawn_inside_a_hypothetical_are_dropped_on_exit() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(2);
    let real = table.state();

    table.transition(real.with_hypothetical(HypotheticalView::active(vec![])));
    table.deal(4);
    let with_morph = table
        .state()
        .with_hypothetical(HypotheticalView::active(vec![None, None, None, Some(CardIdentity::new(0, 1))]));
    table.transition(with_morph);

    // Leaving truncates the deck; the morphed card is gone before it is redrawn.
    let report = table.transition(real);
    assert_eq!(report.bundles_removed, 2);
    assert_eq!(table.sync.card_bundles(), 2);
    assert_eq!(table.view.hypothetical_phase(), HypotheticalPhase::Real);
}

#[test]
fn cards_drawn_with_a_morph_are_drawn_morphed() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(1);
    table.transition(table.state().with_hypothetical(HypotheticalView::active(vec![])));

    // Drawn and morphed in the same transition: the new bundle fires at
    // registration against the new state.
    let next = common::deal(&table.state(), &table.variant, 2)
        .with_hypothetical(HypotheticalView::active(vec![None, Some(CardIdentity::new(3, 2))]));
    let report = table.transition(next);

    assert_eq!(report.bundles_added, 1);
    assert_eq!(drawn(&table, 1), (Some(3), Some(2), Some("card-Blue-2".to_owned())));
    assert_eq!(drawn(&table, 0), unknown());
    assert_eq!(table.view.hypothetical_phase(), HypotheticalPhase::InHypothetical);
}

#[test]
fn active_hypothetical_without_morphs_is_rejected() {
    let mut table = Table::new(Variant::no_variant());
    table.transition(table.state().with_hypothetical(HypotheticalView::active(vec![])));

    let broken = table.state().with_hypothetical(HypotheticalView {
        active: true,
        morphed_identities: None,
        show_drawn_cards: false,
    });
    let result = table
        .sync
        .on_transition(std::sync::Arc::new(broken), &mut table.view, &mut table.renderer);
    assert!(matches!(
        result,
        Err(ViewError::Invariant(InvariantViolation::MissingMorphedIdentities))
    ));
}
