//! Property tests for the per-card subscription bundles.
//!
//! Random transition sequences grow, truncate and edit the deck. After every
//! transition the bundle count must equal the deck length, and the number of
//! listeners fired must equal the number of card projections that changed on
//! cards visible both before and after.

mod common;

use common::Table;
use game_core::{CardIdentity, CardOrder, GameState, Rank, SuitIndex, Variant};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    /// Draw this many cards.
    Deal(usize),
    /// Truncate to `n % (len + 1)` cards.
    Truncate(usize),
    /// Set the clue count of card `i % len`.
    Clue(usize, u8),
    /// Drop one possibility from card `i % len`.
    Narrow(usize),
    /// Reveal card `i % len`.
    Reveal(usize, SuitIndex, Rank),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1usize..6).prop_map(Step::Deal),
        (0usize..16).prop_map(Step::Truncate),
        (0usize..16, 0u8..3).prop_map(|(index, clues)| Step::Clue(index, clues)),
        (0usize..16).prop_map(Step::Narrow),
        (0usize..16, 0usize..5, 1u8..=5).prop_map(|(index, suit, rank)| Step::Reveal(index, suit, rank)),
    ]
}

fn apply(step: &Step, state: &GameState, variant: &Variant) -> GameState {
    let len = state.deck.len();
    let pick = |index: usize| CardOrder(index % len);
    match *step {
        Step::Deal(count) => common::deal(state, variant, len + count),
        Step::Truncate(target) => state.with_deck_truncated(target % (len + 1)),
        _ if len == 0 => state.clone(),
        Step::Clue(index, clues) => state
            .with_card(pick(index), |card| card.num_positive_clues = clues)
            .unwrap(),
        Step::Narrow(index) => state
            .with_card(pick(index), |card| {
                card.possible_cards.pop();
            })
            .unwrap(),
        Step::Reveal(index, suit, rank) => state
            .with_identity(pick(index), Some(CardIdentity::new(suit, rank)))
            .unwrap(),
    }
}

/// What each of the five card subscriptions looks at, in a comparable form.
fn projections(state: &GameState, order: CardOrder) -> [String; 5] {
    let card = state.card(order).unwrap();
    [
        format!("{:?}", (card.num_positive_clues, card.location)),
        format!(
            "{:?}",
            (
                state.status_of(card.suit_index, card.rank),
                card.is_clued(),
                card.location,
                card.in_double_discard,
            )
        ),
        format!("{:?}", card.possible_cards.len()),
        format!(
            "{:?}",
            (
                card.possible_cards_from_clues.len(),
                card.possible_cards.len(),
                card.possible_cards_for_empathy.len(),
                card.positive_rank_clues.len(),
            )
        ),
        format!(
            "{:?}",
            (
                card.rank,
                card.suit_index,
                card.location,
                card.suit_determined,
                card.rank_determined,
                card.possible_cards_from_clues.len(),
                state.identity(order),
            )
        ),
    ]
}

fn changed_projections(before: &GameState, after: &GameState) -> usize {
    let kept = before.deck.len().min(after.deck.len());
    (0..kept)
        .map(CardOrder)
        .map(|order| {
            let old = projections(before, order);
            let new = projections(after, order);
            old.iter().zip(&new).filter(|(old, new)| old != new).count()
        })
        .sum()
}

proptest! {
    #![proptest_config(common::proptest_config())]

    /// Bundles always match the deck, whatever the sequence of transitions.
    #[test]
    fn bundle_count_follows_deck_length(steps in prop::collection::vec(step(), 1..24)) {
        let mut table = Table::new(Variant::no_variant());

        for step in &steps {
            let before = table.state();
            let after = apply(step, &before, &table.variant);
            let report = table.transition(after.clone());

            prop_assert_eq!(table.sync.card_bundles(), after.deck.len());
            prop_assert_eq!(table.sync.observer().len(), after.deck.len() + 1);
            prop_assert_eq!(
                report.bundles_added,
                after.deck.len().saturating_sub(before.deck.len())
            );
            prop_assert_eq!(
                report.bundles_removed,
                before.deck.len().saturating_sub(after.deck.len())
            );
        }
    }

    /// A listener fires exactly when its projection changed, and never for a
    /// card that is not visible on both sides of the transition.
    #[test]
    fn listeners_fire_only_on_changed_projections(steps in prop::collection::vec(step(), 1..24)) {
        let mut table = Table::new(Variant::no_variant());

        for step in &steps {
            let before = table.state();
            let after = apply(step, &before, &table.variant);
            let report = table.transition(after.clone());

            prop_assert_eq!(
                report.listeners_fired,
                changed_projections(&before, &after),
                "step {:?}", step
            );
        }
    }
}
