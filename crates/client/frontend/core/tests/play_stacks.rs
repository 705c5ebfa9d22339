mod common;

use client_frontend_core::{CardKey, CardParent, ViewSettings};
use common::Table;
use game_core::{CardIdentity, CardOrder, GameState, STACK_BASE_RANK, Variant};

fn play(state: &GameState, order: usize, suit: usize, rank: u8) -> GameState {
    state
        .with_identity(CardOrder(order), Some(CardIdentity::new(suit, rank)))
        .unwrap()
        .with_played_card(CardOrder(order), suit)
        .unwrap()
}

#[test]
fn played_cards_land_on_their_stack() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(4);
    assert_eq!(table.view.top_rank(0).unwrap(), Some(STACK_BASE_RANK));

    let report = table.transition(play(&table.state(), 1, 0, 1));
    assert_eq!(report.stacks_changed, 1);

    let stack = table.view.stack(0).unwrap();
    assert_eq!(stack.members().collect::<Vec<_>>(), vec![CardOrder(1)]);
    assert!(!stack.is_settled());
    assert_eq!(table.view.top_rank(0).unwrap(), Some(1));

    let view = table.view.scene().card(CardKey::Deck(CardOrder(1))).unwrap();
    assert_eq!(view.parent, Some(CardParent::PlayStack(0)));
    assert!(view.is_busy());

    table.transition(play(&table.state(), 3, 0, 2));
    assert_eq!(table.view.top_rank(0).unwrap(), Some(2));
    // Other stacks are untouched.
    assert_eq!(table.view.top_rank(1).unwrap(), Some(STACK_BASE_RANK));
}

#[test]
fn settled_stack_shows_only_its_top_card() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(3);
    table.transition(play(&table.state(), 0, 2, 1));
    table.transition(play(&table.state(), 2, 2, 2));

    let settled = table.settle();
    // Base and both played cards.
    assert_eq!(settled, 3);

    let stack = table.view.stack(2).unwrap();
    assert!(stack.is_settled());
    let visible: Vec<bool> = stack.children().iter().map(|child| child.visible).collect();
    assert_eq!(visible, vec![false, false, true]);

    let scene = table.view.scene();
    assert!(!scene.card(CardKey::StackBase(2)).unwrap().visible);
    assert!(!scene.card(CardKey::Deck(CardOrder(0))).unwrap().visible);
    let top = scene.card(CardKey::Deck(CardOrder(2))).unwrap();
    assert!(top.visible);
    assert!(!top.is_busy());
    assert_eq!(top.transform.position, table.view.config().stacks.position(2));
}

#[test]
fn half_settled_stack_is_not_culled() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(1);
    table.transition(play(&table.state(), 0, 0, 1));

    let duration = table.view.config().tween_duration();
    assert_eq!(table.view.tick(duration / 2.0, &mut table.renderer), 0);

    let stack = table.view.stack(0).unwrap();
    assert!(stack.children().iter().all(|child| child.visible && child.is_tweening()));
}

#[test]
fn hidden_stacks_hide_played_cards_until_replay() {
    let mut table = Table::new(Variant::no_variant().with_throw_it_in_a_hole());
    table.deal(1);
    table.transition(play(&table.state(), 0, 0, 1));
    table.settle();

    let scene = table.view.scene();
    assert_eq!(scene.card(CardKey::StackBase(0)).unwrap().transform.opacity, 1.0);
    assert_eq!(scene.card(CardKey::Deck(CardOrder(0))).unwrap().transform.opacity, 0.0);

    table.view.set_replay(true).unwrap();
    table.settle();
    let scene = table.view.scene();
    assert_eq!(scene.card(CardKey::Deck(CardOrder(0))).unwrap().transform.opacity, 1.0);
}

#[test]
fn replay_shows_played_cards_in_hidden_stack_variants() {
    let variant = Variant::no_variant().with_throw_it_in_a_hole();
    let mut table = Table::with_settings(ViewSettings::new(variant).in_replay());
    table.deal(1);
    table.transition(play(&table.state(), 0, 0, 1));
    table.settle();

    let card = table.view.scene().card(CardKey::Deck(CardOrder(0))).unwrap();
    assert_eq!(card.transform.opacity, 1.0);
}

#[test]
fn undo_detaches_the_card_and_ignores_its_tween() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(2);
    let before = table.state();
    table.transition(play(&before, 1, 3, 1));

    // Undo while the card is still flying.
    let report = table.transition(before);
    assert_eq!(report.stacks_changed, 1);
    assert_eq!(table.view.stack(3).unwrap().members().count(), 0);
    assert_eq!(table.view.top_rank(3).unwrap(), Some(STACK_BASE_RANK));

    let view = table.view.scene().card(CardKey::Deck(CardOrder(1))).unwrap();
    assert_eq!(view.parent, Some(CardParent::Hand(1)));
    assert!(!view.is_busy());

    // Only the base tween is still live.
    assert_eq!(table.settle(), 1);
    assert!(table.view.scene().card(CardKey::StackBase(3)).unwrap().visible);
}

#[test]
fn empathy_leaves_played_cards_and_top_rank_alone() {
    let mut table = Table::new(Variant::no_variant());
    table.deal(2);
    let revealed_in_hand = table
        .state()
        .with_identity(CardOrder(0), Some(CardIdentity::new(2, 4)))
        .unwrap();
    table.transition(revealed_in_hand);
    table.transition(play(&table.state(), 1, 0, 1));
    assert_eq!(table.view.top_rank(0).unwrap(), Some(1));

    table.view.set_empathy(true).unwrap();

    assert_eq!(table.view.top_rank(0).unwrap(), Some(1));
    let scene = table.view.scene();
    let played = scene.card(CardKey::Deck(CardOrder(1))).unwrap();
    assert_eq!(played.bare_image.as_deref(), Some("card-Red-1"));
    // Hand cards are drawn as their holder sees them.
    let in_hand = scene.card(CardKey::Deck(CardOrder(0))).unwrap();
    assert_eq!(in_hand.bare_image.as_deref(), Some("card-Unknown-6"));

    table.view.set_empathy(false).unwrap();
    let in_hand = table.view.scene().card(CardKey::Deck(CardOrder(0))).unwrap();
    assert_eq!(in_hand.bare_image.as_deref(), Some("card-Green-4"));
}
