#![allow(dead_code)]

use std::sync::Arc;

use client_frontend_core::{
    CardImages, FrontendConfig, LayerId, LayerRenderer, Scene, TableView, TransitionReport,
    ViewSettings, ViewSync,
};
use game_core::{
    CardLocation, CardOrder, CardState, GameConfig, GameState, Rank, SuitIndex, Variant,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Property test settings. `PROPTEST_CASES` overrides the case count.
pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|cases| cases.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);
    proptest::prelude::ProptestConfig {
        cases,
        failure_persistence: None,
        ..proptest::prelude::ProptestConfig::default()
    }
}

/// Records which layers were drawn.
#[derive(Default)]
pub struct RecordingRenderer {
    pub draws: Vec<LayerId>,
}

impl RecordingRenderer {
    pub fn count(&self, layer: LayerId) -> usize {
        self.draws.iter().filter(|drawn| **drawn == layer).count()
    }
}

impl LayerRenderer for RecordingRenderer {
    fn draw_layer(&mut self, layer: LayerId, _scene: &Scene) {
        self.draws.push(layer);
    }
}

pub fn every_card(variant: &Variant) -> Vec<(SuitIndex, Rank)> {
    (0..variant.suits.len())
        .flat_map(|suit| variant.ranks.iter().map(move |&rank| (suit, rank)))
        .collect()
}

/// Deals cards until the deck holds `len` cards, alternating between two hands.
pub fn deal(state: &GameState, variant: &Variant, len: usize) -> GameState {
    let mut next = state.clone();
    for index in next.deck.len()..len {
        let card = CardState::new(CardOrder(index), every_card(variant))
            .with_location(CardLocation::Hand(index % 2));
        next = next.with_drawn_card(card).unwrap();
    }
    next
}

pub struct Table {
    pub variant: Variant,
    pub view: TableView,
    pub sync: ViewSync,
    pub renderer: RecordingRenderer,
}

impl Table {
    pub fn new(variant: Variant) -> Self {
        Self::with_settings(ViewSettings::new(variant).with_player(0))
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        init_tracing();
        let variant = (*settings.variant).clone();
        let state = Arc::new(GameState::new(&variant, &GameConfig::default()));
        let images = CardImages::standard(&variant);
        let mut view = TableView::new(state, settings, FrontendConfig::default(), images).unwrap();
        let sync = ViewSync::new(&mut view).unwrap();

        let mut renderer = RecordingRenderer::default();
        view.scene_mut().flush(&mut renderer);
        renderer.draws.clear();

        Self {
            variant,
            view,
            sync,
            renderer,
        }
    }

    pub fn state(&self) -> GameState {
        (**self.view.state()).clone()
    }

    pub fn transition(&mut self, next: GameState) -> TransitionReport {
        self.sync
            .on_transition(Arc::new(next), &mut self.view, &mut self.renderer)
            .unwrap()
    }

    pub fn deal(&mut self, len: usize) -> TransitionReport {
        let next = deal(&self.state(), &self.variant, len);
        self.transition(next)
    }

    /// Runs the frame clock until every tween settled.
    pub fn settle(&mut self) -> usize {
        self.view.tick(60.0, &mut self.renderer)
    }
}
