//! The table context object.
//!
//! [`TableView`] owns everything the view layer mutates: the current state
//! version, the retained scene, the play stacks, the animator and the
//! per-session caches. It is created by the application root and handed by
//! `&mut` to every listener, so no view state lives in globals.

use std::sync::Arc;

use game_core::{CardOrder, GameState, HypotheticalView, PlayerIndex, Rank, SuitIndex, Variant};
use tracing::debug;

use crate::animation::{Animator, TweenOwner};
use crate::config::FrontendConfig;
use crate::error::{InvariantViolation, Result};
use crate::hypothetical::{HypotheticalPhase, HypotheticalReconciler, Reconciliation};
use crate::layout::{LayoutEnv, LayoutRules, PlayStack};
use crate::scene::{CardKey, LayerRenderer, Scene};
use crate::view::images::card_image_name;
use crate::view::updaters::{self, CardRefresh};
use crate::view::{CardImages, DecorationCache, NoteBook};

/// Session-level switches of the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub variant: Arc<Variant>,
    /// Viewing a finished game or a shared replay.
    pub replay: bool,
    /// Show cards as their holder sees them.
    pub empathy: bool,
    /// `None` for spectators.
    pub our_player_index: Option<PlayerIndex>,
}

impl ViewSettings {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant: Arc::new(variant),
            replay: false,
            empathy: false,
            our_player_index: None,
        }
    }

    pub fn with_player(mut self, player: PlayerIndex) -> Self {
        self.our_player_index = Some(player);
        self
    }

    pub fn in_replay(mut self) -> Self {
        self.replay = true;
        self
    }
}

pub struct TableView {
    pub(crate) state: Arc<GameState>,
    pub(crate) config: FrontendConfig,
    pub(crate) settings: ViewSettings,
    pub(crate) scene: Scene,
    pub(crate) stacks: Vec<PlayStack>,
    pub(crate) animator: Animator,
    pub(crate) images: CardImages,
    pub(crate) decorations: DecorationCache,
    pub(crate) notes: NoteBook,
    pub(crate) hypothetical: HypotheticalReconciler,
}

impl TableView {
    /// Builds the table for `initial`, with one play stack per suit.
    ///
    /// Fails if a stack base image was not generated.
    pub fn new(
        initial: Arc<GameState>,
        settings: ViewSettings,
        config: FrontendConfig,
        images: CardImages,
    ) -> Result<Self> {
        let variant = Arc::clone(&settings.variant);
        let num_suits = variant.suits.len();

        let mut scene = Scene::with_stack_bases(num_suits, |suit| config.stacks.position(suit));
        for (suit_index, suit) in variant.suits.iter().enumerate() {
            let name = card_image_name(Some(suit), Some(game_core::STACK_BASE_RANK));
            images.require(&name)?;
            let key = CardKey::StackBase(suit_index);
            let base = scene
                .card_mut(key)
                .ok_or(InvariantViolation::UnknownCard(key))?;
            base.bare_image = Some(name);
            base.shadow = config.shadows_enabled();
        }

        let stacks = (0..num_suits)
            .map(|suit| {
                PlayStack::new(
                    suit,
                    config.stacks.position(suit),
                    config.stacks.height,
                    config.cards.height,
                )
            })
            .collect();

        let mut decorations = DecorationCache::new();
        decorations.pips_for(&variant);

        debug!(
            target: "frontend::table",
            variant = %variant.name,
            suits = num_suits,
            replay = settings.replay,
            "table view created"
        );

        Ok(Self {
            state: initial,
            config,
            settings,
            scene,
            stacks,
            animator: Animator::new(),
            images,
            decorations,
            notes: NoteBook::new(),
            hypothetical: HypotheticalReconciler::new(),
        })
    }

    pub fn state(&self) -> &Arc<GameState> {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: Arc<GameState>) {
        self.state = state;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn images(&self) -> &CardImages {
        &self.images
    }

    pub fn decorations(&self) -> &DecorationCache {
        &self.decorations
    }

    pub fn notes(&self) -> &NoteBook {
        &self.notes
    }

    pub fn hypothetical_phase(&self) -> HypotheticalPhase {
        self.hypothetical.phase()
    }

    pub fn stacks(&self) -> &[PlayStack] {
        &self.stacks
    }

    pub fn stack(&self, suit_index: SuitIndex) -> Result<&PlayStack> {
        self.stacks.get(suit_index).ok_or_else(|| {
            InvariantViolation::UnknownStack {
                suit: suit_index,
                stacks: self.stacks.len(),
            }
            .into()
        })
    }

    /// Rank on top of the play stack of `suit_index`.
    pub fn top_rank(&self, suit_index: SuitIndex) -> Result<Option<Rank>> {
        Ok(self.stack(suit_index)?.top_rank(&self.state))
    }

    fn layout_rules(&self) -> LayoutRules {
        LayoutRules {
            hidden_stacks: self.settings.variant.is_throw_it_in_a_hole(),
            replay: self.settings.replay,
            our_player: self.settings.our_player_index,
            tween_duration: self.config.tween_duration(),
        }
    }

    fn layout_parts(&mut self) -> (&mut [PlayStack], LayoutEnv<'_>) {
        let rules = self.layout_rules();
        (
            self.stacks.as_mut_slice(),
            LayoutEnv {
                scene: &mut self.scene,
                animator: &mut self.animator,
                rules,
            },
        )
    }

    /// Switches replay mode; stack opacities depend on it, so every stack is
    /// laid out again.
    pub fn set_replay(&mut self, replay: bool) -> Result<()> {
        if self.settings.replay == replay {
            return Ok(());
        }
        self.settings.replay = replay;
        let (stacks, mut env) = self.layout_parts();
        for stack in stacks.iter_mut() {
            stack.layout(&mut env)?;
        }
        Ok(())
    }

    /// Switches empathy and redraws what it affects on every visible card.
    pub fn set_empathy(&mut self, empathy: bool) -> Result<()> {
        if self.settings.empathy == empathy {
            return Ok(());
        }
        self.settings.empathy = empathy;
        for index in 0..self.state.deck.len() {
            updaters::refresh(self, CardOrder(index), CardRefresh::PIPS | CardRefresh::VISUALS)?;
        }
        Ok(())
    }

    /// Attaches (or, with empty text, removes) the local player's note.
    pub fn set_note(&mut self, order: CardOrder, text: &str) -> Result<()> {
        let variant = Arc::clone(&self.settings.variant);
        self.notes.set(order, text, &variant);
        updaters::refresh(self, order, CardRefresh::NOTE | CardRefresh::BORDER)
    }

    /// Hides the starting hand while a hypothetical hides drawn cards.
    pub(crate) fn refresh_starting_hand_visibility(&mut self, current: &HypotheticalView) {
        let hidden = current.active && !current.show_drawn_cards;
        self.scene.set_starting_hand_hidden(hidden);
    }

    pub(crate) fn reconcile_hypothetical(
        &mut self,
        previous: Option<&HypotheticalView>,
        current: &HypotheticalView,
    ) -> Result<Reconciliation> {
        let mut reconciler = self.hypothetical;
        let result = reconciler.apply(previous, current, self);
        self.hypothetical = reconciler;
        result
    }

    /// Brings every play stack in line with the current state.
    ///
    /// Returns the number of stacks that changed.
    pub(crate) fn sync_stacks(&mut self) -> Result<usize> {
        let state = Arc::clone(&self.state);
        let natural_height = self.config.cards.height;
        let (stacks, mut env) = self.layout_parts();

        let mut changed = 0;
        for stack in stacks.iter_mut() {
            let played = state
                .play_stacks
                .get(stack.suit_index())
                .map_or(&[][..], Vec::as_slice);
            if stack.sync_members(played, natural_height, &mut env)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Advances animations by `dt` seconds, settles finished tweens and
    /// flushes dirty layers.
    ///
    /// Returns the number of tweens settled.
    pub fn tick<R: LayerRenderer + ?Sized>(&mut self, dt: f64, renderer: &mut R) -> usize {
        let finished = self.animator.advance(dt);
        let (stacks, mut env) = self.layout_parts();

        for stack in stacks.iter_mut() {
            stack.apply_frame(&mut env);
        }

        let mut settled = 0;
        for event in &finished {
            let TweenOwner::PlayStack(suit) = event.owner;
            match stacks.get_mut(suit) {
                Some(stack) => {
                    if stack.on_tween_finished(event, &mut env) {
                        settled += 1;
                    }
                }
                None => {
                    debug!(target: "frontend::table", suit, handle = %event.handle, "tween finished for unknown stack");
                }
            }
        }

        self.scene.flush(renderer);
        settled
    }
}
