//! Reconciles the speculative identities of a hypothetical with the view.
//!
//! A hypothetical lets a player morph card identities to explore a line
//! without touching the real state. Entering one only changes which hands
//! are shown; leaving one, or morphing inside one, has to redraw exactly the
//! cards whose drawn identity changed.

use game_core::{CardIdentity, CardOrder, HypotheticalView};
use tracing::debug;

use crate::error::{InvariantViolation, Result};
use crate::table::TableView;
use crate::view::updaters;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HypotheticalPhase {
    #[default]
    Real,
    EnteringHypothetical,
    InHypothetical,
}

/// Work a transition requires.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Starting hand visibility must be recomputed.
    pub refresh_visibility: bool,
    /// Cards whose visuals must be recomputed, ascending.
    pub recompute: Vec<CardOrder>,
}

impl Reconciliation {
    fn visibility_only() -> Self {
        Self {
            refresh_visibility: true,
            recompute: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HypotheticalReconciler {
    phase: HypotheticalPhase,
}

fn morphed<'a>(view: &'a HypotheticalView) -> Result<&'a [Option<CardIdentity>]> {
    view.morphed_identities
        .as_deref()
        .map(Vec::as_slice)
        .ok_or_else(|| InvariantViolation::MissingMorphedIdentities.into())
}

impl HypotheticalReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> HypotheticalPhase {
        self.phase
    }

    /// Computes the work for the transition `previous -> current` and
    /// advances the phase.
    ///
    /// `previous` is `None` the first time the table is observed. On error
    /// the phase is left untouched.
    pub fn reconcile(
        &mut self,
        previous: Option<&HypotheticalView>,
        current: &HypotheticalView,
    ) -> Result<Reconciliation> {
        let previous = match previous {
            Some(previous) if previous.active => previous,
            // Initializing, entering, or staying out of a hypothetical.
            _ => {
                self.phase = if current.active {
                    HypotheticalPhase::EnteringHypothetical
                } else {
                    HypotheticalPhase::Real
                };
                return Ok(Reconciliation::visibility_only());
            }
        };

        if !current.active {
            if self.phase == HypotheticalPhase::Real {
                return Err(InvariantViolation::NotInHypothetical.into());
            }
            let recompute = morphed(previous)?
                .iter()
                .enumerate()
                .filter(|(_, identity)| identity.is_some())
                .map(|(index, _)| CardOrder(index))
                .collect();
            self.phase = HypotheticalPhase::Real;
            return Ok(Reconciliation {
                refresh_visibility: true,
                recompute,
            });
        }

        let before = morphed(previous)?;
        let after = morphed(current)?;
        let len = before.len().max(after.len());
        let recompute = (0..len)
            .filter(|&index| before.get(index).copied().flatten() != after.get(index).copied().flatten())
            .map(CardOrder)
            .collect();
        self.phase = HypotheticalPhase::InHypothetical;
        Ok(Reconciliation {
            refresh_visibility: true,
            recompute,
        })
    }

    /// Reconciles and applies the result to `table`.
    pub fn apply(
        &mut self,
        previous: Option<&HypotheticalView>,
        current: &HypotheticalView,
        table: &mut TableView,
    ) -> Result<Reconciliation> {
        let from = self.phase;
        let work = self.reconcile(previous, current)?;

        if work.refresh_visibility {
            table.refresh_starting_hand_visibility(current);
        }
        for &order in &work.recompute {
            updaters::update_card_visuals(table, order)?;
        }

        if from != self.phase || !work.recompute.is_empty() {
            debug!(
                target: "frontend::hypothetical",
                %from,
                to = %self.phase,
                recomputed = work.recompute.len(),
                "hypothetical reconciled"
            );
        }
        Ok(work)
    }
}
