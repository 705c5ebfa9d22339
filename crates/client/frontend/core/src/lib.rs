//! State-to-view reconciliation for the card table.
//!
//! Keeps a retained scene of card views in step with consecutive versions of
//! the immutable `game_core::GameState`: per-card subscription bundles diff
//! small projections of the state and call updaters on change, play stacks
//! animate and cull their members, and a small state machine redraws the
//! cards a hypothetical morphs. Drawing is delegated to a [`LayerRenderer`].
pub mod animation;
pub mod config;
pub mod error;
pub mod hypothetical;
pub mod layout;
pub mod scene;
pub mod subscriptions;
pub mod sync;
pub mod table;
pub mod view;

pub use animation::{Animator, Easing, TweenFinished, TweenHandle, TweenOwner, TweenSpec};
pub use config::{AnimationConfig, CardConfig, FrontendConfig, StackConfig};
pub use error::{InvariantViolation, Result, ViewError};
pub use hypothetical::{HypotheticalPhase, HypotheticalReconciler, Reconciliation};
pub use layout::{LayoutChild, LayoutEnv, LayoutRules, PlayStack};
pub use scene::{CardKey, CardParent, CardView, LayerId, LayerRenderer, LayerSet, Point, Scene, Transform};
pub use subscriptions::{CardSubscriptions, ViewObserver};
pub use sync::{TransitionReport, ViewSync};
pub use table::{TableView, ViewSettings};
pub use view::{BorderKind, CardImages, CardRefresh, DecorationCache, Note, NoteBook};
