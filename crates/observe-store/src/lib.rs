//! Fine-grained selector diffing over immutable state trees.
//!
//! A view layer registers `(selector, listener)` pairs against a
//! [`StateObserver`]. On every state transition the observer re-runs each
//! selector against the new state version and invokes the listener only when
//! the projected value changed (by `PartialEq`).
//!
//! - **No domain knowledge**: the state type `S`, the listener context `C`
//!   and the listener error `E` are all generic
//! - **No reentrancy**: listeners receive `&mut C`, never the observer or the
//!   state, so they cannot trigger a nested transition
//! - **Registration order**: subscriptions are evaluated in the order they
//!   were registered, bundle by bundle
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Selected`]: a projected value, or the `Skip` sentinel
//! - [`Subscription`]: one selector/listener pair with its cached projection
//! - [`StateObserver`]: bundles of subscriptions addressed by [`BundleId`]

pub mod observer;
pub mod selected;
pub mod subscription;

pub use observer::{BundleId, StateObserver};
pub use selected::Selected;
pub use subscription::Subscription;
