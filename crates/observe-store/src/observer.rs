//! Bundled subscriptions evaluated once per state transition.

use std::fmt;

use crate::Subscription;

/// Handle to a bundle of subscriptions registered with [`StateObserver::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundleId(u64);

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bundle#{}", self.0)
    }
}

struct Bundle<S, C, E> {
    id: BundleId,
    subscriptions: Vec<Subscription<S, C, E>>,
}

/// Diffs selector projections across state versions.
///
/// # Semantics
///
/// - [`observe`](Self::observe) evaluates the new bundle against the current
///   state right away, so every listener fires once with `previous = None`
/// - [`apply`](Self::apply) evaluates every live subscription against the next
///   state version in registration order; a listener fires at most once per
///   call, and only when its projection differs from the last one it received
/// - A listener error stops the transition immediately and is returned; the
///   failing subscription keeps its previous projection
pub struct StateObserver<S, C, E> {
    bundles: Vec<Bundle<S, C, E>>,
    next_id: u64,
}

impl<S, C, E> StateObserver<S, C, E> {
    pub fn new() -> Self {
        Self {
            bundles: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a bundle and runs its initial evaluation against `state`.
    ///
    /// If a listener fails during the initial evaluation the bundle is not
    /// registered.
    pub fn observe(
        &mut self,
        state: &S,
        ctx: &mut C,
        mut subscriptions: Vec<Subscription<S, C, E>>,
    ) -> Result<BundleId, E> {
        for subscription in subscriptions.iter_mut() {
            subscription.poll(state, ctx)?;
        }

        let id = BundleId(self.next_id);
        self.next_id += 1;
        self.bundles.push(Bundle { id, subscriptions });
        Ok(id)
    }

    /// Removes a bundle. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: BundleId) -> bool {
        match self.bundles.iter().position(|bundle| bundle.id == id) {
            Some(index) => {
                // `remove`, not `swap_remove`: evaluation order is registration order.
                self.bundles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Evaluates every live subscription against the next state version.
    ///
    /// Returns the number of listeners that fired.
    pub fn apply(&mut self, state: &S, ctx: &mut C) -> Result<usize, E> {
        let mut fired = 0;
        for bundle in self.bundles.iter_mut() {
            for subscription in bundle.subscriptions.iter_mut() {
                if subscription.poll(state, ctx)? {
                    fired += 1;
                }
            }
        }
        Ok(fired)
    }

    pub fn contains(&self, id: BundleId) -> bool {
        self.bundles.iter().any(|bundle| bundle.id == id)
    }

    /// Returns the number of live bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Returns the number of live subscriptions across all bundles.
    pub fn subscription_count(&self) -> usize {
        self.bundles
            .iter()
            .map(|bundle| bundle.subscriptions.len())
            .sum()
    }
}

impl<S, C, E> Default for StateObserver<S, C, E> {
    fn default() -> Self {
        Self::new()
    }
}
