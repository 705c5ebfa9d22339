//! Selector/listener pairs.
//!
//! A [`Subscription`] erases the projected type `T` so that subscriptions with
//! different projections can live in the same bundle. Each one keeps the last
//! projection it delivered to its listener.

use crate::Selected;

/// Type-erased view over a [`Watcher`].
trait Watch<S, C, E> {
    fn poll(&mut self, state: &S, ctx: &mut C) -> Result<bool, E>;
    fn has_value(&self) -> bool;
}

struct Watcher<T, F, L> {
    select: F,
    on_change: L,
    current: Option<T>,
}

impl<S, C, E, T, F, L> Watch<S, C, E> for Watcher<T, F, L>
where
    T: PartialEq,
    F: Fn(&S) -> Selected<T>,
    L: FnMut(&T, Option<&T>, &mut C) -> Result<(), E>,
{
    fn poll(&mut self, state: &S, ctx: &mut C) -> Result<bool, E> {
        let next = match (self.select)(state) {
            Selected::Value(next) => next,
            // Not visible: keep the cached projection and stay silent.
            Selected::Skip => return Ok(false),
        };

        if self.current.as_ref() == Some(&next) {
            return Ok(false);
        }

        (self.on_change)(&next, self.current.as_ref(), ctx)?;
        self.current = Some(next);
        Ok(true)
    }

    fn has_value(&self) -> bool {
        self.current.is_some()
    }
}

/// A selector paired with the listener that reacts to its changes.
///
/// # Type Parameters
///
/// * `S` - State tree type passed to the selector
/// * `C` - Context handed to the listener (the view being updated)
/// * `E` - Error a listener may abort the transition with
pub struct Subscription<S, C, E> {
    watch: Box<dyn Watch<S, C, E>>,
}

impl<S, C, E> Subscription<S, C, E> {
    /// Creates a subscription whose listener receives the current and the
    /// previously delivered projection.
    ///
    /// The previous projection is `None` the first time the listener fires.
    pub fn new<T, F, L>(select: F, on_change: L) -> Self
    where
        T: PartialEq + 'static,
        F: Fn(&S) -> Selected<T> + 'static,
        L: FnMut(&T, Option<&T>, &mut C) -> Result<(), E> + 'static,
    {
        Self {
            watch: Box::new(Watcher {
                select,
                on_change,
                current: None,
            }),
        }
    }

    /// Creates a subscription whose listener only needs to know that the
    /// projection changed.
    pub fn notify<T, F, L>(select: F, mut on_change: L) -> Self
    where
        T: PartialEq + 'static,
        F: Fn(&S) -> Selected<T> + 'static,
        L: FnMut(&mut C) -> Result<(), E> + 'static,
    {
        Self::new(select, move |_: &T, _: Option<&T>, ctx: &mut C| on_change(ctx))
    }

    /// Re-evaluates the selector and fires the listener on change.
    ///
    /// Returns whether the listener fired. The cached projection is only
    /// replaced once the listener succeeded.
    pub(crate) fn poll(&mut self, state: &S, ctx: &mut C) -> Result<bool, E> {
        self.watch.poll(state, ctx)
    }

    /// Whether a projection has been delivered to the listener yet.
    pub fn has_value(&self) -> bool {
        self.watch.has_value()
    }
}
