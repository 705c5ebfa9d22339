//! Selector output.

/// The value a selector projected out of a state version.
///
/// `Skip` is the "no-op" sentinel: the selector's target is not currently
/// visible, so its listener must not fire no matter what changed in the
/// state. Two `Skip`s always compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selected<T> {
    Value(T),
    Skip,
}

impl<T> Selected<T> {
    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Skip => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selected<U> {
        match self {
            Self::Value(value) => Selected::Value(f(value)),
            Self::Skip => Selected::Skip,
        }
    }
}

impl<T> From<Option<T>> for Selected<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Skip,
        }
    }
}
