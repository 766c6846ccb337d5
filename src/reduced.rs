//! The short-circuit wrapper carried by every accumulator.
//!
//! A reduction step never returns a bare accumulator; it returns an [`Acc`],
//! which is either still running ([`Acc::Continue`]) or final
//! ([`Acc::Reduced`]). A reduced accumulator stops the sequential fold that
//! produced it, wins every combine it takes part in, and is handed back to the
//! caller without running any `finish` hook.
//!
//! ```
//! use ironfold::Acc;
//!
//! let done = Acc::Reduced(3);
//! assert!(done.is_reduced());
//! assert_eq!(done.map(|x| x * 2), Acc::Reduced(6));
//! assert_eq!(Acc::Continue(1).into_inner(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// An accumulator tagged with whether the reduction may keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Acc<A> {
    /// The reduction continues with this value.
    Continue(A),
    /// The reduction is over; this value is final.
    Reduced(A),
}

impl<A> Acc<A> {
    /// `true` for [`Acc::Reduced`].
    #[inline]
    pub fn is_reduced(&self) -> bool {
        matches!(self, Acc::Reduced(_))
    }

    /// Drop the tag and return the accumulator.
    #[inline]
    pub fn into_inner(self) -> A {
        match self {
            Acc::Continue(a) | Acc::Reduced(a) => a,
        }
    }

    /// Borrow the accumulator regardless of tag.
    #[inline]
    pub fn as_inner(&self) -> &A {
        match self {
            Acc::Continue(a) | Acc::Reduced(a) => a,
        }
    }

    /// Transform the value, keeping the tag.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Acc<B> {
        match self {
            Acc::Continue(a) => Acc::Continue(f(a)),
            Acc::Reduced(a) => Acc::Reduced(f(a)),
        }
    }

    /// Re-tag the value as final.
    #[inline]
    pub fn into_reduced(self) -> Acc<A> {
        Acc::Reduced(self.into_inner())
    }
}

impl<A> From<A> for Acc<A> {
    fn from(value: A) -> Self {
        Acc::Continue(value)
    }
}
