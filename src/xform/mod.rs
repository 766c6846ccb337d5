//! Pipeline stages (transducers).
//!
//! An [`Xform<T>`] describes a transformation of a stream of `T` into a stream
//! of [`Xform::Out`] without knowing where the stream comes from or what it
//! is reduced into. [`Xform::apply`] wraps a downstream [`Reducer`] that
//! consumes `Out` and returns a reducer that consumes `T`. Composing stages
//! is therefore wrapping one reducer inside another; the job applies the
//! whole pipeline exactly once to the combining op and shares the resulting
//! chain across every branch.
//!
//! # Stages
//!
//! - [`identity`], [`map`], [`filter`], [`scan`] -- element-wise and running
//! - [`reduce_if`] -- short-circuits on the first matching item
//! - [`cat`] -- sequential flatten of `IntoIterator` items
//! - [`tcat`] -- flatten of [`Domain`](crate::Domain) items, reduced through
//!   the parallel scheduler
//!
//! # Composition
//!
//! [`compose`] runs its first argument first. The [`pipeline!`](crate::pipeline)
//! macro composes any number of stages left to right:
//!
//! ```
//! use ironfold::pipeline;
//! use ironfold::xform::{filter, map};
//! use ironfold::collect;
//!
//! # fn main() -> anyhow::Result<()> {
//! let xf = pipeline![filter(|x: &i64| x % 2 == 0), map(|x: i64| x * 10)];
//! assert_eq!(collect(xf, 1..=6i64, 2)?, vec![20, 40, 60]);
//! # Ok(())
//! # }
//! ```

mod basic;
mod early;
mod flatten;

pub use basic::{filter, identity, map, scan, Filter, Identity, Map, Scan};
pub use early::{reduce_if, ReduceIf};
pub use flatten::{cat, tcat, Cat, TCat};

use crate::reducer::Reducer;

/// A pipeline stage turning items of type `T` into items of type `Out`.
pub trait Xform<T>: Sized {
    type Out;

    /// Wrap `inner`, which consumes `Out`, into a reducer consuming `T`.
    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, Self::Out>;
}

/// Two stages run back to back.
#[derive(Clone, Copy, Debug)]
pub struct Compose<X1, X2>(X1, X2);

/// Run `first`, then feed its output to `second`.
pub fn compose<X1, X2>(first: X1, second: X2) -> Compose<X1, X2> {
    Compose(first, second)
}

impl<T, X1, X2> Xform<T> for Compose<X1, X2>
where
    X1: Xform<T>,
    X2: Xform<X1::Out>,
{
    type Out = X2::Out;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, X2::Out>,
    {
        self.0.apply::<A, _>(self.1.apply::<A, R>(inner))
    }
}

/// Compose stages left to right: `pipeline![a, b, c]` runs `a`, then `b`,
/// then `c`.
#[macro_export]
macro_rules! pipeline {
    ($x:expr $(,)?) => { $x };
    ($x:expr, $($rest:expr),+ $(,)?) => {
        $crate::xform::compose($x, $crate::pipeline!($($rest),+))
    };
}
