//! Combining ops: the innermost step of every reduction.
//!
//! A [`CombineFn<A, T>`] says how an item of type `T` enters an accumulator
//! `A` ([`add_input`](CombineFn::add_input)), how two accumulators from
//! adjacent subdomains merge ([`merge`](CombineFn::merge)), and optionally how
//! the final accumulator is finished ([`finish`](CombineFn::finish)). Both
//! `add_input` and `merge` may end the reduction early by returning
//! [`Acc::Reduced`].
//!
//! # Precondition
//!
//! `merge` must be associative over every accumulator the job can reach, and
//! the job's initial accumulator must be its identity. The engine cannot
//! detect violations; they show up as results that depend on the basesize.
//!
//! # Built-ins
//!
//! - [`Sum<T>`], [`Min<T>`], [`Max<T>`], [`Count`]
//! - [`Right`] -- keeps the latest item; with [`reduce_if`](crate::xform::reduce_if)
//!   it finds the first match
//! - [`Push`] -- ordered `Vec` collection
//! - [`binary`], [`binary_until`], [`fold_fn`], [`try_fold_fn`] -- from closures
//! - [`CombineFnExt::completing`] -- attach a finish hook
//!
//! # Examples
//! ```
//! use ironfold::combiners::{binary, CombineFnExt};
//! use ironfold::{reduce, xform::map};
//!
//! # fn main() -> anyhow::Result<()> {
//! let op = binary(|a: i64, b: i64| a + b).completing(|total: i64| Ok(total * 10));
//! let out = reduce(op, map(|x: i64| x * x), 1..=5i64, 0, 2)?;
//! assert_eq!(out.into_inner(), 550);
//! # Ok(())
//! # }
//! ```

mod basic;
mod closures;

pub use basic::{Count, Max, Min, Push, Right, Sum};
pub use closures::{
    binary, binary_until, fold_fn, try_fold_fn, Binary, BinaryUntil, Completing, FoldFn,
    TryFoldFn,
};

use anyhow::Result;

use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};

/// A caller-supplied combining op over accumulator `A` and items `T`.
pub trait CombineFn<A, T>: Send + Sync {
    /// Fold one item into the accumulator.
    fn add_input(&self, acc: A, v: T) -> Result<Acc<A>>;

    /// Merge two accumulators, `acc` covering the items left of `other`.
    fn merge(&self, acc: A, other: A) -> Result<Acc<A>>;

    /// Runs once on the final accumulator unless the job short-circuited.
    fn finish(&self, acc: A) -> Result<A> {
        Ok(acc)
    }
}

/// Extension methods for every combining op.
pub trait CombineFnExt: Sized {
    /// Run `finish` on the final accumulator after this op's own finish.
    ///
    /// The hook is skipped entirely when the reduction short-circuits.
    fn completing<A, F>(self, finish: F) -> Completing<Self, F>
    where
        F: Fn(A) -> Result<A> + Send + Sync,
    {
        Completing::new(self, finish)
    }
}

impl<C> CombineFnExt for C {}

/// Adapts a [`CombineFn`] into the bottom of a [`Reducer`] chain.
pub(crate) struct Terminal<C>(pub(crate) C);

impl<A, T, C> Reducer<A, T> for Terminal<C>
where
    C: CombineFn<A, T>,
{
    type State = ();

    fn start(&self, _init: &A, _ctx: &Ctx) {}

    fn step(&self, _state: &mut (), acc: A, item: T) -> Result<Acc<A>> {
        self.0.add_input(acc, item)
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.0.merge(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.0.finish(acc)
    }
}
