//! Flattening stages.
//!
//! [`cat`] splices each item's elements into the stream on the current leaf.
//! [`tcat`] treats each item as a [`Domain`] of its own and reduces it through
//! the scheduler, so a single large inner domain is split and parallelized
//! like a top-level one.
//!
//! # Nested reductions
//!
//! `tcat` reduces every inner domain with the downstream reducer, starting
//! from the job's initial accumulator, using the same basesize, one nesting
//! level deeper. The result is merged into the running accumulator with the
//! usual combine rule, so the output order is outer-major, inner-minor no
//! matter which inner piece finished first. Because each inner reduction
//! starts from the initial accumulator, that value must be an identity of the
//! merge function.
//!
//! [`Runner::with_nested_depth`](crate::Runner::with_nested_depth) bounds how
//! many nesting levels may parallelize; deeper inner domains are folded in
//! one sequential pass.

use anyhow::Result;

use crate::combine;
use crate::domain::Domain;
use crate::engine;
use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};
use crate::xform::Xform;

/* ===================== Cat ===================== */

/// Sequential flatten of `IntoIterator` items.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cat;

pub fn cat() -> Cat {
    Cat
}

impl<T: IntoIterator> Xform<T> for Cat {
    type Out = T::Item;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, T::Item>,
    {
        CatRf { inner }
    }
}

struct CatRf<R> {
    inner: R,
}

impl<A, T, R> Reducer<A, T> for CatRf<R>
where
    T: IntoIterator,
    R: Reducer<A, T::Item>,
{
    type State = R::State;

    fn start(&self, init: &A, ctx: &Ctx) -> R::State {
        self.inner.start(init, ctx)
    }

    fn step(&self, state: &mut R::State, mut acc: A, item: T) -> Result<Acc<A>> {
        for x in item {
            match self.inner.step(state, acc, x)? {
                Acc::Continue(next) => acc = next,
                reduced @ Acc::Reduced(_) => return Ok(reduced),
            }
        }
        Ok(Acc::Continue(acc))
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}

/* ===================== TCat ===================== */

/// Flatten of [`Domain`] items, each reduced by the scheduler.
///
/// ```
/// use ironfold::{collect, pipeline, xform::{map, tcat}};
///
/// # fn main() -> anyhow::Result<()> {
/// let xf = pipeline![map(|n: i64| 1..=n), tcat()];
/// assert_eq!(collect(xf, 1..=3i64, 1)?, vec![1, 1, 2, 1, 2, 3]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TCat;

pub fn tcat() -> TCat {
    TCat
}

impl<D: Domain> Xform<D> for TCat {
    type Out = D::Item;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, D>
    where
        A: Clone + Send,
        R: Reducer<A, D::Item>,
    {
        TCatRf { inner }
    }
}

struct TCatRf<R> {
    inner: R,
}

/// Per-leaf state of a [`TCat`] stage: what each nested job starts from.
struct Nest<A> {
    identity: A,
    ctx: Ctx,
}

impl<A, D, R> Reducer<A, D> for TCatRf<R>
where
    A: Clone + Send,
    D: Domain,
    R: Reducer<A, D::Item>,
{
    type State = Nest<A>;

    fn start(&self, init: &A, ctx: &Ctx) -> Nest<A> {
        Nest {
            identity: init.clone(),
            ctx: *ctx,
        }
    }

    fn step(&self, state: &mut Nest<A>, acc: A, item: D) -> Result<Acc<A>> {
        let sub = engine::reduce_nested(&self.inner, state.identity.clone(), item, &state.ctx)?;
        combine::merge(Acc::Continue(acc), sub, |l, r| self.inner.combine(l, r))
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}
