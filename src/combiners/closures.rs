//! Combining ops built from closures.

use anyhow::Result;

use crate::combiners::CombineFn;
use crate::reduced::Acc;

/* ===================== Binary ===================== */

/// One associative function used both to add items and to merge partials.
#[derive(Clone, Copy, Debug)]
pub struct Binary<F>(F);

/// Combining op from an associative `f(A, A) -> A`; items must already be `A`.
pub fn binary<A, F>(f: F) -> Binary<F>
where
    F: Fn(A, A) -> A + Send + Sync,
{
    Binary(f)
}

impl<A, F> CombineFn<A, A> for Binary<F>
where
    F: Fn(A, A) -> A + Send + Sync,
{
    fn add_input(&self, acc: A, v: A) -> Result<Acc<A>> {
        Ok(Acc::Continue((self.0)(acc, v)))
    }

    fn merge(&self, acc: A, other: A) -> Result<Acc<A>> {
        Ok(Acc::Continue((self.0)(acc, other)))
    }
}

/* ===================== BinaryUntil ===================== */

/// Like [`Binary`], but the function decides when the reduction is over.
#[derive(Clone, Copy, Debug)]
pub struct BinaryUntil<F>(F);

/// Combining op from `f(A, A) -> Acc<A>`.
///
/// Returning [`Acc::Reduced`] from either a per-item call or a merge of two
/// partials ends the reduction, e.g. once a running total passes a threshold.
pub fn binary_until<A, F>(f: F) -> BinaryUntil<F>
where
    F: Fn(A, A) -> Acc<A> + Send + Sync,
{
    BinaryUntil(f)
}

impl<A, F> CombineFn<A, A> for BinaryUntil<F>
where
    F: Fn(A, A) -> Acc<A> + Send + Sync,
{
    fn add_input(&self, acc: A, v: A) -> Result<Acc<A>> {
        Ok((self.0)(acc, v))
    }

    fn merge(&self, acc: A, other: A) -> Result<Acc<A>> {
        Ok((self.0)(acc, other))
    }
}

/* ===================== FoldFn ===================== */

/// Separate item and merge functions, for when `T` differs from `A`.
#[derive(Clone, Copy, Debug)]
pub struct FoldFn<S, M> {
    add: S,
    merge: M,
}

pub fn fold_fn<A, T, S, M>(add: S, merge: M) -> FoldFn<S, M>
where
    S: Fn(A, T) -> A + Send + Sync,
    M: Fn(A, A) -> A + Send + Sync,
{
    FoldFn { add, merge }
}

impl<A, T, S, M> CombineFn<A, T> for FoldFn<S, M>
where
    S: Fn(A, T) -> A + Send + Sync,
    M: Fn(A, A) -> A + Send + Sync,
{
    fn add_input(&self, acc: A, v: T) -> Result<Acc<A>> {
        Ok(Acc::Continue((self.add)(acc, v)))
    }

    fn merge(&self, acc: A, other: A) -> Result<Acc<A>> {
        Ok(Acc::Continue((self.merge)(acc, other)))
    }
}

/* ===================== TryFoldFn ===================== */

/// Fallible item and merge functions with full control over the tag.
#[derive(Clone, Copy, Debug)]
pub struct TryFoldFn<S, M> {
    add: S,
    merge: M,
}

/// Errors returned by either function abort the reduction and surface to
/// the caller from whichever branch reports first.
pub fn try_fold_fn<A, T, S, M>(add: S, merge: M) -> TryFoldFn<S, M>
where
    S: Fn(A, T) -> Result<Acc<A>> + Send + Sync,
    M: Fn(A, A) -> Result<Acc<A>> + Send + Sync,
{
    TryFoldFn { add, merge }
}

impl<A, T, S, M> CombineFn<A, T> for TryFoldFn<S, M>
where
    S: Fn(A, T) -> Result<Acc<A>> + Send + Sync,
    M: Fn(A, A) -> Result<Acc<A>> + Send + Sync,
{
    fn add_input(&self, acc: A, v: T) -> Result<Acc<A>> {
        (self.add)(acc, v)
    }

    fn merge(&self, acc: A, other: A) -> Result<Acc<A>> {
        (self.merge)(acc, other)
    }
}

/* ===================== Completing ===================== */

/// A combining op with an extra finish hook; see
/// [`CombineFnExt::completing`](crate::combiners::CombineFnExt::completing).
#[derive(Clone, Copy, Debug)]
pub struct Completing<C, F> {
    op: C,
    finish: F,
}

impl<C, F> Completing<C, F> {
    pub(crate) fn new(op: C, finish: F) -> Self {
        Self { op, finish }
    }
}

impl<A, T, C, F> CombineFn<A, T> for Completing<C, F>
where
    C: CombineFn<A, T>,
    F: Fn(A) -> Result<A> + Send + Sync,
{
    fn add_input(&self, acc: A, v: T) -> Result<Acc<A>> {
        self.op.add_input(acc, v)
    }

    fn merge(&self, acc: A, other: A) -> Result<Acc<A>> {
        self.op.merge(acc, other)
    }

    fn finish(&self, acc: A) -> Result<A> {
        let acc = self.op.finish(acc)?;
        (self.finish)(acc)
    }
}
