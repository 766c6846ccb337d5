//! Element-wise stages and the running scan.

use anyhow::Result;

use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};
use crate::xform::Xform;

/* ===================== Identity ===================== */

/// Passes items through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

pub fn identity() -> Identity {
    Identity
}

impl<T> Xform<T> for Identity {
    type Out = T;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, T>,
    {
        inner
    }
}

/* ===================== Map ===================== */

/// Applies a function to every item.
#[derive(Clone, Copy, Debug)]
pub struct Map<F>(F);

pub fn map<F>(f: F) -> Map<F> {
    Map(f)
}

impl<T, U, F> Xform<T> for Map<F>
where
    F: Fn(T) -> U + Send + Sync,
{
    type Out = U;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, U>,
    {
        MapRf { f: self.0, inner }
    }
}

struct MapRf<F, R> {
    f: F,
    inner: R,
}

impl<A, T, U, F, R> Reducer<A, T> for MapRf<F, R>
where
    F: Fn(T) -> U + Send + Sync,
    R: Reducer<A, U>,
{
    type State = R::State;

    fn start(&self, init: &A, ctx: &Ctx) -> R::State {
        self.inner.start(init, ctx)
    }

    fn step(&self, state: &mut R::State, acc: A, item: T) -> Result<Acc<A>> {
        self.inner.step(state, acc, (self.f)(item))
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}

/* ===================== Filter ===================== */

/// Keeps the items matching a predicate.
#[derive(Clone, Copy, Debug)]
pub struct Filter<P>(P);

pub fn filter<P>(pred: P) -> Filter<P> {
    Filter(pred)
}

impl<T, P> Xform<T> for Filter<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    type Out = T;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, T>,
    {
        FilterRf { pred: self.0, inner }
    }
}

struct FilterRf<P, R> {
    pred: P,
    inner: R,
}

impl<A, T, P, R> Reducer<A, T> for FilterRf<P, R>
where
    P: Fn(&T) -> bool + Send + Sync,
    R: Reducer<A, T>,
{
    type State = R::State;

    fn start(&self, init: &A, ctx: &Ctx) -> R::State {
        self.inner.start(init, ctx)
    }

    fn step(&self, state: &mut R::State, acc: A, item: T) -> Result<Acc<A>> {
        if (self.pred)(&item) {
            self.inner.step(state, acc, item)
        } else {
            Ok(Acc::Continue(acc))
        }
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}

/* ===================== Scan ===================== */

/// Emits a running accumulation `s = f(s, item)` of the items it sees.
///
/// The running value is per-leaf state, seeded from `seed` whenever a leaf
/// starts. Under a parallel reduction each leaf therefore scans its own
/// subdomain from `seed`; a whole-domain scan needs a basesize of at least the
/// domain length.
#[derive(Clone, Copy, Debug)]
pub struct Scan<S, F> {
    seed: S,
    f: F,
}

pub fn scan<S, F>(seed: S, f: F) -> Scan<S, F> {
    Scan { seed, f }
}

impl<T, S, F> Xform<T> for Scan<S, F>
where
    S: Clone + Send + Sync,
    F: Fn(&S, T) -> S + Send + Sync,
{
    type Out = S;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, S>,
    {
        ScanRf {
            seed: self.seed,
            f: self.f,
            inner,
        }
    }
}

struct ScanRf<S, F, R> {
    seed: S,
    f: F,
    inner: R,
}

impl<A, T, S, F, R> Reducer<A, T> for ScanRf<S, F, R>
where
    S: Clone + Send + Sync,
    F: Fn(&S, T) -> S + Send + Sync,
    R: Reducer<A, S>,
{
    type State = (S, R::State);

    fn start(&self, init: &A, ctx: &Ctx) -> Self::State {
        (self.seed.clone(), self.inner.start(init, ctx))
    }

    fn step(&self, state: &mut Self::State, acc: A, item: T) -> Result<Acc<A>> {
        let (running, inner_state) = state;
        let next = (self.f)(&*running, item);
        *running = next;
        self.inner.step(inner_state, acc, running.clone())
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}
