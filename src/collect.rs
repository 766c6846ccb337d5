//! Order-preserving materialization.
//!
//! Two strategies, both producing the items in domain order:
//!
//! - **Ordered append** ([`Runner::collect`](crate::Runner::collect),
//!   [`Runner::copy_into`](crate::Runner::copy_into)): every leaf builds a
//!   partial container, and partials are appended left-before-right by the
//!   combine step. Works for any pipeline, including filters and flattens.
//! - **Indexed writes** ([`Runner::map_collect`](crate::Runner::map_collect)):
//!   for a one-to-one map the output length is the domain length, so the
//!   output is allocated once and each leaf writes straight into its own
//!   slot range, located from the split lengths. No partial containers, no
//!   appends.

use std::collections::VecDeque;
use std::marker::PhantomData;

use anyhow::Result;

use crate::combiners::CombineFn;
use crate::domain::{is_small, Domain};
use crate::error::FoldError;
use crate::reduced::Acc;
use crate::reducer::Ctx;

/// An output container that accepts ordered appends.
pub trait Container<T>: Default + Send {
    /// Append one item at the end.
    fn push_item(&mut self, item: T);

    /// Append all of `other`, which holds the items that come after `self`'s.
    fn append_from(&mut self, other: Self);
}

impl<T: Send> Container<T> for Vec<T> {
    fn push_item(&mut self, item: T) {
        self.push(item);
    }

    fn append_from(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl<T: Send> Container<T> for VecDeque<T> {
    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn append_from(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl Container<char> for String {
    fn push_item(&mut self, item: char) {
        self.push(item);
    }

    fn append_from(&mut self, other: Self) {
        self.push_str(&other);
    }
}

/// Columnar storage: one `Vec` per tuple field.
impl<A: Send, B: Send> Container<(A, B)> for (Vec<A>, Vec<B>) {
    fn push_item(&mut self, (a, b): (A, B)) {
        self.0.push(a);
        self.1.push(b);
    }

    fn append_from(&mut self, (mut a, mut b): Self) {
        self.0.append(&mut a);
        self.1.append(&mut b);
    }
}

impl<A: Send, B: Send, C: Send> Container<(A, B, C)> for (Vec<A>, Vec<B>, Vec<C>) {
    fn push_item(&mut self, (a, b, c): (A, B, C)) {
        self.0.push(a);
        self.1.push(b);
        self.2.push(c);
    }

    fn append_from(&mut self, (mut a, mut b, mut c): Self) {
        self.0.append(&mut a);
        self.1.append(&mut b);
        self.2.append(&mut c);
    }
}

/// Combining op that fills a [`Container`].
pub struct Append<C>(PhantomData<fn() -> C>);

impl<C> Append<C> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<C> Default for Append<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T> CombineFn<C, T> for Append<C>
where
    C: Container<T>,
{
    fn add_input(&self, mut acc: C, v: T) -> Result<Acc<C>> {
        acc.push_item(v);
        Ok(Acc::Continue(acc))
    }

    fn merge(&self, mut acc: C, other: C) -> Result<Acc<C>> {
        acc.append_from(other);
        Ok(Acc::Continue(acc))
    }
}

/// Map every item of `domain` into a pre-sized output, in domain order.
pub(crate) fn map_into<D, F, U>(f: &F, domain: D, ctx: &Ctx) -> Result<Vec<U>>
where
    D: Domain,
    F: Fn(D::Item) -> U + Sync,
    U: Send,
{
    let len = domain.len();
    let mut slots: Vec<Option<U>> = std::iter::repeat_with(|| None).take(len).collect();
    fill(f, domain, &mut slots, ctx)?;
    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                let msg = format!("output slot {i} of {len} was never written");
                anyhow::Error::from(FoldError::Internal(msg))
            })
        })
        .collect()
}

fn fill<D, F, U>(f: &F, domain: D, out: &mut [Option<U>], ctx: &Ctx) -> Result<()>
where
    D: Domain,
    F: Fn(D::Item) -> U + Sync,
    U: Send,
{
    if out.len() != domain.len() {
        return Err(FoldError::Internal(format!(
            "{} domain of length {} assigned {} output slots",
            D::SHAPE,
            domain.len(),
            out.len()
        ))
        .into());
    }
    if is_small(&domain, ctx.basesize) {
        for (slot, item) in out.iter_mut().zip(domain.into_seq()) {
            *slot = Some(f(item));
        }
        return Ok(());
    }

    let (left, right) = domain.split()?;
    let (lo, ro) = out.split_at_mut(left.len());
    if ctx.is_parallel() {
        let (l, r) = join(|| fill(f, left, lo, ctx), || fill(f, right, ro, ctx));
        l?;
        r
    } else {
        fill(f, left, lo, ctx)?;
        fill(f, right, ro, ctx)
    }
}

#[cfg(feature = "parallel")]
fn join<RA, RB>(a: impl FnOnce() -> RA + Send, b: impl FnOnce() -> RB + Send) -> (RA, RB)
where
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<RA, RB>(a: impl FnOnce() -> RA, b: impl FnOnce() -> RB) -> (RA, RB) {
    (a(), b())
}
