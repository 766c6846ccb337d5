//! Sequential folding and the divide-and-conquer scheduler.
//!
//! A job is reduced by recursively halving its domain until each piece is no
//! longer than the basesize, folding every piece sequentially, and merging
//! sibling results left-then-right on the way back up. In parallel mode the
//! right half of every split becomes a `rayon::join` task while the current
//! worker keeps the left half; rayon's work-stealing pool bounds how many of
//! those tasks actually run at once. Sequential mode walks the same tree on
//! the calling thread, so both modes merge the same leaves in the same order.
//!
//! # Cancellation
//!
//! Every right half receives a [`Cancel`] token chained to its parent's. When
//! a left half finishes reduced (or failed), it trips the token of its right
//! sibling, and every task under that sibling that has not started yet
//! returns [`Partial::Skipped`] instead of running. Folds already in progress
//! run to completion. A skipped result can only meet a reduced left sibling,
//! where the combine rule discards it, so cancellation never changes the
//! returned value.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tracing::{debug, trace};

use crate::combine;
use crate::domain::{is_small, Domain};
use crate::error::FoldError;
use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};

/// Result of one subtree: a real accumulator, or nothing because a sibling to
/// its left had already short-circuited.
enum Partial<A> {
    Done(Acc<A>),
    Skipped,
}

/// Best-effort cancellation flag, chained to the enclosing subtree's flag.
struct Cancel<'a> {
    flag: AtomicBool,
    parent: Option<&'a Cancel<'a>>,
}

impl<'a> Cancel<'a> {
    fn root() -> Self {
        Self {
            flag: AtomicBool::new(false),
            parent: None,
        }
    }

    fn child(parent: &'a Cancel<'a>) -> Self {
        Self {
            flag: AtomicBool::new(false),
            parent: Some(parent),
        }
    }

    fn trip(&self) {
        self.flag.store(true, Ordering::Release);
    }

    fn is_tripped(&self) -> bool {
        let mut cur = Some(self);
        while let Some(c) = cur {
            if c.flag.load(Ordering::Acquire) {
                return true;
            }
            cur = c.parent;
        }
        false
    }
}

/// Fold `domain` left to right into `init`, stopping at the first reduced
/// accumulator. Never calls [`Reducer::complete`].
pub(crate) fn seq_reduce<A, D, R>(
    rf: &R,
    state: &mut R::State,
    init: A,
    domain: D,
) -> Result<Acc<A>>
where
    D: Domain,
    R: Reducer<A, D::Item>,
{
    let mut acc = init;
    for item in domain.into_seq() {
        match rf.step(state, acc, item)? {
            Acc::Continue(next) => acc = next,
            reduced @ Acc::Reduced(_) => return Ok(reduced),
        }
    }
    Ok(Acc::Continue(acc))
}

/// Reduce a whole domain under `ctx`. The result has not been completed.
pub(crate) fn run<A, D, R>(rf: &R, init: A, domain: D, ctx: &Ctx) -> Result<Acc<A>>
where
    A: Clone + Send,
    D: Domain,
    R: Reducer<A, D::Item>,
{
    let root = Cancel::root();
    match reduce_tree(rf, init, domain, ctx, &root)? {
        Partial::Done(acc) => Ok(acc),
        Partial::Skipped => {
            Err(FoldError::Internal("root of the reduction was cancelled".into()).into())
        }
    }
}

/// Reduce a domain produced while reducing another one.
///
/// Runs the full scheduler one nesting level down while that level is still
/// allowed to parallelize, and a single sequential fold otherwise.
pub(crate) fn reduce_nested<A, D, R>(rf: &R, init: A, domain: D, ctx: &Ctx) -> Result<Acc<A>>
where
    A: Clone + Send,
    D: Domain,
    R: Reducer<A, D::Item>,
{
    let nested = ctx.nested();
    trace!(depth = nested.depth, len = domain.len(), shape = D::SHAPE, "nested reduction");
    if nested.is_parallel() {
        run(rf, init, domain, &nested)
    } else {
        let mut state = rf.start(&init, &nested);
        seq_reduce(rf, &mut state, init, domain)
    }
}

fn reduce_tree<A, D, R>(
    rf: &R,
    init: A,
    domain: D,
    ctx: &Ctx,
    cancel: &Cancel<'_>,
) -> Result<Partial<A>>
where
    A: Clone + Send,
    D: Domain,
    R: Reducer<A, D::Item>,
{
    if cancel.is_tripped() {
        debug!(len = domain.len(), shape = D::SHAPE, "skipping cancelled subtree");
        return Ok(Partial::Skipped);
    }
    if is_small(&domain, ctx.basesize) {
        let mut state = rf.start(&init, ctx);
        return seq_reduce(rf, &mut state, init, domain).map(Partial::Done);
    }

    let len = domain.len();
    let (left, right) = domain.split()?;
    if left.len() + right.len() != len || left.is_empty() || right.is_empty() {
        return Err(FoldError::Internal(format!(
            "{} split of length {len} produced halves of {} and {}",
            D::SHAPE,
            left.len(),
            right.len()
        ))
        .into());
    }
    trace!(shape = D::SHAPE, len, left = left.len(), right = right.len(), "split");

    let right_init = init.clone();
    let (l, r) = if ctx.is_parallel() {
        let right_cancel = Cancel::child(cancel);
        join(
            || {
                let l = reduce_tree(rf, init, left, ctx, cancel);
                if ends_early(&l) {
                    right_cancel.trip();
                }
                l
            },
            || reduce_tree(rf, right_init, right, ctx, &right_cancel),
        )
    } else {
        let l = reduce_tree(rf, init, left, ctx, cancel);
        let r = if ends_early(&l) {
            Ok(Partial::Skipped)
        } else {
            reduce_tree(rf, right_init, right, ctx, cancel)
        };
        (l, r)
    };

    match (l?, r?) {
        (Partial::Done(l), Partial::Done(r)) => {
            combine::merge(l, r, |a, b| rf.combine(a, b)).map(Partial::Done)
        }
        (Partial::Done(l @ Acc::Reduced(_)), Partial::Skipped) => Ok(Partial::Done(l)),
        _ => Ok(Partial::Skipped),
    }
}

/// Whether a left result makes its right sibling irrelevant.
fn ends_early<A>(res: &Result<Partial<A>>) -> bool {
    matches!(res, Ok(Partial::Done(Acc::Reduced(_))) | Err(_))
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
