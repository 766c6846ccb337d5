//! Early termination.

use anyhow::Result;

use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};
use crate::xform::Xform;

/// Ends the reduction at the first item matching a predicate.
///
/// The matching item is still passed downstream; the accumulator that comes
/// back is tagged [`Acc::Reduced`]. The sequential fold stops right there,
/// and the combine rule lets that result absorb everything to its right.
///
/// ```
/// use ironfold::combiners::Right;
/// use ironfold::{reduce, xform::reduce_if, Acc};
///
/// # fn main() -> anyhow::Result<()> {
/// let first = reduce(Right, reduce_if(|x: &i64| *x >= 7), 1..=20i64, 0, 3)?;
/// assert_eq!(first, Acc::Reduced(7));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ReduceIf<P>(P);

pub fn reduce_if<P>(pred: P) -> ReduceIf<P> {
    ReduceIf(pred)
}

/// Per-leaf state of a [`ReduceIf`] stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Active,
    Done,
}

impl<T, P> Xform<T> for ReduceIf<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    type Out = T;

    fn apply<A, R>(self, inner: R) -> impl Reducer<A, T>
    where
        A: Clone + Send,
        R: Reducer<A, T>,
    {
        ReduceIfRf { pred: self.0, inner }
    }
}

struct ReduceIfRf<P, R> {
    pred: P,
    inner: R,
}

impl<A, T, P, R> Reducer<A, T> for ReduceIfRf<P, R>
where
    P: Fn(&T) -> bool + Send + Sync,
    R: Reducer<A, T>,
{
    type State = (Phase, R::State);

    fn start(&self, init: &A, ctx: &Ctx) -> Self::State {
        (Phase::Active, self.inner.start(init, ctx))
    }

    fn step(&self, state: &mut Self::State, acc: A, item: T) -> Result<Acc<A>> {
        let (phase, inner_state) = state;
        if *phase == Phase::Done {
            return Ok(Acc::Reduced(acc));
        }
        if !(self.pred)(&item) {
            return self.inner.step(inner_state, acc, item);
        }
        *phase = Phase::Done;
        Ok(self.inner.step(inner_state, acc, item)?.into_reduced())
    }

    fn combine(&self, left: A, right: A) -> Result<Acc<A>> {
        self.inner.combine(left, right)
    }

    fn complete(&self, acc: A) -> Result<A> {
        self.inner.complete(acc)
    }
}
