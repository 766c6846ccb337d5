//! The reducing-function contract shared by every pipeline stage.
//!
//! Applying a pipeline to a combining op produces one [`Reducer`]: a chain of
//! stage wrappers with the caller's [`CombineFn`](crate::CombineFn) at the
//! bottom. The engine holds that chain by reference for the whole job and
//! drives it through four calls:
//!
//! - [`start`](Reducer::start) once per leaf, producing private stage state
//! - [`step`](Reducer::step) once per item of that leaf
//! - [`combine`](Reducer::combine) once per pair of sibling results
//! - [`complete`](Reducer::complete) once, on the final non-reduced result
//!
//! Stage state is never shared between leaves, so stateful stages need no
//! locking even when leaves run on different threads.

use anyhow::Result;

use crate::reduced::Acc;

/// Execution context handed to [`Reducer::start`].
///
/// Stages that re-enter the scheduler (see [`tcat`](crate::xform::tcat)) read
/// the basesize and nesting policy from here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ctx {
    pub(crate) depth: usize,
    pub(crate) basesize: usize,
    pub(crate) parallel: bool,
    pub(crate) nested_depth: Option<usize>,
}

impl Ctx {
    pub(crate) fn new(basesize: usize, parallel: bool, nested_depth: Option<usize>) -> Self {
        Self {
            depth: 0,
            basesize,
            parallel,
            nested_depth,
        }
    }

    /// Nesting level: 0 for the top-level domain, +1 per flatten.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Largest domain length folded without splitting.
    pub fn basesize(&self) -> usize {
        self.basesize
    }

    /// Whether splits at this level run their halves concurrently.
    pub fn is_parallel(&self) -> bool {
        self.parallel && self.nested_depth.is_none_or(|limit| self.depth <= limit)
    }

    /// Context for a domain nested one level below this one.
    pub(crate) fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }
}

/// A composed reducing function over items of type `T` into accumulator `A`.
pub trait Reducer<A, T>: Send + Sync {
    /// Private per-leaf state.
    type State;

    /// Create fresh state for one leaf. `init` is the job's initial accumulator.
    fn start(&self, init: &A, ctx: &Ctx) -> Self::State;

    /// Fold one item into the accumulator.
    fn step(&self, state: &mut Self::State, acc: A, item: T) -> Result<Acc<A>>;

    /// Merge the results of two adjacent subdomains, left then right.
    fn combine(&self, left: A, right: A) -> Result<Acc<A>>;

    /// Final hook; never sees a reduced accumulator.
    fn complete(&self, acc: A) -> Result<A>;
}
