//! # ironfold
//!
//! A **parallel reducing-pipeline engine** for Rust. Describe a computation as
//! a pipeline of stages (map, filter, flatten, early termination) ending in an
//! associative combining op, and ironfold evaluates it over a splittable input
//! domain by divide and conquer: the domain is halved until each piece is at
//! most `basesize` long, the pieces are folded sequentially, and the partial
//! results are merged back left to right. The result equals a plain
//! sequential left fold, whatever the basesize and however the work was
//! scheduled, as long as the combining op is associative.
//!
//! ## Key Features
//!
//! - **Composable stages** - [`map`](xform::map), [`filter`](xform::filter),
//!   [`scan`](xform::scan), [`cat`](xform::cat), [`tcat`](xform::tcat),
//!   [`reduce_if`](xform::reduce_if), chained with [`pipeline!`]
//! - **Splittable domains** - ranges, `Vec`s, slices, buffers, and the
//!   [`product`](domain::product), [`zip`](domain::zip) and
//!   [`enumerate`](domain::enumerate) combinators
//! - **Early termination** - a stage or combining op can end the job early;
//!   pending sibling work is skipped on a best-effort basis
//! - **Nested parallelism** - [`tcat`](xform::tcat) reduces each inner domain
//!   through the same scheduler
//! - **Ordered collection** - into a `Vec`, any [`Container`](collect::Container),
//!   or a pre-sized output written in place
//! - **Sequential and parallel execution** - on rayon, configured by [`Runner`]
//!
//! ## Quick Start
//!
//! ```
//! use ironfold::combiners::Sum;
//! use ironfold::xform::{filter, map};
//! use ironfold::{collect, pipeline, reduce};
//!
//! # fn main() -> anyhow::Result<()> {
//! // Sum of the squares of the even numbers in 1..=10
//! let xf = pipeline![filter(|x: &u64| x % 2 == 0), map(|x: u64| x * x)];
//! let total = reduce(Sum::<u64>::new(), xf, 1..=10u64, 0, 2)?;
//! assert_eq!(total.into_inner(), 220);
//!
//! // Same pipeline, collected in order
//! let xf = pipeline![filter(|x: &u64| x % 2 == 0), map(|x: u64| x * x)];
//! assert_eq!(collect(xf, 1..=10u64, 2)?, vec![4, 16, 36, 64, 100]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Domain
//!
//! A [`Domain`] is a finite, ordered input that can report its length and
//! split into two contiguous halves. Sources that cannot split cheaply are
//! turned into one with [`materialize`](domain::materialize).
//!
//! ### Stages and reducers
//!
//! An [`Xform`] wraps a downstream [`Reducer`]. Applying a pipeline to a
//! [`CombineFn`] yields a single reducer chain, shared by every branch of the
//! job. Stages may keep private per-leaf state.
//!
//! ### Combining ops
//!
//! A [`CombineFn`] folds items into an accumulator and merges two adjacent
//! accumulators. The merge must be associative and the job's initial
//! accumulator must be its identity.
//!
//! ### Early termination
//!
//! Any step or merge may return [`Acc::Reduced`]. A reduced left result
//! absorbs everything to its right; see [`combine::merge`].
//!
//! ## Execution
//!
//! [`Runner`] picks sequential or parallel execution, the basesize and the
//! nested-parallelism limit. The crate-root functions ([`reduce()`],
//! [`collect()`], [`copy_into()`], [`map_collect()`]) run on a default parallel
//! runner with an explicit basesize.
//!
//! ## Module Overview
//!
//! - [`domain`] - The splittable-input contract and built-in domains
//! - [`xform`] - Pipeline stages and composition
//! - [`combiners`] - Built-in combining ops and closure adapters
//! - [`combine`] - The merge rule for partial results
//! - [`collect`](mod@collect) - Ordered output containers
//! - [`runner`] - Execution configuration and entry points
//! - [`testing`] - Helpers for testing jobs

pub mod collect;
pub mod combine;
pub mod combiners;
pub mod domain;
mod engine;
mod error;
mod reduced;
pub mod reducer;
pub mod runner;
pub mod testing;
pub mod xform;

pub use combiners::CombineFn;
pub use domain::Domain;
pub use error::FoldError;
pub use reduced::Acc;
pub use reducer::{Ctx, Reducer};
pub use runner::{collect, copy_into, map_collect, reduce, ExecMode, Runner};
pub use xform::Xform;
