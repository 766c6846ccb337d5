//! Splittable input domains.
//!
//! A [`Domain`] is an ordered, finite collection that knows its length and can
//! cut itself in two at an index without visiting its elements. The scheduler
//! only ever asks two things of a domain: "are you small enough to fold on one
//! thread?" ([`is_small`]) and "split yourself in half" ([`Domain::split`]).
//!
//! Every split must satisfy:
//! - `left.len() + right.len() == parent.len()`
//! - iterating `left` then `right` yields exactly the parent's sequence
//!
//! # Shapes
//!
//! - [`range`]: `Range` and `RangeInclusive` over the primitive integers
//! - [`seq`]: owned `Vec<T>` and borrowed `&[T]`
//! - [`buffer`]: [`Buffer<T>`], a once-materialized opaque sequence
//! - [`product`]: [`Product`], the row-major cartesian product of two domains
//! - [`zip`]: [`Zip`], lockstep pairs from two domains
//! - [`enumerate`]: [`Enumerate`], items paired with their global index
//! - [`progress`]: [`Progress`], a read-counting decorator
//!
//! Composite shapes split structurally: a product cuts its row-major index
//! space at any position, a zip cuts both sides at the same index, an
//! enumeration re-bases the index of its right half. Nothing is materialized
//! except by [`materialize`].

use anyhow::Result;

pub mod buffer;
pub mod enumerate;
pub mod product;
pub mod progress;
pub mod range;
pub mod seq;
pub mod zip;

pub use buffer::{materialize, Buffer};
pub use enumerate::{enumerate, Enumerate};
pub use product::{product, Product};
pub use progress::{Progress, ProgressHandle};
pub use zip::{zip, Zip};

/// An ordered, finite, randomly splittable input.
pub trait Domain: Sized + Send {
    /// Element type produced when the domain is folded.
    type Item;

    /// Sequential iterator used at the leaves.
    type IntoIter: Iterator<Item = Self::Item>;

    /// Shape family name, used in diagnostics.
    const SHAPE: &'static str;

    /// Number of elements.
    ///
    /// Saturates at `usize::MAX` for shapes that can hold more; see
    /// [`checked_len`](Domain::checked_len).
    fn len(&self) -> usize;

    /// Number of elements, or
    /// [`FoldError::LengthOverflow`](crate::FoldError::LengthOverflow) when
    /// the count does not fit in a `usize`. Checked once before a job starts.
    fn checked_len(&self) -> Result<usize> {
        Ok(self.len())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split into `[0, mid)` and `[mid, len)`.
    ///
    /// Returns [`FoldError::Unsplittable`](crate::FoldError::Unsplittable)
    /// when the shape cannot produce that cut.
    fn split_at(self, mid: usize) -> Result<(Self, Self)>;

    /// Split in half; the left half takes the extra element of an odd length.
    fn split(self) -> Result<(Self, Self)> {
        let mid = self.len().div_ceil(2);
        self.split_at(mid)
    }

    /// Consume the domain into its sequential iterator.
    fn into_seq(self) -> Self::IntoIter;
}

/// Whether `domain` should be folded sequentially rather than split.
#[inline]
pub fn is_small<D: Domain>(domain: &D, basesize: usize) -> bool {
    domain.len() <= basesize
}
