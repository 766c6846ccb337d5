//! Progress reporting decorator.
//!
//! [`Progress`] wraps any domain and counts every element read through it,
//! across all leaves and threads. Length and splitting are forwarded to the
//! wrapped domain unchanged, so a wrapped job splits exactly like the bare
//! one and produces the same result.
//!
//! ```
//! use ironfold::domain::Progress;
//! use ironfold::{combiners::Sum, reduce, xform::identity};
//!
//! # fn main() -> anyhow::Result<()> {
//! let (domain, handle) = Progress::new(1..101u64);
//! let total = reduce(Sum::<u64>::new(), identity(), domain, 0, 8)?;
//! assert_eq!(total.into_inner(), 5050);
//! assert_eq!(handle.seen(), 100);
//! assert!(handle.is_done());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;

use crate::domain::Domain;

/// A domain that reports how many of its items have been read.
#[derive(Clone, Debug)]
pub struct Progress<D> {
    inner: D,
    seen: Arc<AtomicUsize>,
}

/// Observer side of a [`Progress`] domain.
#[derive(Clone, Debug)]
pub struct ProgressHandle {
    seen: Arc<AtomicUsize>,
    total: usize,
}

impl<D: Domain> Progress<D> {
    /// Wrap `inner`, returning the domain and a handle to watch it.
    pub fn new(inner: D) -> (Self, ProgressHandle) {
        let seen = Arc::new(AtomicUsize::new(0));
        let handle = ProgressHandle {
            seen: Arc::clone(&seen),
            total: inner.len(),
        };
        (Self { inner, seen }, handle)
    }
}

impl ProgressHandle {
    /// Items read so far.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }

    /// Length of the wrapped domain when it was wrapped.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of the domain read, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.seen() as f64 / self.total as f64
        }
    }

    pub fn is_done(&self) -> bool {
        self.seen() >= self.total
    }
}

impl<D: Domain> Domain for Progress<D> {
    type Item = D::Item;
    type IntoIter = ProgressIter<D::IntoIter>;
    const SHAPE: &'static str = D::SHAPE;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn checked_len(&self) -> Result<usize> {
        self.inner.checked_len()
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let (l, r) = self.inner.split_at(mid)?;
        Ok((
            Progress {
                inner: l,
                seen: Arc::clone(&self.seen),
            },
            Progress {
                inner: r,
                seen: self.seen,
            },
        ))
    }

    fn split(self) -> Result<(Self, Self)> {
        let (l, r) = self.inner.split()?;
        Ok((
            Progress {
                inner: l,
                seen: Arc::clone(&self.seen),
            },
            Progress {
                inner: r,
                seen: self.seen,
            },
        ))
    }

    fn into_seq(self) -> Self::IntoIter {
        ProgressIter {
            inner: self.inner.into_seq(),
            seen: self.seen,
        }
    }
}

/// Iterator that bumps the shared counter on every item.
pub struct ProgressIter<I> {
    inner: I,
    seen: Arc<AtomicUsize>,
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.inner.next()?;
        self.seen.fetch_add(1, Ordering::Relaxed);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
