//! Materialized opaque sequences.
//!
//! Sources whose length is not cheaply known, or that cannot cut themselves,
//! are drained once into a shared buffer. Splitting a [`Buffer`] then only
//! narrows an index window; the elements are never copied again. Items are
//! cloned out of the buffer as a leaf folds over its window.

use std::ops::Range;
use std::sync::Arc;

use anyhow::Result;

use crate::domain::Domain;
use crate::error::FoldError;

/// A window over a shared, immutable element buffer.
#[derive(Debug)]
pub struct Buffer<T> {
    data: Arc<[T]>,
    window: Range<usize>,
}

// Shares the buffer, so no `T: Clone` bound.
impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            window: self.window.clone(),
        }
    }
}

/// Drain `items` into a splittable [`Buffer`].
///
/// ```
/// use ironfold::domain::{materialize, Domain};
///
/// let words = materialize("a b c".split(' ').map(String::from));
/// assert_eq!(Domain::len(&words), 3);
/// ```
pub fn materialize<I: IntoIterator>(items: I) -> Buffer<I::Item> {
    let data: Arc<[I::Item]> = items.into_iter().collect();
    let window = 0..data.len();
    Buffer { data, window }
}

impl<T> Buffer<T> {
    /// Elements visible through this window.
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.window.clone()]
    }
}

impl<T: Clone + Send + Sync> Domain for Buffer<T> {
    type Item = T;
    type IntoIter = BufferIter<T>;
    const SHAPE: &'static str = "buffer";

    fn len(&self) -> usize {
        self.window.end - self.window.start
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let len = Domain::len(&self);
        if mid > len {
            return Err(
                FoldError::unsplittable(Self::SHAPE, len, "split index past the end").into(),
            );
        }
        let pivot = self.window.start + mid;
        let left = Buffer {
            data: Arc::clone(&self.data),
            window: self.window.start..pivot,
        };
        let right = Buffer {
            data: self.data,
            window: pivot..self.window.end,
        };
        Ok((left, right))
    }

    fn into_seq(self) -> Self::IntoIter {
        BufferIter {
            data: self.data,
            window: self.window,
        }
    }
}

/// Cloning iterator over a [`Buffer`] window.
pub struct BufferIter<T> {
    data: Arc<[T]>,
    window: Range<usize>,
}

impl<T: Clone> Iterator for BufferIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let i = self.window.next()?;
        Some(self.data[i].clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.window.size_hint()
    }
}
