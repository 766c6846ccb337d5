//! Cartesian products.
//!
//! [`Product`] enumerates `outer × inner` in row-major order: the outer axis
//! varies slowest. A product is a window over that flat index space, so it
//! splits at any position, not only on row boundaries. A cut inside a row
//! keeps that row's outer item on both sides: the left half ends partway
//! through it and the right half starts with the rest of it, held as a
//! split-off piece of the inner domain. This lets a product sit under a
//! [`zip`](crate::domain::zip) or any other shape that cuts at arbitrary
//! indices.

use anyhow::Result;

use crate::domain::Domain;
use crate::error::FoldError;

/// Row-major cartesian product of two domains.
#[derive(Clone, Debug)]
pub struct Product<A, B> {
    /// Rows covered by the window, first and last possibly partial.
    outer: A,
    /// One full row.
    inner: B,
    /// Remaining columns of the first row when the window starts inside it.
    head: Option<B>,
    len: usize,
}

/// Build the cartesian product `outer × inner`.
///
/// ```
/// use ironfold::domain::{product, Domain};
///
/// let grid = product(1..4i64, 1..4i64);
/// assert_eq!(Domain::len(&grid), 9);
/// assert_eq!(grid.into_seq().next(), Some((1, 1)));
/// ```
pub fn product<A: Domain, B: Domain>(outer: A, inner: B) -> Product<A, B> {
    let len = outer.len().saturating_mul(inner.len());
    Product {
        outer,
        inner,
        head: None,
        len,
    }
}

/// The first `n` rows of `outer`, for `1 <= n`.
fn take_rows<A: Domain>(outer: A, n: usize) -> Result<A> {
    if n >= outer.len() {
        Ok(outer)
    } else {
        Ok(outer.split_at(n)?.0)
    }
}

/// `outer` without its first `n` rows, for `n < outer.len()`.
fn drop_rows<A: Domain>(outer: A, n: usize) -> Result<A> {
    if n == 0 {
        Ok(outer)
    } else {
        Ok(outer.split_at(n)?.1)
    }
}

impl<A, B> Product<A, B>
where
    A: Domain + Clone,
    B: Domain + Clone,
{
    fn empty(&self) -> Self {
        Product {
            len: 0,
            ..self.clone()
        }
    }

    /// Columns of the first row that lie before the window.
    fn skip(&self) -> usize {
        self.head
            .as_ref()
            .map_or(0, |h| self.inner.len() - h.len())
    }
}

impl<A, B> Domain for Product<A, B>
where
    A: Domain + Clone,
    A::Item: Clone,
    B: Domain + Clone,
{
    type Item = (A::Item, B::Item);
    type IntoIter = ProductIter<A::IntoIter, B>;
    const SHAPE: &'static str = "product";

    fn len(&self) -> usize {
        self.len
    }

    fn checked_len(&self) -> Result<usize> {
        let full = self
            .outer
            .checked_len()?
            .checked_mul(self.inner.checked_len()?)
            .ok_or(FoldError::length_overflow(Self::SHAPE))?;
        Ok(full.min(self.len))
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let len = self.len;
        if mid > len {
            return Err(
                FoldError::unsplittable(Self::SHAPE, len, "split index past the end").into(),
            );
        }
        if mid == 0 {
            return Ok((self.empty(), self));
        }
        if mid == len {
            return Ok((self.clone(), self.empty()));
        }

        // Flat position of the cut, counted from the first row's start.
        let row = self.inner.len();
        let skip = self.skip();
        let at = skip + mid;
        let (rows_before, col) = (at / row, at % row);

        let left_rows = if col == 0 { rows_before } else { rows_before + 1 };
        let left = Product {
            outer: take_rows(self.outer.clone(), left_rows)?,
            inner: self.inner.clone(),
            head: self.head.clone(),
            len: mid,
        };

        let head = match (col, self.head) {
            (0, _) => None,
            (_, Some(head)) if rows_before == 0 => Some(head.split_at(col - skip)?.1),
            _ => Some(self.inner.clone().split_at(col)?.1),
        };
        let right = Product {
            outer: drop_rows(self.outer, rows_before)?,
            inner: self.inner,
            head,
            len: len - mid,
        };
        Ok((left, right))
    }

    fn into_seq(self) -> Self::IntoIter {
        ProductIter {
            outer: self.outer.into_seq(),
            row: None,
            head: self.head,
            inner: self.inner,
            remaining: self.len,
        }
    }
}

/// Row-major iterator over a [`Product`].
pub struct ProductIter<I: Iterator, B: Domain> {
    outer: I,
    row: Option<(I::Item, B::IntoIter)>,
    head: Option<B>,
    inner: B,
    remaining: usize,
}

impl<I, B> Iterator for ProductIter<I, B>
where
    I: Iterator,
    I::Item: Clone,
    B: Domain + Clone,
{
    type Item = (I::Item, B::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some((a, cols)) = &mut self.row {
                if let Some(b) = cols.next() {
                    self.remaining -= 1;
                    return Some((a.clone(), b));
                }
            }
            let a = self.outer.next()?;
            let cols = self.head.take().unwrap_or_else(|| self.inner.clone());
            self.row = Some((a, cols.into_seq()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
