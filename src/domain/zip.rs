//! Lockstep pairs of two domains.

use std::iter;

use anyhow::Result;

use crate::domain::Domain;
use crate::error::FoldError;

/// Pairs the `i`-th items of two domains; as long as the shorter one.
#[derive(Clone, Debug)]
pub struct Zip<A, B> {
    a: A,
    b: B,
}

/// Zip two domains.
///
/// Unequal lengths are not truncated up front: both sides are always cut at
/// the same index, and the surplus of the longer side ends up in the right
/// half, where the sequential iterator drops it.
pub fn zip<A, B>(a: A, b: B) -> Zip<A, B> {
    Zip { a, b }
}

impl<A: Domain, B: Domain> Domain for Zip<A, B> {
    type Item = (A::Item, B::Item);
    type IntoIter = iter::Zip<A::IntoIter, B::IntoIter>;
    const SHAPE: &'static str = "zip";

    fn len(&self) -> usize {
        self.a.len().min(self.b.len())
    }

    /// Fits whenever either side does.
    fn checked_len(&self) -> Result<usize> {
        match (self.a.checked_len(), self.b.checked_len()) {
            (Ok(a), Ok(b)) => Ok(a.min(b)),
            (Ok(n), Err(_)) | (Err(_), Ok(n)) => Ok(n),
            (Err(e), Err(_)) => Err(e),
        }
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let len = self.len();
        if mid > len {
            return Err(
                FoldError::unsplittable(Self::SHAPE, len, "split index past the end").into(),
            );
        }
        let (al, ar) = self.a.split_at(mid)?;
        let (bl, br) = self.b.split_at(mid)?;
        Ok((zip(al, bl), zip(ar, br)))
    }

    fn into_seq(self) -> Self::IntoIter {
        self.a.into_seq().zip(self.b.into_seq())
    }
}
