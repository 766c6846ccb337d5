//! Index-tagged domains.

use std::iter;
use std::ops::RangeFrom;

use anyhow::Result;

use crate::domain::Domain;

/// Pairs each item with its position in the original, unsplit domain.
#[derive(Clone, Debug)]
pub struct Enumerate<D> {
    offset: usize,
    inner: D,
}

/// Tag every item of `inner` with its global index, starting at zero.
///
/// ```
/// use ironfold::domain::{enumerate, Domain};
///
/// let (_, right) = enumerate(vec!['a', 'b', 'c']).split().unwrap();
/// assert_eq!(right.into_seq().collect::<Vec<_>>(), vec![(2, 'c')]);
/// ```
pub fn enumerate<D>(inner: D) -> Enumerate<D> {
    Enumerate { offset: 0, inner }
}

impl<D: Domain> Domain for Enumerate<D> {
    type Item = (usize, D::Item);
    type IntoIter = iter::Zip<RangeFrom<usize>, D::IntoIter>;
    const SHAPE: &'static str = "enumerate";

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn checked_len(&self) -> Result<usize> {
        self.inner.checked_len()
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let (l, r) = self.inner.split_at(mid)?;
        let right_offset = self.offset + l.len();
        Ok((
            Enumerate {
                offset: self.offset,
                inner: l,
            },
            Enumerate {
                offset: right_offset,
                inner: r,
            },
        ))
    }

    fn split(self) -> Result<(Self, Self)> {
        let (l, r) = self.inner.split()?;
        let right_offset = self.offset + l.len();
        Ok((
            Enumerate {
                offset: self.offset,
                inner: l,
            },
            Enumerate {
                offset: right_offset,
                inner: r,
            },
        ))
    }

    fn into_seq(self) -> Self::IntoIter {
        (self.offset..).zip(self.inner.into_seq())
    }
}
