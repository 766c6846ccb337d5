//! Vectors and slices as domains.

use std::slice;
use std::vec;

use anyhow::Result;

use crate::domain::Domain;
use crate::error::FoldError;

impl<T: Send> Domain for Vec<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;
    const SHAPE: &'static str = "vec";

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn split_at(mut self, mid: usize) -> Result<(Self, Self)> {
        let len = Vec::len(&self);
        if mid > len {
            return Err(
                FoldError::unsplittable(Self::SHAPE, len, "split index past the end").into(),
            );
        }
        let right = self.split_off(mid);
        Ok((self, right))
    }

    fn into_seq(self) -> Self::IntoIter {
        self.into_iter()
    }
}

impl<'a, T: Sync> Domain for &'a [T] {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    const SHAPE: &'static str = "slice";

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let len = <[T]>::len(self);
        <[T]>::split_at_checked(self, mid).ok_or_else(|| {
            FoldError::unsplittable(Self::SHAPE, len, "split index past the end").into()
        })
    }

    fn into_seq(self) -> Self::IntoIter {
        self.iter()
    }
}
