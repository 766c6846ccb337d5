//! Integer ranges as domains.
//!
//! `Range<T>` and `RangeInclusive<T>` split arithmetically at the midpoint.
//! An inclusive range cannot represent an empty half without a sentinel, so it
//! only accepts cuts strictly inside `1..len`; the scheduler never asks for
//! anything else.
//!
//! Lengths are computed in the unsigned counterpart of `T`, so full-width
//! ranges such as `i32::MIN..i32::MAX` split without overflow. A range with
//! more elements than a `usize` can count (`0..=u64::MAX`) reports
//! [`FoldError::LengthOverflow`] from [`Domain::checked_len`].

use std::ops::{Range, RangeInclusive};

use anyhow::Result;

use crate::domain::Domain;
use crate::error::FoldError;

macro_rules! range_domains {
    ($($t:ty),* $(,)?) => {$(
        impl Domain for Range<$t> {
            type Item = $t;
            type IntoIter = Range<$t>;
            const SHAPE: &'static str = "range";

            fn len(&self) -> usize {
                self.checked_len().unwrap_or(usize::MAX)
            }

            fn checked_len(&self) -> Result<usize> {
                if self.end <= self.start {
                    return Ok(0);
                }
                usize::try_from(self.end.abs_diff(self.start))
                    .map_err(|_| FoldError::length_overflow(Self::SHAPE).into())
            }

            fn split_at(self, mid: usize) -> Result<(Self, Self)> {
                let len = Domain::len(&self);
                if mid > len {
                    return Err(FoldError::unsplittable(
                        Self::SHAPE,
                        len,
                        "split index past the end",
                    )
                    .into());
                }
                if len == 0 {
                    return Ok((self.clone(), self));
                }
                // Exact in two's complement: the pivot lies inside the range.
                let pivot = self.start.wrapping_add(mid as $t);
                Ok((self.start..pivot, pivot..self.end))
            }

            fn into_seq(self) -> Self::IntoIter {
                self
            }
        }

        impl Domain for RangeInclusive<$t> {
            type Item = $t;
            type IntoIter = RangeInclusive<$t>;
            const SHAPE: &'static str = "inclusive range";

            fn len(&self) -> usize {
                self.checked_len().unwrap_or(usize::MAX)
            }

            fn checked_len(&self) -> Result<usize> {
                if RangeInclusive::is_empty(self) {
                    return Ok(0);
                }
                usize::try_from(self.end().abs_diff(*self.start()))
                    .ok()
                    .and_then(|n| n.checked_add(1))
                    .ok_or_else(|| FoldError::length_overflow(Self::SHAPE).into())
            }

            fn split_at(self, mid: usize) -> Result<(Self, Self)> {
                let len = Domain::len(&self);
                if mid == 0 || mid >= len {
                    return Err(FoldError::unsplittable(
                        Self::SHAPE,
                        len,
                        "inclusive ranges only split into two non-empty halves",
                    )
                    .into());
                }
                let (start, end) = self.into_inner();
                let pivot = start.wrapping_add(mid as $t);
                Ok((start..=pivot - 1, pivot..=end))
            }

            fn into_seq(self) -> Self::IntoIter {
                self
            }
        }
    )*};
}

range_domains!(i32, i64, u32, u64, usize);
