//! Basic combiners: Sum, Min, Max, Count, Right, Push

use std::cmp::{max, min};
use std::marker::PhantomData;
use std::ops::Add;

use anyhow::Result;

use crate::combiners::CombineFn;
use crate::reduced::Acc;

/* ===================== Sum<T> ===================== */

/// Sum of all items.
///
/// - Accumulator: `T`, identity `T::default()`
///
/// Requires `T: Add<Output=T>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<T>);
impl<T> Sum<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, T> for Sum<T>
where
    T: Add<Output = T> + Send + Sync,
{
    fn add_input(&self, acc: T, v: T) -> Result<Acc<T>> {
        Ok(Acc::Continue(acc + v))
    }

    fn merge(&self, acc: T, other: T) -> Result<Acc<T>> {
        Ok(Acc::Continue(acc + other))
    }
}

/* ===================== Min<T> ===================== */

/// Minimum item (requires `Ord`).
///
/// - Accumulator: `Option<T>`, identity `None`
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(pub PhantomData<T>);
impl<T> Min<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<Option<T>, T> for Min<T>
where
    T: Ord + Send + Sync,
{
    fn add_input(&self, acc: Option<T>, v: T) -> Result<Acc<Option<T>>> {
        Ok(Acc::Continue(Some(match acc {
            Some(cur) => min(cur, v),
            None => v,
        })))
    }

    fn merge(&self, acc: Option<T>, other: Option<T>) -> Result<Acc<Option<T>>> {
        Ok(Acc::Continue(match (acc, other) {
            (Some(a), Some(b)) => Some(min(a, b)),
            (a, None) => a,
            (None, b) => b,
        }))
    }
}

/* ===================== Max<T> ===================== */

/// Maximum item (requires `Ord`).
///
/// - Accumulator: `Option<T>`, identity `None`
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(pub PhantomData<T>);
impl<T> Max<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<Option<T>, T> for Max<T>
where
    T: Ord + Send + Sync,
{
    fn add_input(&self, acc: Option<T>, v: T) -> Result<Acc<Option<T>>> {
        Ok(Acc::Continue(Some(match acc {
            Some(cur) => max(cur, v),
            None => v,
        })))
    }

    fn merge(&self, acc: Option<T>, other: Option<T>) -> Result<Acc<Option<T>>> {
        Ok(Acc::Continue(match (acc, other) {
            (Some(a), Some(b)) => Some(max(a, b)),
            (a, None) => a,
            (None, b) => b,
        }))
    }
}

/* ===================== Count ===================== */

/// Number of items.
///
/// - Accumulator: `u64`, identity `0`
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<T> CombineFn<u64, T> for Count {
    fn add_input(&self, acc: u64, _v: T) -> Result<Acc<u64>> {
        Ok(Acc::Continue(acc + 1))
    }

    fn merge(&self, acc: u64, other: u64) -> Result<Acc<u64>> {
        Ok(Acc::Continue(acc + other))
    }
}

/* ===================== Right ===================== */

/// Keeps the rightmost value seen.
///
/// Paired with [`reduce_if`](crate::xform::reduce_if) this returns the first
/// matching item: the matching leaf short-circuits, and the combiner lets the
/// leftmost short-circuited side win.
#[derive(Clone, Copy, Debug, Default)]
pub struct Right;

impl<T: Send + Sync> CombineFn<T, T> for Right {
    fn add_input(&self, _acc: T, v: T) -> Result<Acc<T>> {
        Ok(Acc::Continue(v))
    }

    fn merge(&self, _acc: T, other: T) -> Result<Acc<T>> {
        Ok(Acc::Continue(other))
    }
}

/* ===================== Push ===================== */

/// Ordered collection into a `Vec`.
///
/// - Accumulator: `Vec<T>`, identity `Vec::new()`
#[derive(Clone, Copy, Debug, Default)]
pub struct Push;

impl<T: Send> CombineFn<Vec<T>, T> for Push {
    fn add_input(&self, mut acc: Vec<T>, v: T) -> Result<Acc<Vec<T>>> {
        acc.push(v);
        Ok(Acc::Continue(acc))
    }

    fn merge(&self, mut acc: Vec<T>, mut other: Vec<T>) -> Result<Acc<Vec<T>>> {
        if acc.is_empty() {
            return Ok(Acc::Continue(other));
        }
        acc.append(&mut other);
        Ok(Acc::Continue(acc))
    }
}
