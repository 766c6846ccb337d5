//! Error types raised by the engine itself.
//!
//! Caller failures (a step, merge, or finish hook returning an error) travel
//! as plain [`anyhow::Error`]s. The variants here mark conditions that the
//! engine detects on its own: a split routine asked to do the impossible, a
//! rejected [`Runner`](crate::Runner) configuration, or a broken internal
//! invariant. All of them convert into `anyhow::Error` and can be recovered
//! with `downcast_ref::<FoldError>()`.

use thiserror::Error;

/// Errors produced by the reduction engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoldError {
    /// A domain was asked to split where no valid split exists.
    #[error("cannot split {shape} domain of length {len}: {reason}")]
    Unsplittable {
        shape: &'static str,
        len: usize,
        reason: &'static str,
    },

    /// A domain holds more elements than a `usize` can count.
    #[error("{shape} domain is too long: its length does not fit in a usize")]
    LengthOverflow { shape: &'static str },

    /// The runner configuration was rejected before any work started.
    #[error("invalid runner configuration: {0}")]
    InvalidConfig(String),

    /// The dedicated thread pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// An engine invariant did not hold.
    #[error("internal engine error: {0}")]
    Internal(String),
}

impl FoldError {
    pub(crate) fn unsplittable(shape: &'static str, len: usize, reason: &'static str) -> Self {
        Self::Unsplittable { shape, len, reason }
    }

    pub(crate) fn length_overflow(shape: &'static str) -> Self {
        Self::LengthOverflow { shape }
    }
}
