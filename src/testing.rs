//! Testing utilities for ironfold jobs.
//!
//! - [`init_tracing`]: route `tracing` output to the test harness
//! - [`assert_collections_equal`]: order-dependent comparison with a readable
//!   diff
//! - [`assert_basesize_invariant`]: run one job under every basesize and both
//!   execution modes and check they all agree
//!
//! # Example
//!
//! ```
//! use ironfold::testing::*;
//! use ironfold::xform::map;
//!
//! # fn main() -> anyhow::Result<()> {
//! init_tracing();
//! let out = assert_basesize_invariant(9, |r| r.collect(map(|x: u32| x * 2), 0..9u32))?;
//! assert_collections_equal(&out, &[0, 2, 4, 6, 8, 10, 12, 14, 16]);
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::runner::Runner;

/// Install a fmt subscriber writing through the test harness.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Safe to call from
/// every test: only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironfold::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  \
         Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  \
             Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Run `job` with every basesize from 1 to `len` (and one past it), in both
/// sequential and parallel mode, and assert all results are equal.
///
/// The reference is a single-leaf sequential run, i.e. a plain left fold.
/// Returns the reference result; errors from any run are propagated.
///
/// # Panics
///
/// Panics if any configuration disagrees with the reference.
pub fn assert_basesize_invariant<T, F>(len: usize, job: F) -> Result<T>
where
    T: Debug + PartialEq,
    F: Fn(&Runner) -> Result<T>,
{
    let reference = job(&Runner::sequential().with_basesize(len.max(1)))?;
    for basesize in 1..=len + 1 {
        for runner in [Runner::sequential(), Runner::parallel()] {
            let runner = runner.with_basesize(basesize);
            let got = job(&runner)?;
            assert_eq!(
                got, reference,
                "result depends on the configuration:\n  Mode: {:?}\n  Basesize: {basesize}\n  \
                 Reference (single leaf): {reference:?}\n  Actual: {got:?}",
                runner.mode
            );
        }
    }
    Ok(reference)
}
