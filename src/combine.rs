//! The associative combine rule.
//!
//! Partial results from adjacent subdomains are merged left-then-right,
//! whatever order their tasks finished in. A short-circuited side is an
//! absorbing element:
//!
//! 1. a reduced `left` is returned as is, and `right` is never inspected;
//! 2. a reduced `right` absorbs the non-reduced `left` through the merge
//!    function and stays reduced;
//! 3. otherwise the merge function decides, and may itself short-circuit.
//!
//! Rule 2 keeps the reduced side's tag and lets the merge function see
//! everything that came before it, so a parallel job that stops early returns
//! what a left-to-right fold stopping at the same item would. For selection
//! merges such as [`Right`](crate::combiners::Right) it returns the right
//! value unchanged.

use anyhow::Result;

use crate::reduced::Acc;

/// Merge two adjacent partial results with `f`.
///
/// When only `right` is reduced, the result is `Reduced(f(l, r))`, not
/// `right` returned as is. An accumulating merge (a sum or a push under
/// [`reduce_if`](crate::xform::reduce_if)) then keeps the items left of the
/// match, matching a sequential fold that stops there. A merge that keeps
/// its right operand, such as [`Right`](crate::combiners::Right), gives back
/// `right` unchanged. If `f` itself short-circuits, the tag is kept.
///
/// ```
/// use ironfold::combine::merge;
/// use ironfold::Acc;
///
/// # fn main() -> anyhow::Result<()> {
/// let sum = |a: u32, b: u32| Ok(Acc::Continue(a + b));
/// assert_eq!(merge(Acc::Continue(3), Acc::Reduced(4), sum)?, Acc::Reduced(7));
/// assert_eq!(merge(Acc::Reduced(3), Acc::Continue(4), sum)?, Acc::Reduced(3));
/// # Ok(())
/// # }
/// ```
pub fn merge<A, F>(left: Acc<A>, right: Acc<A>, f: F) -> Result<Acc<A>>
where
    F: FnOnce(A, A) -> Result<Acc<A>>,
{
    match (left, right) {
        (left @ Acc::Reduced(_), _) => Ok(left),
        (Acc::Continue(l), Acc::Reduced(r)) => Ok(f(l, r)?.into_reduced()),
        (Acc::Continue(l), Acc::Continue(r)) => f(l, r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: i32, b: i32) -> Result<Acc<i32>> {
        Ok(Acc::Continue(a + b))
    }

    #[test]
    fn reduced_left_wins_without_calling_merge() -> Result<()> {
        let out = merge(Acc::Reduced(1), Acc::Continue(2), |_, _| anyhow::bail!("merge ran"))?;
        assert_eq!(out, Acc::Reduced(1));
        Ok(())
    }

    #[test]
    fn reduced_right_absorbs_left() -> Result<()> {
        assert_eq!(merge(Acc::Continue(1), Acc::Reduced(2), add)?, Acc::Reduced(3));
        let keep_right = |_: i32, b: i32| -> Result<Acc<i32>> { Ok(Acc::Continue(b)) };
        assert_eq!(merge(Acc::Continue(1), Acc::Reduced(2), keep_right)?, Acc::Reduced(2));
        Ok(())
    }

    #[test]
    fn merge_function_may_short_circuit() -> Result<()> {
        let capped = |a: i32, b: i32| {
            let s = a + b;
            Ok(if s >= 10 { Acc::Reduced(s) } else { Acc::Continue(s) })
        };
        assert_eq!(merge(Acc::Continue(4), Acc::Continue(5), capped)?, Acc::Continue(9));
        assert_eq!(merge(Acc::Continue(4), Acc::Continue(6), capped)?, Acc::Reduced(10));
        Ok(())
    }
}
