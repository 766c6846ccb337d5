use anyhow::bail;
use ironfold::combiners::{binary, fold_fn, try_fold_fn, CombineFnExt, Count, Max, Min, Sum};
use ironfold::domain::{materialize, product, zip};
use ironfold::testing::{assert_basesize_invariant, init_tracing};
use ironfold::xform::{filter, identity, map};
use ironfold::{pipeline, reduce, Acc, Runner};

#[test]
fn sum_does_not_depend_on_basesize() -> anyhow::Result<()> {
    init_tracing();
    let total = assert_basesize_invariant(100, |r| {
        r.reduce(Sum::<u64>::new(), identity(), 1..=100u64, 0)
    })?;
    assert_eq!(total, Acc::Continue(5050));
    Ok(())
}

#[test]
fn non_commutative_merge_keeps_domain_order() -> anyhow::Result<()> {
    let digits = assert_basesize_invariant(12, |r| {
        let op = fold_fn(
            |mut acc: String, x: u32| {
                acc.push_str(&x.to_string());
                acc
            },
            |mut a: String, b: String| {
                a.push_str(&b);
                a
            },
        );
        r.reduce(op, identity(), 0..12u32, String::new())
    })?;
    assert_eq!(digits.into_inner(), "01234567891011");
    Ok(())
}

#[test]
fn min_max_count_over_vec() -> anyhow::Result<()> {
    let data = vec![7, -3, 12, 0, 5, 12, -8, 4, 9];

    let lo = assert_basesize_invariant(data.len(), |r| {
        r.reduce(Min::<i32>::new(), identity(), data.clone(), None)
    })?;
    let hi = assert_basesize_invariant(data.len(), |r| {
        r.reduce(Max::<i32>::new(), identity(), data.clone(), None)
    })?;
    assert_eq!(lo.into_inner(), Some(-8));
    assert_eq!(hi.into_inner(), Some(12));

    let thirds = reduce(Count, filter(|x: &u32| x % 3 == 0), 0..1000u32, 0, 16)?;
    assert_eq!(thirds.into_inner(), 334);
    Ok(())
}

#[test]
fn product_and_zip_domains() -> anyhow::Result<()> {
    let grid = assert_basesize_invariant(9, |r| {
        r.reduce(
            Sum::<i64>::new(),
            map(|(a, b): (i64, i64)| a * b),
            product(1..=3i64, 1..=3i64),
            0,
        )
    })?;
    assert_eq!(grid.into_inner(), 36);

    let dot = assert_basesize_invariant(5, |r| {
        r.reduce(
            Sum::<i64>::new(),
            map(|(a, b): (i64, i64)| a * b),
            zip(1..=5i64, 1..=5i64),
            0,
        )
    })?;
    assert_eq!(dot.into_inner(), 55);
    Ok(())
}

#[test]
fn materialized_source_reduces_like_a_range() -> anyhow::Result<()> {
    let source = "ironfold".chars().map(|c| c as u32);
    let buffer = materialize(source);
    let expected: u32 = "ironfold".chars().map(|c| c as u32).sum();

    let total = assert_basesize_invariant(8, |r| {
        r.reduce(Sum::<u32>::new(), identity(), buffer.clone(), 0)
    })?;
    assert_eq!(total.into_inner(), expected);
    Ok(())
}

#[test]
fn empty_domain_returns_completed_init() -> anyhow::Result<()> {
    let out = reduce(Sum::<u64>::new(), identity(), 0..0u64, 0, 4)?;
    assert_eq!(out, Acc::Continue(0));

    let op = binary(|a: i64, b: i64| a + b).completing(|x: i64| Ok(x + 1));
    let out = reduce(op, identity(), Vec::<i64>::new(), 0, 4)?;
    assert_eq!(out, Acc::Continue(1));
    Ok(())
}

#[test]
fn finish_hook_runs_once_on_the_final_value() -> anyhow::Result<()> {
    let op = binary(|a: u64, b: u64| a + b).completing(|x: u64| Ok(x * 10));
    let xf = pipeline![filter(|x: &u64| x % 2 == 1), map(|x: u64| x * x)];
    let out = Runner::parallel().with_basesize(3).reduce(op, xf, 1..=9u64, 0)?;
    assert_eq!(out, Acc::Continue((1 + 9 + 25 + 49 + 81) * 10));
    Ok(())
}

#[test]
fn finish_hook_error_reaches_the_caller() {
    let op = Sum::<u64>::new().completing(|x: u64| {
        if x > 10 {
            bail!("total {x} too large");
        }
        Ok(x)
    });
    let err = reduce(op, identity(), 1..=10u64, 0, 2).unwrap_err();
    assert_eq!(err.to_string(), "total 55 too large");
}

#[test]
fn leftmost_step_error_wins() {
    let op = try_fold_fn(
        |acc: u64, x: u64| {
            if x % 10 == 0 {
                bail!("bad item {x}");
            }
            Ok(Acc::Continue(acc + x))
        },
        |a: u64, b: u64| Ok(Acc::Continue(a + b)),
    );
    for basesize in 1..=12 {
        for runner in [Runner::sequential(), Runner::parallel()] {
            let err = runner
                .with_basesize(basesize)
                .reduce(op, identity(), 1..=100u64, 0)
                .unwrap_err();
            assert_eq!(err.to_string(), "bad item 10", "basesize {basesize}");
        }
    }
}
