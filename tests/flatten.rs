use ironfold::combiners::{Push, Sum};
use ironfold::testing::{assert_basesize_invariant, assert_collections_equal, init_tracing};
use ironfold::xform::{cat, map, reduce_if, tcat};
use ironfold::{collect, pipeline, Acc, Runner};

#[test]
fn tcat_is_outer_major_inner_minor() -> anyhow::Result<()> {
    init_tracing();
    let out = assert_basesize_invariant(4, |r| {
        r.collect(pipeline![map(|n: i64| 1..=n), tcat()], 1..=4i64)
    })?;
    assert_collections_equal(&out, &[1, 1, 2, 1, 2, 3, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn empty_inner_domains_contribute_nothing() -> anyhow::Result<()> {
    let with_empty = collect(pipeline![map(|n: i64| 1..=n), tcat()], 0..=3i64, 1)?;
    let without = collect(pipeline![map(|n: i64| 1..=n), tcat()], 1..=3i64, 1)?;
    assert_eq!(with_empty, without);
    assert_eq!(with_empty, vec![1, 1, 2, 1, 2, 3]);
    Ok(())
}

#[test]
fn tcat_reduces_large_inner_domains() -> anyhow::Result<()> {
    let expected: u64 = (0..60u64).map(|n| n * n.saturating_sub(1) / 2).sum();
    let total = assert_basesize_invariant(60, |r| {
        r.reduce(
            Sum::<u64>::new(),
            pipeline![map(|n: u64| 0..n), tcat()],
            0..60u64,
            0,
        )
    })?;
    assert_eq!(total.into_inner(), expected);
    Ok(())
}

#[test]
fn nested_depth_does_not_change_results() -> anyhow::Result<()> {
    let reference = Runner::sequential()
        .with_basesize(2)
        .collect(pipeline![map(|n: u32| 0..n), tcat()], 0..30u32)?;

    for depth in 0..3 {
        let runner = Runner::parallel().with_basesize(2).with_nested_depth(depth);
        let got = runner.collect(pipeline![map(|n: u32| 0..n), tcat()], 0..30u32)?;
        assert_eq!(got, reference, "nested depth {depth}");
    }
    Ok(())
}

#[test]
fn doubly_nested_tcat() -> anyhow::Result<()> {
    let xf = pipeline![
        map(|n: u32| 1..=n),
        tcat(),
        map(|m: u32| 0..m),
        tcat(),
    ];
    let got = Runner::parallel()
        .with_basesize(1)
        .with_nested_depth(1)
        .collect(xf, 1..=3u32)?;
    // n=1: m=1 -> [0]; n=2: m=1,2 -> [0],[0,1]; n=3: m=1,2,3 -> [0],[0,1],[0,1,2]
    assert_collections_equal(&got, &[0, 0, 0, 1, 0, 0, 1, 0, 1, 2]);
    Ok(())
}

#[test]
fn short_circuit_inside_an_inner_domain_ends_the_job() -> anyhow::Result<()> {
    let out = assert_basesize_invariant(10, |r| {
        r.reduce(
            Push,
            pipeline![map(|n: i64| 1..=n), tcat(), reduce_if(|x: &i64| *x == 3)],
            1..=10i64,
            Vec::new(),
        )
    })?;
    assert_eq!(out, Acc::Reduced(vec![1, 1, 2, 1, 2, 3]));
    Ok(())
}

#[test]
fn cat_splices_iterables() -> anyhow::Result<()> {
    let got = collect(
        pipeline![map(|n: u32| vec![n; n as usize]), cat()],
        0..4u32,
        2,
    )?;
    assert_collections_equal(&got, &[1, 2, 2, 3, 3, 3]);
    Ok(())
}
