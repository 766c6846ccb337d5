use anyhow::bail;
use ironfold::combiners::{binary_until, CombineFnExt, Right, Sum};
use ironfold::domain::{Domain, Progress};
use ironfold::testing::init_tracing;
use ironfold::xform::{identity, map, reduce_if};
use ironfold::{pipeline, reduce, Acc, Runner};
use proptest::prelude::*;

#[test]
fn first_match_for_every_needle_and_length() -> anyhow::Result<()> {
    init_tracing();
    for needle in 1..=20i64 {
        for len in 1..=20i64 {
            let expected = if needle <= len {
                Acc::Reduced(needle)
            } else {
                Acc::Continue(len)
            };
            for basesize in 1..=len as usize {
                for runner in [Runner::sequential(), Runner::parallel()] {
                    let got = runner.with_basesize(basesize).reduce(
                        Right,
                        reduce_if(move |x: &i64| *x >= needle),
                        1..=len,
                        0,
                    )?;
                    assert_eq!(
                        got, expected,
                        "needle {needle}, len {len}, basesize {basesize}, {:?}",
                        runner.mode
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn short_circuit_skips_the_finish_hook() -> anyhow::Result<()> {
    let data = vec![None, None, Some(1), None, Some(2), Some(3), None];
    for basesize in 1..=8 {
        for runner in [Runner::sequential(), Runner::parallel()] {
            let first_some = binary_until(|a: Option<i64>, b: Option<i64>| match a.or(b) {
                Some(x) => Acc::Reduced(Some(x)),
                None => Acc::Continue(None),
            })
            .completing(|_: Option<i64>| bail!("finish ran on a short-circuited result"));

            let got = runner
                .with_basesize(basesize)
                .reduce(first_some, identity(), data.clone(), None)?;
            assert_eq!(got, Acc::Reduced(Some(1)), "basesize {basesize}");
        }
    }
    Ok(())
}

#[test]
fn short_circuit_keeps_everything_before_the_match() -> anyhow::Result<()> {
    let xf = pipeline![map(|x: u64| x * 2), reduce_if(|x: &u64| *x >= 40)];
    let got = reduce(Sum::<u64>::new(), xf, 1..=1000u64, 0, 7)?;
    // 2 + 4 + ... + 40
    assert_eq!(got, Acc::Reduced(420));
    Ok(())
}

#[test]
fn sequential_mode_never_reads_past_the_match() -> anyhow::Result<()> {
    let (domain, progress) = Progress::new(0..1000u64);
    let got = Runner::sequential().with_basesize(10).reduce(
        Right,
        reduce_if(|x: &u64| *x == 3),
        domain,
        0,
    )?;
    assert_eq!(got, Acc::Reduced(3));
    assert_eq!(progress.seen(), 4);
    assert!(!progress.is_done());
    Ok(())
}

#[test]
fn parallel_mode_reads_at_most_the_whole_domain() -> anyhow::Result<()> {
    let (domain, progress) = Progress::new(0..10_000u64);
    let len = Domain::len(&domain);
    let got = reduce(Right, reduce_if(|x: &u64| *x == 5), domain, 0, 16)?;
    assert_eq!(got, Acc::Reduced(5));
    assert!(progress.seen() >= 6);
    assert!(progress.seen() <= len);
    Ok(())
}

#[test]
fn parallel_mode_skips_subtrees_after_the_match() -> anyhow::Result<()> {
    // One worker runs every join's left half before its right half, so each
    // right sibling sees its cancel token already tripped.
    let (domain, progress) = Progress::new(0..10_000u64);
    let got = Runner::parallel().with_threads(1).with_basesize(16).reduce(
        Right,
        reduce_if(|x: &u64| *x == 5),
        domain,
        0,
    )?;
    assert_eq!(got, Acc::Reduced(5));
    assert_eq!(progress.seen(), 6);
    Ok(())
}

/// Left fold that stops after the first item `>= needle`, for reference.
fn sequential_sum_until(data: &[u32], needle: u32) -> Acc<u64> {
    let mut acc = 0u64;
    for &x in data {
        acc += u64::from(x);
        if x >= needle {
            return Acc::Reduced(acc);
        }
    }
    Acc::Continue(acc)
}

proptest! {
    /// Property: a short-circuiting parallel sum equals the sequential fold
    #[test]
    fn parallel_sum_until_matches_sequential_fold(
        data in prop::collection::vec(0u32..100, 0..200),
        needle in 0u32..120,
        basesize in 1usize..32,
    ) {
        let expected = sequential_sum_until(&data, needle);
        let xf = pipeline![reduce_if(move |x: &u32| *x >= needle), map(|x: u32| u64::from(x))];
        let got = reduce(Sum::<u64>::new(), xf, data, 0, basesize).unwrap();
        prop_assert_eq!(got, expected);
    }

    /// Property: the first match is found whatever the basesize
    #[test]
    fn right_with_reduce_if_finds_first_match(
        data in prop::collection::vec(0u32..50, 1..150),
        needle in 0u32..60,
        basesize in 1usize..20,
    ) {
        let expected = match data.iter().position(|&x| x >= needle) {
            Some(i) => Acc::Reduced(data[i]),
            None => Acc::Continue(data[data.len() - 1]),
        };
        let got = Runner::parallel()
            .with_basesize(basesize)
            .reduce(Right, reduce_if(move |x: &u32| *x >= needle), data, 0)
            .unwrap();
        prop_assert_eq!(got, expected);
    }
}
