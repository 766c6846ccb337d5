use ironfold::combiners::Sum;
use ironfold::xform::{identity, map};
use ironfold::{map_collect, reduce, Acc, ExecMode, FoldError, Runner};

#[test]
fn zero_basesize_is_rejected() {
    let err = reduce(Sum::<u64>::new(), identity(), 0..10u64, 0, 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FoldError>(),
        Some(FoldError::InvalidConfig(_))
    ));

    let err = map_collect(|x: u64| x, 0..10u64, 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FoldError>(),
        Some(FoldError::InvalidConfig(_))
    ));
}

#[test]
fn runner_json_round_trip() -> anyhow::Result<()> {
    let runner = Runner::parallel()
        .with_threads(3)
        .with_basesize(128)
        .with_nested_depth(1);
    let json = serde_json::to_string(&runner)?;
    let back = Runner::from_json(&json)?;
    assert_eq!(back, runner);
    Ok(())
}

#[test]
fn runner_json_defaults_and_validation() -> anyhow::Result<()> {
    let r = Runner::from_json("{}")?;
    assert_eq!(r, Runner::default());
    assert_eq!(r.mode, ExecMode::Parallel { threads: None });
    assert!(r.default_partitions >= 4);

    let err = Runner::from_json(r#"{ "basesize": 0 }"#).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FoldError>(),
        Some(FoldError::InvalidConfig(_))
    ));

    assert!(Runner::from_json(r#"{ "mode": "Sideways" }"#).is_err());
    Ok(())
}

#[test]
fn dedicated_pool_gives_the_same_answer() -> anyhow::Result<()> {
    let xf = map(|x: u64| x * 3);
    let pooled = Runner::parallel()
        .with_threads(2)
        .with_basesize(5)
        .reduce(Sum::<u64>::new(), xf, 1..=100u64, 0)?;
    assert_eq!(pooled, Acc::Continue(15_150));

    let squares = Runner::parallel()
        .with_threads(2)
        .with_basesize(3)
        .map_collect(|x: u32| x * x, 0..10u32)?;
    assert_eq!(squares, vec![0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
    Ok(())
}

#[test]
fn zero_threads_is_rejected() {
    let err = Runner::parallel()
        .with_threads(0)
        .reduce(Sum::<u64>::new(), identity(), 0..10u64, 0)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FoldError>(),
        Some(FoldError::InvalidConfig(_))
    ));
}

#[test]
fn derived_basesize_matches_explicit_results() -> anyhow::Result<()> {
    let derived = Runner::default().reduce(Sum::<u64>::new(), identity(), 0..10_000u64, 0)?;
    let explicit = Runner::sequential()
        .with_basesize(10_000)
        .reduce(Sum::<u64>::new(), identity(), 0..10_000u64, 0)?;
    assert_eq!(derived, explicit);
    Ok(())
}
