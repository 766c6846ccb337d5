use std::collections::VecDeque;

use ironfold::domain::enumerate;
use ironfold::testing::{assert_basesize_invariant, assert_collections_equal};
use ironfold::xform::{filter, identity, map, reduce_if, scan};
use ironfold::{collect, copy_into, map_collect, pipeline, Runner};

#[test]
fn collect_even_numbers_in_order() -> anyhow::Result<()> {
    let evens = collect(filter(|x: &i64| x % 2 == 0), 1..=10i64, 2)?;
    assert_collections_equal(&evens, &[2, 4, 6, 8, 10]);
    Ok(())
}

#[test]
fn collect_is_basesize_invariant() -> anyhow::Result<()> {
    let words: Vec<String> = "the quick brown fox jumps over the lazy dog"
        .split(' ')
        .map(String::from)
        .collect();
    let out = assert_basesize_invariant(words.len(), |r| {
        r.collect(
            pipeline![filter(|w: &String| w.len() > 3), map(|w: String| w.to_uppercase())],
            words.clone(),
        )
    })?;
    let expected: Vec<String> = ["QUICK", "BROWN", "JUMPS", "OVER", "LAZY"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_collections_equal(&out, &expected);
    Ok(())
}

#[test]
fn collect_stops_after_the_match() -> anyhow::Result<()> {
    let out = collect(reduce_if(|x: &u32| *x == 4), 0..100u32, 3)?;
    assert_collections_equal(&out, &[0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn copy_into_columnar_pair() -> anyhow::Result<()> {
    let xf = map(|x: i64| (x, format!("#{x}")));
    let (nums, labels) = copy_into::<(Vec<i64>, Vec<String>), _, _>(xf, 1..=20i64, 2)?;

    let (want_nums, want_labels): (Vec<i64>, Vec<String>) =
        (1..=20i64).map(|x| (x, format!("#{x}"))).unzip();
    assert_eq!(nums, want_nums);
    assert_eq!(labels, want_labels);
    Ok(())
}

#[test]
fn copy_into_columnar_triple() -> anyhow::Result<()> {
    let xf = map(|(i, c): (usize, char)| (i, c, c.is_ascii_uppercase()));
    let (idx, chars, upper) = copy_into::<(Vec<usize>, Vec<char>, Vec<bool>), _, _>(
        xf,
        enumerate("aBcD".chars().collect::<Vec<_>>()),
        1,
    )?;
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert_eq!(chars, vec!['a', 'B', 'c', 'D']);
    assert_eq!(upper, vec![false, true, false, true]);
    Ok(())
}

#[test]
fn copy_into_string_and_deque() -> anyhow::Result<()> {
    let letters: Vec<char> = "hello, world".chars().collect();
    let shout: String = copy_into(map(|c: char| c.to_ascii_uppercase()), letters.clone(), 2)?;
    assert_eq!(shout, "HELLO, WORLD");

    let deque: VecDeque<u8> = Runner::sequential()
        .with_basesize(4)
        .copy_into(identity(), vec![3u8, 1, 4, 1, 5, 9, 2, 6])?;
    assert_eq!(deque, VecDeque::from(vec![3, 1, 4, 1, 5, 9, 2, 6]));
    Ok(())
}

#[test]
fn running_scan_within_one_leaf() -> anyhow::Result<()> {
    let out = Runner::sequential()
        .with_basesize(5)
        .collect(scan(0u64, |s: &u64, x: u64| s + x), 1..=5u64)?;
    assert_collections_equal(&out, &[1, 3, 6, 10, 15]);
    Ok(())
}

#[test]
fn map_collect_writes_every_slot_in_order() -> anyhow::Result<()> {
    let squares = map_collect(|x: u64| x * x, 0..1000u64, 7)?;
    let expected: Vec<u64> = (0..1000u64).map(|x| x * x).collect();
    assert_eq!(squares, expected);

    let out = assert_basesize_invariant(50, |r| r.map_collect(|x: u32| x + 1, 0..50u32))?;
    assert_eq!(out, (1..=50u32).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn map_collect_owned_items_and_empty_domain() -> anyhow::Result<()> {
    let words = vec!["a".to_string(), "bb".into(), "ccc".into(), String::new()];
    assert_eq!(map_collect(|s: String| s.len(), words, 1)?, vec![1, 2, 3, 0]);

    let none: Vec<u8> = map_collect(|x: u8| x, Vec::<u8>::new(), 4)?;
    assert!(none.is_empty());
    Ok(())
}
