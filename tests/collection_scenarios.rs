//! End-to-end scenarios across Sequence, Mapping, Value and freezing.

mod common;

use tablekit::collections::{DeepMatch, Value};
use tablekit::{deep_merge, deepclone, freeze, is_array, is_frozen, merge, sequence, Error, Mapping, Sequence};

#[test]
fn test_to_sorted_returns_copy() {
    common::init_tracing();
    let original = sequence![5, 3, 1, 4, 2];
    let sorted = original.to_sorted().unwrap();
    assert_eq!(sorted.to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(original.to_vec(), vec![5, 3, 1, 4, 2]);
}

#[test]
fn test_additive_merge_of_nested_tables() {
    common::init_tracing();
    let mut target = Value::from_ron(r#"{"a": 1, "b": {"x": 1}}"#).unwrap();
    let source = Value::from_ron(r#"{"a": 2, "b": {"x": 3}}"#).unwrap();

    let merged = merge(&mut target, source, true).unwrap();
    let expected = Value::from_ron(r#"{"a": 3, "b": {"x": 4}}"#).unwrap();
    assert!(merged.deep_matches(&expected));
}

#[test]
fn test_deep_merge_overwrites_numbers() {
    let mut target = Value::from_ron(r#"{"a": 1, "b": {"x": 1, "keep": true}}"#).unwrap();
    let source = Value::from_ron(r#"{"a": 2, "b": {"x": 3}}"#).unwrap();
    deep_merge(&mut target, source).unwrap();

    let expected = Value::from_ron(r#"{"a": 2, "b": {"x": 3, "keep": true}}"#).unwrap();
    assert!(target.deep_matches(&expected));
}

#[test]
fn test_chunk_scenarios() {
    let s = sequence![1, 2, 3, 4, 5, 6];
    let pairs = s.chunk(2).unwrap();
    let shapes: Vec<Vec<i32>> = pairs.iter().map(Sequence::to_vec).collect();
    assert_eq!(shapes, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

    let fours = s.chunk(4).unwrap();
    let shapes: Vec<Vec<i32>> = fours.iter().map(Sequence::to_vec).collect();
    assert_eq!(shapes, vec![vec![1, 2, 3, 4], vec![5, 6]]);

    assert!(matches!(s.chunk(0), Err(Error::Validation(_))));
}

#[test]
fn test_rotate_scenarios() {
    let s = sequence!["a", "b", "c"];
    assert_eq!(s.rotate(1).to_vec(), vec!["c", "a", "b"]);
    assert_eq!(s.rotate(-1).to_vec(), vec!["b", "c", "a"]);
    assert_eq!(Sequence::<char>::new().rotate(3).len(), 0);
}

#[test]
fn test_ragged_zip() {
    let short = sequence![1, 2, 3];
    let long = sequence![1, 2, 3, 4, 5];
    let zipped = short.zip(&[&long]);
    assert_eq!(zipped.len(), 5);
    assert!(zipped.every(|row| row.len() == 2));
    assert_eq!(zipped.at(4).and_then(|row| row.at(1).cloned()), Some(None));
    assert_eq!(zipped.at(4).and_then(|row| row.at(2).cloned()), Some(Some(4)));
}

#[test]
fn test_freeze_blocks_writes_for_every_alias() {
    common::init_tracing();
    let inner = Value::from_items([1, 2]);
    let config = Value::from_pairs([("name", Value::from("sensor")), ("sizes", inner.clone())]);
    let alias = config.clone();

    let frozen = freeze(config);
    assert!(is_frozen(&frozen));
    assert!(is_frozen(&alias));
    assert_eq!(frozen.len(), 2);

    let err = alias.set("name", "other").unwrap_err();
    assert!(matches!(err, Error::ImmutabilityViolation { .. }));
    assert_eq!(frozen.get("name"), Value::from("sensor"));

    inner.set(3, 3).unwrap();
    assert_eq!(frozen.get("sizes").len(), 3);
    assert!(is_array(&frozen.get("sizes")));
    assert!(!is_array(&frozen));
}

#[test]
fn test_typed_freeze_and_deepclone() {
    let mapping: Mapping<String, Sequence<i32>> = [
        (String::from("evens"), sequence![2, 4]),
        (String::from("odds"), sequence![1, 3]),
    ]
    .into_iter()
    .collect();

    let view = freeze(mapping);
    assert!(is_frozen(&view));
    assert_eq!(view.get("evens").map(Sequence::len), Some(2));

    let mut copy = deepclone(&view.to_live());
    assert!(!is_frozen(&copy));
    if let Some(evens) = copy.get_mut("evens") {
        evens.push(6);
    }
    assert_eq!(view.get("evens").map(Sequence::len), Some(2));
    assert_eq!(copy.get("evens").map(Sequence::len), Some(3));
}

#[test]
fn test_group_by_on_random_fixture() {
    let s = common::random_ints(11, 200);
    let groups = s.group_by(|n| n.signum());
    let total: usize = groups.values().iter().map(Sequence::len).sum();
    assert_eq!(total, s.len());
    if let Some(negatives) = groups.get(&-1) {
        assert!(negatives.every(|n| *n < 0));
    }
}

#[test]
fn test_sort_of_mixed_values_fails_cleanly() {
    let list = Value::from_items([Value::from(2), Value::from("x"), Value::from(1)]);
    let mut items = Sequence::<Value>::try_from(&list).unwrap();
    let err = items.sort().unwrap_err();
    assert!(matches!(err, Error::OrderingFailure { .. }));
    assert_eq!(items.at(1), Some(&Value::from(2)));
    assert_eq!(items.at(2), Some(&Value::from("x")));
}
