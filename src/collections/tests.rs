//! Tests for Mapping, Shared, freezing and Value

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::Error;
    use crate::sequence;

    fn scores() -> Mapping<&'static str, i32> {
        [("ann", 3), ("bob", 7), ("cy", 7)].into_iter().collect()
    }

    // ------------------------------------------------------------------
    // Mapping
    // ------------------------------------------------------------------

    #[test]
    fn test_mapping_size_and_absent_mapping() {
        let m = scores();
        assert_eq!(m.size(), 3);
        assert_eq!(size(Some(&m)), 3);
        assert_eq!(size::<&str, i32>(None), 0);
    }

    #[test]
    fn test_mapping_projection() {
        let m = scores();
        let mut keys = m.keys().to_vec();
        keys.sort();
        assert_eq!(keys, vec!["ann", "bob", "cy"]);

        assert_eq!(m.pick(&["ann", "zed"]).size(), 1);
        let rest = m.omit(&["ann", "zed"]);
        assert_eq!(rest.size(), 2);
        assert!(!rest.contains_key("ann"));
    }

    #[test]
    fn test_mapping_functional_helpers() {
        let m = scores();
        assert_eq!(m.filter(|_, v| *v > 5).size(), 2);
        assert_eq!(m.map(|_, v| v * 10).get("bob"), Some(&70));
        assert_eq!(m.reduce(0, |acc, _, v| acc + v), 17);
        assert!(m.some(|_, v| *v == 3));
        assert!(m.every(|_, v| *v > 0));
        assert_eq!(m.find(|k, _| k.starts_with('c')), Some((&"cy", &7)));
        assert!(m.contains(&7));
        assert!(!m.contains(&8));
    }

    #[test]
    fn test_mapping_group_by_and_invert() {
        let m = scores();
        let groups = m.group_by(|_, v| *v > 5);
        assert_eq!(groups.get(&true).map(Sequence::len), Some(2));
        assert_eq!(groups.get(&false).map(Sequence::len), Some(1));

        let inverted = m.invert();
        assert_eq!(inverted.size(), 2);
        assert_eq!(inverted.get(&3), Some(&"ann"));
        assert!(inverted.get(&7).is_some_and(|k| *k == "bob" || *k == "cy"));
    }

    #[test]
    fn test_mapping_entries_round_trip() {
        let m = scores();
        let rebuilt = Mapping::from_entries(m.entries());
        assert_eq!(rebuilt, m);
    }

    #[test]
    fn test_mapping_deep_merge_of_nested_mappings() {
        let mut target: Mapping<&str, Mapping<&str, i32>> = Mapping::new();
        target.insert("b", [("x", 1)].into_iter().collect());

        let mut source: Mapping<&str, Mapping<&str, i32>> = Mapping::new();
        source.insert("b", [("x", 3), ("y", 1)].into_iter().collect());
        source.insert("c", Mapping::new());

        crate::merge(&mut target, source, true).unwrap();
        assert_eq!(target.get("b").and_then(|b| b.get("x")), Some(&4));
        assert_eq!(target.get("b").and_then(|b| b.get("y")), Some(&1));
        assert!(target.contains_key("c"));
    }

    #[test]
    fn test_mapping_deep_clone_shares_nothing() {
        let inner = Shared::new(sequence![1, 2]);
        let mut outer: Mapping<&str, Shared<Sequence<i32>>> = Mapping::new();
        outer.insert("inner", inner.clone());

        let copy = crate::deepclone(&outer);
        assert!(crate::matches(&copy, &outer));
        inner.write(|s| s.push(3)).unwrap();
        assert!(!crate::matches(&copy, &outer));
        assert_eq!(copy.get("inner").map(Shared::len), Some(2));
    }

    // ------------------------------------------------------------------
    // Freezing
    // ------------------------------------------------------------------

    #[test]
    fn test_frozen_view_reads_only() {
        let view = crate::freeze(scores());
        assert!(crate::is_frozen(&view));
        assert_eq!(view.get("bob"), Some(&7));
        assert_eq!(view.size(), 3);
        assert_eq!(view.entry_count(), 3);

        let refrozen = crate::freeze(view.clone());
        assert!(refrozen.is_frozen());

        let mut live = view.to_live();
        live.insert("dee", 1);
        assert!(!crate::is_frozen(&live));
        assert_eq!(view.size(), 3);
    }

    #[test]
    fn test_shared_freeze_is_visible_through_aliases() {
        let handle = Shared::new(sequence![1, 2, 3]);
        let alias = handle.clone();
        assert!(handle.ptr_eq(&alias));

        alias.freeze();
        assert!(handle.is_frozen());
        let err = handle.write(|s| s.push(4)).unwrap_err();
        assert!(matches!(err, Error::ImmutabilityViolation { kind: "sequence" }));
        assert_eq!(handle.len(), 3);

        handle.freeze();
        assert!(handle.is_frozen());
    }

    #[test]
    fn test_freeze_is_shallow() {
        let inner = Value::list();
        let outer = Value::from_pairs([("inner", inner.clone())]);
        outer.freeze();

        inner.set(1, "still writable").unwrap();
        assert_eq!(outer.get("inner").get(1), Value::from("still writable"));
        assert!(outer.set("other", 1).is_err());
        assert!(!outer.get("inner").is_frozen());
    }

    // ------------------------------------------------------------------
    // Value
    // ------------------------------------------------------------------

    #[test]
    fn test_value_get_and_set() {
        let table = Value::table();
        table.set("a", 1).unwrap();
        table.set(2, "two").unwrap();
        assert_eq!(table.get("a"), Value::Int(1));
        assert_eq!(table.get(2), Value::from("two"));
        assert_eq!(table.get("missing"), Value::Nil);
        assert_eq!(table.len(), 2);

        table.set("a", Value::Nil).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_value_list_positions() {
        let list = Value::from_items([10, 20, 30]);
        assert!(list.is_array());
        assert_eq!(list.get(-1), Value::Int(30));
        assert_eq!(list.get("x"), Value::Nil);

        list.set(4, 40).unwrap();
        list.set(2, Value::Nil).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(2), Value::Int(30));

        let err = list.set("name", 1).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { got: "string" }));
        assert!(matches!(list.set(9, 1), Err(Error::Validation(_))));
        assert!(matches!(Value::Int(1).set(1, 1), Err(Error::Validation(_))));
    }

    #[test]
    fn test_frozen_list_rejects_before_type_check() {
        let list = Value::from_items([1]);
        list.freeze();
        let err = list.set("name", 1).unwrap_err();
        assert!(matches!(err, Error::ImmutabilityViolation { kind: "sequence" }));
    }

    #[test]
    fn test_value_raw_equality_and_ordering() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::from("a") < Value::from("b"));
        assert_eq!(Value::Int(1).partial_cmp(&Value::from("a")), None);

        let t = Value::table();
        assert_eq!(t, t.clone());
        assert_ne!(t, Value::table());
    }

    #[test]
    fn test_value_to_key_normalizes_integral_floats() {
        assert_eq!(Value::Float(2.0).to_key(), Some(Key::Int(2)));
        assert_eq!(Value::Float(2.5).to_key(), None);
        assert_eq!(Value::Nil.to_key(), None);
        assert_eq!(Value::from("k").to_key(), Some(Key::from("k")));
    }

    #[test]
    fn test_value_from_entries_skips_short_entries() {
        let entries = Value::from_items([
            Value::from_items([Value::from("a"), Value::from(1)]),
            Value::from_items([Value::from("lonely")]),
            Value::from(5),
            Value::from_items([Value::from("b"), Value::from(2)]),
        ]);
        let table = Value::from_entries(&entries).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("b"), Value::Int(2));
        assert!(Value::from_entries(&Value::Int(3)).is_err());
    }

    #[test]
    fn test_sequence_from_value() {
        let table = Value::table();
        table.set(1, "x").unwrap();
        table.set(2, "y").unwrap();
        table.set(4, "gap").unwrap();
        let seq = Sequence::<Value>::try_from(&table).unwrap();
        assert_eq!(seq.len(), 2);

        let chars = Sequence::<Value>::try_from(&Value::from("abc")).unwrap();
        assert_eq!(chars.join(","), "a,b,c");

        let list = Value::from_items([1, 2]);
        assert_eq!(Sequence::<Value>::try_from(&list).unwrap().len(), 2);

        let err = Sequence::<Value>::try_from(&Value::Bool(true)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_value_merge_adds_numbers() {
        let mut target = Value::from_pairs([
            ("a", Value::from(1)),
            ("b", Value::from_pairs([("x", 1)])),
        ]);
        let source = Value::from_pairs([
            ("a", Value::from(2)),
            ("b", Value::from_pairs([("x", 3)])),
        ]);
        let before = target.clone();
        crate::merge(&mut target, source, true).unwrap();
        assert_eq!(target.get("a"), Value::Int(3));
        assert_eq!(target.get("b").get("x"), Value::Int(4));
        assert_eq!(target, before);
    }

    #[test]
    fn test_value_merge_mixed_numbers_and_overwrite() {
        let mut target = Value::from_pairs([("n", Value::from(1)), ("s", Value::from("old"))]);
        let source = Value::from_pairs([("n", Value::from(0.5)), ("s", Value::from("new"))]);
        crate::merge(&mut target, source, true).unwrap();
        assert_eq!(target.get("n"), Value::Float(1.5));
        assert_eq!(target.get("s"), Value::from("new"));

        let overwrite = Value::from_pairs([("n", 9)]);
        crate::deep_merge(&mut target, overwrite).unwrap();
        assert_eq!(target.get("n"), Value::Int(9));
    }

    #[test]
    fn test_value_merge_into_frozen_fails() {
        let mut target = Value::from_pairs([("a", 1)]);
        target.freeze();
        let err = crate::merge(&mut target, Value::from_pairs([("a", 1)]), true).unwrap_err();
        assert!(matches!(err, Error::ImmutabilityViolation { kind: "mapping" }));
        assert_eq!(target.get("a"), Value::Int(1));
    }

    #[test]
    fn test_value_merge_when_source_nests_the_target() {
        let mut target = Value::from_pairs([("k", Value::table())]);
        let inner = target.get("k");
        let source = Value::from_pairs([("k", target.clone())]);

        crate::deep_merge(&mut target, source).unwrap();
        assert_eq!(target.get("k"), inner);
        assert_eq!(inner.get("k"), inner);
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_value_merge_of_table_into_itself() {
        let mut target = Value::from_pairs([("n", Value::from(2)), ("t", Value::from_pairs([("x", 1)]))]);
        let alias = target.clone();
        crate::merge(&mut target, alias, true).unwrap();
        assert_eq!(target.get("n"), Value::Int(4));
        assert_eq!(target.get("t").get("x"), Value::Int(2));
    }

    #[test]
    fn test_is_array_accepts_positional_tables() {
        let positional = Value::table();
        positional.set(1, "x").unwrap();
        positional.set(2, "y").unwrap();
        assert!(crate::is_array(&positional));
        assert_eq!(Sequence::<Value>::try_from(&positional).unwrap().len(), 2);

        assert!(crate::is_array(&Value::table()));
        assert!(crate::is_array(&Value::list()));

        positional.set(4, "gap").unwrap();
        assert!(!crate::is_array(&positional));
        assert!(!crate::is_array(&Value::from_pairs([("a", 1)])));
        assert!(!crate::is_array(&Value::from_pairs([(0, 1)])));
        assert!(!crate::is_array(&Value::from("abc")));
    }

    #[test]
    fn test_lists_drop_nil_items() {
        let list = Value::from_items([Value::from(1), Value::Nil, Value::from(3)]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(2), Value::Int(3));

        let parsed = Value::from_ron("[1, (), 3]").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(2), Value::Int(3));

        let from_json: Value = serde_json::from_str("[null, 2]").unwrap();
        assert_eq!(from_json.len(), 1);
        assert_eq!(from_json.get(1), Value::Int(2));
    }

    #[test]
    fn test_value_deep_clone_of_frozen_is_live() {
        let frozen = Value::from_pairs([("inner", Value::from_items([1, 2]))]);
        frozen.freeze();
        let copy = crate::deepclone(&frozen);
        assert!(!copy.is_frozen());
        assert!(crate::matches(&copy, &frozen));
        copy.get("inner").set(3, 3).unwrap();
        assert_eq!(frozen.get("inner").len(), 2);
    }

    #[test]
    fn test_value_ron_and_json() {
        let value = Value::from_ron(r#"{"name": "sensor", "sizes": [1, 2.5], "on": true}"#).unwrap();
        assert_eq!(value.get("name"), Value::from("sensor"));
        assert_eq!(value.get("sizes").get(2), Value::Float(2.5));
        assert_eq!(value.get("on"), Value::Bool(true));

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"name":"sensor","on":true,"sizes":[1,2.5]}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert!(back.deep_matches(&value));
    }
}
