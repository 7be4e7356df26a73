//! The path traversal engine: pure functions over decoded value trees.
//!
//! Each function takes the decoded root stored under a path's first segment
//! (or `None` when nothing is stored there) and the REMAINING segments -
//! the orchestrator has already consumed the first segment to fetch the
//! blob. Nothing here touches a medium or a codec.
//!
//! Segments are always plain mapping keys. Arrays can be stored as values
//! but are never walked into: a non-mapping encountered mid-path reads as
//! missing, and is destructively replaced by writes.

use serde_json::{Map, Value};

/// Read the value at `segments` below `root`.
///
/// Returns an owned deep copy, so callers can mutate the result without
/// corrupting medium-held state. `None` when the root is absent, when any
/// intermediate segment is missing or not a mapping, or when the final
/// segment's parent is not a mapping. Empty `segments` returns a copy of
/// the root itself.
pub fn read_at(root: Option<&Value>, segments: &[String]) -> Option<Value> {
    let root = root?;
    let Some((last, intermediate)) = segments.split_last() else {
        return Some(root.clone());
    };

    let mut cursor = root;
    for segment in intermediate {
        let child = match cursor {
            Value::Object(map) => map.get(segment.as_str()),
            _ => None,
        }?;
        if !child.is_object() {
            return None;
        }
        cursor = child;
    }

    match cursor {
        Value::Object(map) => map.get(last.as_str()).cloned(),
        _ => None,
    }
}

/// Write `value` at `segments` below `root`, returning the new root to be
/// re-encoded and stored.
///
/// Empty `segments` replaces the whole root with `value`. Otherwise an
/// absent or non-mapping root becomes a fresh mapping, and every
/// intermediate segment navigates into a mapping - creating one where the
/// segment is missing, and destructively overwriting any non-mapping value
/// sitting in the way.
pub fn write_at(root: Option<Value>, segments: &[String], value: Value) -> Value {
    let Some((last, intermediate)) = segments.split_last() else {
        return value;
    };

    let mut root = match root {
        Some(root @ Value::Object(_)) => root,
        _ => Value::Object(Map::new()),
    };

    let mut cursor = &mut root;
    for segment in intermediate {
        if let Value::Object(map) = cursor {
            let child = map.entry(segment.clone()).or_insert(Value::Null);
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            cursor = child;
        }
    }
    if let Value::Object(map) = cursor {
        map.insert(last.clone(), value);
    }

    root
}

/// What the orchestrator should do with the medium after a delete.
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    /// Remove the whole top-level key from the medium.
    RemoveKey,
    /// Re-encode this root and store it back.
    Store(Value),
    /// Nothing to do; no medium write.
    Untouched,
}

/// Delete the entry at `segments` below `root`.
///
/// An absent root is a no-op. Empty `segments` signals removal of the
/// whole top-level key. A missing or non-mapping intermediate (or a
/// non-mapping final parent) is a no-op; removing an entry that is not
/// present from a mapping parent still stores the root back.
pub fn delete_at(root: Option<Value>, segments: &[String]) -> DeleteOutcome {
    let Some(mut root) = root else {
        return DeleteOutcome::Untouched;
    };
    let Some((last, intermediate)) = segments.split_last() else {
        return DeleteOutcome::RemoveKey;
    };

    let mut cursor = &mut root;
    for segment in intermediate {
        let child = match cursor {
            Value::Object(map) => map.get_mut(segment.as_str()),
            _ => None,
        };
        match child {
            Some(child) if child.is_object() => cursor = child,
            _ => return DeleteOutcome::Untouched,
        }
    }

    let removed = match cursor {
        Value::Object(map) => {
            map.remove(last.as_str());
            true
        }
        _ => false,
    };
    if removed {
        DeleteOutcome::Store(root)
    } else {
        DeleteOutcome::Untouched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn person() -> Value {
        json!({
            "name": {"first": "John", "last": "Doe"},
            "age": 42
        })
    }

    // ==================== read_at ====================

    #[test]
    fn read_absent_root_is_none() {
        assert_eq!(read_at(None, &segments(&["name"])), None);
        assert_eq!(read_at(None, &[]), None);
    }

    #[test]
    fn read_empty_segments_copies_root() {
        let root = person();
        let copy = read_at(Some(&root), &[]).unwrap();
        assert_eq!(copy, root);
    }

    #[test]
    fn read_returns_an_independent_copy() {
        let root = person();
        let mut copy = read_at(Some(&root), &segments(&["name"])).unwrap();
        copy["first"] = json!("Jane");
        assert_eq!(root["name"]["first"], json!("John"));
    }

    #[test]
    fn read_walks_nested_mappings() {
        let root = person();
        assert_eq!(
            read_at(Some(&root), &segments(&["name", "first"])),
            Some(json!("John"))
        );
        assert_eq!(read_at(Some(&root), &segments(&["age"])), Some(json!(42)));
    }

    #[test]
    fn read_missing_segment_is_none() {
        let root = person();
        assert_eq!(read_at(Some(&root), &segments(&["name", "middle"])), None);
        assert_eq!(read_at(Some(&root), &segments(&["does", "not", "exist"])), None);
    }

    #[test]
    fn read_through_non_mapping_is_none() {
        let root = person();
        // age is a number; there is nothing below it
        assert_eq!(read_at(Some(&root), &segments(&["age", "years"])), None);
    }

    #[test]
    fn read_primitive_root_with_segments_is_none() {
        let root = json!(42);
        assert_eq!(read_at(Some(&root), &segments(&["x"])), None);
    }

    #[test]
    fn read_does_not_index_arrays() {
        let root = json!({"items": [1, 2, 3]});
        assert_eq!(read_at(Some(&root), &segments(&["items", "0"])), None);
        // the array itself is still readable as a value
        assert_eq!(
            read_at(Some(&root), &segments(&["items"])),
            Some(json!([1, 2, 3]))
        );
    }

    #[test]
    fn read_null_entry_is_some_null() {
        let root = json!({"gone": null});
        assert_eq!(read_at(Some(&root), &segments(&["gone"])), Some(json!(null)));
    }

    // ==================== write_at ====================

    #[test]
    fn write_empty_segments_replaces_root() {
        let root = write_at(Some(person()), &[], json!({"fresh": true}));
        assert_eq!(root, json!({"fresh": true}));
    }

    #[test]
    fn write_onto_absent_root_creates_mappings() {
        let root = write_at(None, &segments(&["name", "first"]), json!("John"));
        assert_eq!(root, json!({"name": {"first": "John"}}));
    }

    #[test]
    fn write_merges_into_existing_mapping() {
        let root = write_at(Some(person()), &segments(&["age"]), json!(43));
        assert_eq!(root["age"], json!(43));
        assert_eq!(root["name"]["first"], json!("John"));
    }

    #[test]
    fn write_can_go_really_deep() {
        let root = write_at(
            None,
            &segments(&["key1", "key2", "key3", "key4", "key5"]),
            json!("value"),
        );
        assert_eq!(
            root,
            json!({"key1": {"key2": {"key3": {"key4": {"key5": "value"}}}}})
        );
    }

    #[test]
    fn write_overwrites_non_mapping_intermediates() {
        // age is a number; writing below it blows it away
        let root = write_at(Some(person()), &segments(&["age", "exact"]), json!(42.5));
        assert_eq!(root["age"], json!({"exact": 42.5}));
    }

    #[test]
    fn write_overwrites_primitive_root() {
        let root = write_at(Some(json!("scalar")), &segments(&["key"]), json!(1));
        assert_eq!(root, json!({"key": 1}));
    }

    #[test]
    fn write_null_intermediate_is_overwritten() {
        let root = write_at(
            Some(json!({"slot": null})),
            &segments(&["slot", "inner"]),
            json!(true),
        );
        assert_eq!(root, json!({"slot": {"inner": true}}));
    }

    #[test]
    fn write_single_segment_sets_directly() {
        let root = write_at(None, &segments(&["only"]), json!("v"));
        assert_eq!(root, json!({"only": "v"}));
    }

    // ==================== delete_at ====================

    #[test]
    fn delete_absent_root_is_untouched() {
        assert_eq!(delete_at(None, &segments(&["name"])), DeleteOutcome::Untouched);
        assert_eq!(delete_at(None, &[]), DeleteOutcome::Untouched);
    }

    #[test]
    fn delete_empty_segments_removes_key() {
        assert_eq!(delete_at(Some(person()), &[]), DeleteOutcome::RemoveKey);
    }

    #[test]
    fn delete_leaf_stores_trimmed_root() {
        let outcome = delete_at(Some(person()), &segments(&["name", "first"]));
        let DeleteOutcome::Store(root) = outcome else {
            panic!("expected Store, got {:?}", outcome);
        };
        assert_eq!(root, json!({"name": {"last": "Doe"}, "age": 42}));
    }

    #[test]
    fn delete_subtree_keeps_parent() {
        let outcome = delete_at(Some(person()), &segments(&["name"]));
        let DeleteOutcome::Store(root) = outcome else {
            panic!("expected Store, got {:?}", outcome);
        };
        assert_eq!(root, json!({"age": 42}));
    }

    #[test]
    fn delete_missing_intermediate_is_untouched() {
        assert_eq!(
            delete_at(Some(person()), &segments(&["job", "title"])),
            DeleteOutcome::Untouched
        );
    }

    #[test]
    fn delete_through_non_mapping_is_untouched() {
        assert_eq!(
            delete_at(Some(person()), &segments(&["age", "years"])),
            DeleteOutcome::Untouched
        );
    }

    #[test]
    fn delete_of_absent_leaf_still_stores() {
        // delete is unconditional; the blob is rewritten either way
        let outcome = delete_at(Some(person()), &segments(&["hobby"]));
        assert!(matches!(outcome, DeleteOutcome::Store(_)));
    }

    #[test]
    fn delete_on_primitive_root_is_untouched() {
        assert_eq!(
            delete_at(Some(json!(42)), &segments(&["x"])),
            DeleteOutcome::Untouched
        );
    }
}
