// tests/document_tests.rs
use indexmap::IndexMap;
use jsonquill::document::node::{JsonNumber, JsonValue};
use jsonquill::document::parser::parse_json;
use jsonquill::document::path::{JsonPath, PathSegment};
use jsonquill::document::serializer::{serialize, serialize_compact};
use jsonquill::document::tree::{DocumentOrigin, JsonTree};
use jsonquill::EditError;

fn path(segments: Vec<PathSegment>) -> JsonPath {
    JsonPath::new(segments)
}

fn key(k: &str) -> PathSegment {
    PathSegment::Key(k.to_string())
}

fn idx(i: usize) -> PathSegment {
    PathSegment::Index(i)
}

// ============================================================================
// Path Resolution Tests
// ============================================================================

#[test]
fn test_get_root() {
    let tree = parse_json(r#"{"a": 1}"#).unwrap();
    assert!(tree.get(&JsonPath::root()).unwrap().is_object());
}

#[test]
fn test_get_nested_value() {
    let tree = parse_json(r#"{"user": {"tags": ["x", "y"]}}"#).unwrap();
    let value = tree
        .get(&path(vec![key("user"), key("tags"), idx(1)]))
        .unwrap();
    assert_eq!(value, &JsonValue::from("y"));
}

#[test]
fn test_get_out_of_range_index() {
    let tree = parse_json("[1, 2]").unwrap();
    assert!(matches!(
        tree.get(&path(vec![idx(2)])),
        Err(EditError::Path { .. })
    ));
}

#[test]
fn test_get_missing_key() {
    let tree = parse_json(r#"{"a": 1}"#).unwrap();
    assert!(matches!(
        tree.get(&path(vec![key("b")])),
        Err(EditError::Path { .. })
    ));
}

// ============================================================================
// Leaf Replacement Tests
// ============================================================================

#[test]
fn test_set_leaf_replaces_value() {
    let mut tree = parse_json(r#"{"a": 1, "b": 2}"#).unwrap();
    tree.set_leaf(&path(vec![key("a")]), JsonValue::from("one"))
        .unwrap();
    assert_eq!(serialize(&tree), "{\n    \"a\": \"one\",\n    \"b\": 2\n}");
}

#[test]
fn test_set_leaf_on_missing_path_fails() {
    let mut tree = parse_json(r#"{"a": 1}"#).unwrap();
    let before = tree.clone();
    assert!(tree
        .set_leaf(&path(vec![key("missing")]), JsonValue::Null)
        .is_err());
    assert_eq!(tree, before);
}

// ============================================================================
// Array Insertion Tests
// ============================================================================

#[test]
fn test_insert_array_element_copies_last_object() {
    let mut tree = parse_json(r#"[{"a": 1}]"#).unwrap();
    let new_path = tree.insert_array_element(&JsonPath::root()).unwrap();

    assert_eq!(new_path, path(vec![idx(1)]));
    assert_eq!(
        tree.get(&new_path).unwrap(),
        tree.get(&path(vec![idx(0)])).unwrap()
    );
}

#[test]
fn test_inserted_copy_is_independent() {
    let mut tree = parse_json(r#"[{"a": 1}]"#).unwrap();
    tree.insert_array_element(&JsonPath::root()).unwrap();
    tree.set_leaf(&path(vec![idx(1), key("a")]), JsonValue::from(99i64))
        .unwrap();

    assert_eq!(
        tree.get(&path(vec![idx(0), key("a")])).unwrap(),
        &JsonValue::from(1i64)
    );
}

#[test]
fn test_insert_array_element_into_empty_array() {
    let mut tree = parse_json("[]").unwrap();
    tree.insert_array_element(&JsonPath::root()).unwrap();
    assert_eq!(
        tree.root(),
        &JsonValue::Array(vec![JsonValue::from("new_value")])
    );
}

#[test]
fn test_insert_array_element_after_scalars() {
    let mut tree = parse_json("[1, 2]").unwrap();
    tree.insert_array_element(&JsonPath::root()).unwrap();
    assert_eq!(
        tree.get(&path(vec![idx(2)])).unwrap(),
        &JsonValue::from("new_value")
    );
}

#[test]
fn test_insert_array_element_when_last_is_not_object() {
    // Only the last element matters
    let mut tree = parse_json(r#"[{"a": 1}, 5]"#).unwrap();
    tree.insert_array_element(&JsonPath::root()).unwrap();
    assert_eq!(
        tree.get(&path(vec![idx(2)])).unwrap(),
        &JsonValue::from("new_value")
    );
}

#[test]
fn test_insert_array_element_on_object_fails() {
    let mut tree = parse_json(r#"{"a": 1}"#).unwrap();
    let before = tree.clone();
    let err = tree.insert_array_element(&JsonPath::root()).unwrap_err();
    assert!(matches!(err, EditError::NotAContainer { .. }));
    assert_eq!(tree, before);
}

// ============================================================================
// Object Insertion Tests
// ============================================================================

#[test]
fn test_insert_object_member_appends_key() {
    let mut tree = parse_json(r#"{"z": 1, "a": 2}"#).unwrap();
    let new_path = tree.insert_object_member(&JsonPath::root(), "k").unwrap();

    assert_eq!(new_path, path(vec![key("k")]));
    assert_eq!(tree.get(&new_path).unwrap(), &JsonValue::from("new_value"));
    match tree.root() {
        JsonValue::Object(entries) => {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["z", "a", "k"]);
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_insert_duplicate_key_rejected() {
    let mut tree = parse_json(r#"{"existing": 1}"#).unwrap();
    let before = serialize(&tree);

    let err = tree
        .insert_object_member(&JsonPath::root(), "existing")
        .unwrap_err();

    assert_eq!(err, EditError::DuplicateKey("existing".to_string()));
    assert_eq!(serialize(&tree), before);
}

#[test]
fn test_insert_object_member_on_array_fails() {
    let mut tree = parse_json("[1]").unwrap();
    assert!(matches!(
        tree.insert_object_member(&JsonPath::root(), "k"),
        Err(EditError::NotAContainer { .. })
    ));
}

#[test]
fn test_insert_object_member_on_leaf_fails() {
    let mut tree = parse_json(r#"{"a": "text"}"#).unwrap();
    assert!(matches!(
        tree.insert_object_member(&path(vec![key("a")]), "k"),
        Err(EditError::NotAContainer { .. })
    ));
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[test]
fn test_delete_shifts_indices() {
    let mut tree = parse_json("[10, 20, 30]").unwrap();
    let removed = tree.delete_node(&path(vec![idx(0)])).unwrap();

    assert_eq!(removed, JsonValue::from(10i64));
    assert_eq!(
        tree.root(),
        &JsonValue::Array(vec![JsonValue::from(20i64), JsonValue::from(30i64)])
    );
    assert_eq!(
        tree.get(&path(vec![idx(1)])).unwrap(),
        &JsonValue::from(30i64)
    );
    // The old last index is now stale
    assert!(tree.get(&path(vec![idx(2)])).is_err());
}

#[test]
fn test_delete_object_member_preserves_order() {
    let mut tree = parse_json(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
    tree.delete_node(&path(vec![key("b")])).unwrap();
    match tree.root() {
        JsonValue::Object(entries) => {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["a", "c"]);
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_delete_root_fails() {
    let mut tree = parse_json(r#"{"a": 1}"#).unwrap();
    assert_eq!(
        tree.delete_node(&JsonPath::root()).unwrap_err(),
        EditError::RootDeletion
    );
    assert_eq!(tree.root().child_count(), 1);
}

#[test]
fn test_delete_nested_container() {
    let mut tree = parse_json(r#"{"items": [{"id": 1}, {"id": 2}]}"#).unwrap();
    tree.delete_node(&path(vec![key("items"), idx(0)])).unwrap();
    assert_eq!(
        tree.get(&path(vec![key("items"), idx(0), key("id")]))
            .unwrap(),
        &JsonValue::from(2i64)
    );
}

// ============================================================================
// Root Replacement and Origin Tests
// ============================================================================

#[test]
fn test_replace_root() {
    let mut tree = parse_json(r#"{"a": 1}"#).unwrap();
    tree.replace_root(JsonValue::Array(vec![]));
    assert!(tree.root().is_array());
    assert!(tree.get(&path(vec![key("a")])).is_err());
}

#[test]
fn test_origin_defaults_to_fresh() {
    let tree = JsonTree::new(JsonValue::Null);
    assert_eq!(tree.origin(), &DocumentOrigin::Fresh);
    assert!(tree.origin().path().is_none());
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn test_round_trip_preserves_structure_and_order() {
    let source = r#"{"zeta": [1, 2.5, "three", null, true], "alpha": {"nested": {}}, "ünï": "çødé"}"#;
    let tree = parse_json(source).unwrap();
    let text = serialize(&tree);
    let reparsed = parse_json(&text).unwrap();

    assert_eq!(reparsed, tree);
    assert_eq!(serialize(&reparsed), text);
    assert!(text.contains("\"ünï\": \"çødé\""));
}

#[test]
fn test_constructed_document_round_trips() {
    let mut fields = IndexMap::new();
    fields.insert(
        "count".to_string(),
        JsonValue::Number(JsonNumber::Integer(42)),
    );
    fields.insert("ratio".to_string(), JsonValue::Number(JsonNumber::Float(0.25)));
    fields.insert("whole".to_string(), JsonValue::Number(JsonNumber::Float(3.0)));
    let tree = JsonTree::new(JsonValue::Object(fields));

    let reparsed = parse_json(&serialize(&tree)).unwrap();
    assert_eq!(reparsed, tree);
}

#[test]
fn test_integers_beyond_i64_round_trip_exactly() {
    let source = "[9223372036854775807,18446744073709551615,-9223372036854775808]";
    let tree = parse_json(source).unwrap();
    assert_eq!(
        tree.get(&path(vec![idx(1)])).unwrap(),
        &JsonValue::Number(JsonNumber::Unsigned(u64::MAX))
    );
    assert_eq!(serialize_compact(tree.root()), source);
}
