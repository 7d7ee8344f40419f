use proptest::prelude::*;
use serde_json::{Map, Value, json};
use weft::chart::{Config, merge};

fn obj(value: Value) -> Config {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ============================================================================
// Documented Cases
// ============================================================================

#[test]
fn test_empty_override_is_identity() {
    let base = obj(json!({
        "title": {"text": "Revenue"},
        "series": [{"name": "a"}],
        "colors": ["red"],
    }));
    assert_eq!(merge(&base, &Map::new()), base);
}

#[test]
fn test_series_elements_merge_by_index() {
    let base = obj(json!({"series": [{"a": 1, "b": 2}, {"a": 3, "b": 4}]}));
    let patch = obj(json!({"series": [{"b": 20}]}));

    let merged = merge(&base, &patch);

    assert_eq!(
        Value::Object(merged),
        json!({"series": [{"a": 1, "b": 20}, {"a": 3, "b": 4}]})
    );
}

#[test]
fn test_series_extra_override_entries_dropped() {
    let base = obj(json!({"series": [{"a": 1}]}));
    let patch = obj(json!({"series": [{"a": 2}, {"a": 3}, {"a": 4}]}));

    let merged = merge(&base, &patch);

    assert_eq!(merged["series"], json!([{"a": 2}]));
}

#[test]
fn test_other_arrays_replace_wholesale() {
    let base = obj(json!({"colors": ["red", "blue"]}));
    let patch = obj(json!({"colors": ["green"]}));

    assert_eq!(merge(&base, &patch)["colors"], json!(["green"]));
}

#[test]
fn test_nested_objects_merge() {
    let base = obj(json!({"xAxis": {"min": 0, "max": 100}}));
    let patch = obj(json!({"xAxis": {"max": 200}}));

    assert_eq!(merge(&base, &patch)["xAxis"], json!({"min": 0, "max": 200}));
}

#[test]
fn test_deeply_nested_merge_keeps_siblings() {
    let base = obj(json!({"grid": {"padding": {"top": 4, "left": 8}, "show": true}}));
    let patch = obj(json!({"grid": {"padding": {"left": 16}}}));

    assert_eq!(
        merge(&base, &patch)["grid"],
        json!({"padding": {"top": 4, "left": 16}, "show": true})
    );
}

#[test]
fn test_scalar_series_entry_replaces_base_entry() {
    let base = obj(json!({"series": [{"a": 1}, {"a": 2}]}));
    let patch = obj(json!({"series": [5]}));

    assert_eq!(merge(&base, &patch)["series"], json!([5, {"a": 2}]));
}

// ============================================================================
// Properties
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_config() -> impl Strategy<Value = Config> {
    prop::collection::btree_map("[a-z]{1,3}|series", arb_value(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_series() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        prop::collection::btree_map("[a-z]{1,2}", arb_scalar(), 0..3)
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        0..6,
    )
}

proptest! {
    #[test]
    fn prop_empty_override_is_identity(base in arb_config()) {
        prop_assert_eq!(merge(&base, &Map::new()), base);
    }

    #[test]
    fn prop_series_length_follows_base(base in arb_series(), patch in arb_series()) {
        let n = base.len();
        let base = obj(json!({"series": base}));
        let patch = obj(json!({"series": patch}));

        let merged = merge(&base, &patch);

        prop_assert_eq!(merged["series"].as_array().map(Vec::len), Some(n));
    }

    #[test]
    fn prop_override_scalars_win(base in arb_config(), key in "[a-z]{1,3}", value in arb_scalar()) {
        let mut patch = Map::new();
        patch.insert(key.clone(), value.clone());

        let merged = merge(&base, &patch);

        prop_assert_eq!(&merged[&key], &value);
    }
}
