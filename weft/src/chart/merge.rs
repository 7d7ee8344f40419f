//! Recursive merge of chart configuration objects.
//!
//! A chart is described by a base configuration plus a partial override
//! supplied per render. [`merge`] combines the two without touching either
//! input:
//!
//! - `series` merges element-wise and keeps the base length.
//! - Any other array in the override replaces the base value.
//! - Objects present on both sides merge recursively.
//! - Everything else in the override replaces the base value.

use serde_json::{Map, Value};

/// A configuration object.
pub type Config = Map<String, Value>;

/// The field whose entries are merged per index instead of replaced.
pub const SERIES_KEY: &str = "series";

/// Merge `patch` over `base`, returning a new configuration.
pub fn merge(base: &Config, patch: &Config) -> Config {
    let mut merged = base.clone();

    for (key, value) in patch {
        let next = match (key.as_str(), merged.get(key), value) {
            (SERIES_KEY, Some(Value::Array(base_series)), Value::Array(patch_series)) => {
                Value::Array(merge_series(base_series, patch_series))
            }
            (_, _, Value::Array(_)) => value.clone(),
            (_, Some(Value::Object(base_obj)), Value::Object(patch_obj)) => {
                Value::Object(merge(base_obj, patch_obj))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }

    merged
}

/// Merge two arbitrary values: objects merge, anything else is replaced.
pub fn merge_value(base: &Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(base_obj), Value::Object(patch_obj)) => {
            Value::Object(merge(base_obj, patch_obj))
        }
        _ => patch.clone(),
    }
}

/// Index-wise merge; output length always matches `base`.
///
/// A `null` patch entry leaves the base entry as it is.
fn merge_series(base: &[Value], patch: &[Value]) -> Vec<Value> {
    base.iter()
        .enumerate()
        .map(|(i, item)| match patch.get(i) {
            None | Some(Value::Null) => item.clone(),
            Some(entry) => merge_value(item, entry),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Config {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_new_keys_are_added() {
        let merged = merge(&obj(json!({"a": 1})), &obj(json!({"b": {"c": 2}})));
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_null_replaces_object() {
        let merged = merge(&obj(json!({"legend": {"show": true}})), &obj(json!({"legend": null})));
        assert_eq!(Value::Object(merged), json!({"legend": null}));
    }

    #[test]
    fn test_object_replaces_scalar() {
        let merged = merge(&obj(json!({"title": "Sales"})), &obj(json!({"title": {"text": "Q3"}})));
        assert_eq!(Value::Object(merged), json!({"title": {"text": "Q3"}}));
    }

    #[test]
    fn test_series_without_base_series_is_replaced() {
        let merged = merge(&obj(json!({})), &obj(json!({"series": [{"type": "bar"}]})));
        assert_eq!(Value::Object(merged), json!({"series": [{"type": "bar"}]}));
    }

    #[test]
    fn test_series_null_entry_keeps_base() {
        let merged = merge(
            &obj(json!({"series": [{"a": 1}, {"a": 2}]})),
            &obj(json!({"series": [null, {"a": 3}]})),
        );
        assert_eq!(Value::Object(merged), json!({"series": [{"a": 1}, {"a": 3}]}));
    }

    #[test]
    fn test_nested_series_key_uses_same_rule() {
        let merged = merge(
            &obj(json!({"inner": {"series": [{"a": 1}]}})),
            &obj(json!({"inner": {"series": [{"b": 2}, {"c": 3}]}})),
        );
        assert_eq!(Value::Object(merged), json!({"inner": {"series": [{"a": 1, "b": 2}]}}));
    }

    #[test]
    fn test_inputs_untouched() {
        let base = obj(json!({"xAxis": {"min": 0}}));
        let patch = obj(json!({"xAxis": {"max": 5}}));
        let _ = merge(&base, &patch);
        assert_eq!(Value::Object(base), json!({"xAxis": {"min": 0}}));
        assert_eq!(Value::Object(patch), json!({"xAxis": {"max": 5}}));
    }
}
