use serde_json::{Value, json};
use weft::WeftError;
use weft::chart::{Chart, ChartEngine, Config, parse_config};

#[derive(Debug, Default)]
struct Recorder {
    applied: Vec<Config>,
}

impl ChartEngine for Recorder {
    fn set_option(&mut self, option: &Config) {
        self.applied.push(option.clone());
    }
}

fn obj(value: Value) -> Config {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ============================================================================
// Chart Host
// ============================================================================

#[test]
fn test_new_pushes_base() {
    let base = obj(json!({"title": {"text": "Latency"}}));
    let chart = Chart::new(base.clone(), Recorder::default());

    assert_eq!(chart.engine().applied, vec![base]);
}

#[test]
fn test_render_merges_override_over_base() {
    let mut chart = Chart::new(
        obj(json!({"series": [{"type": "line", "smooth": false}], "legend": {"show": true}})),
        Recorder::default(),
    );

    chart.render(obj(json!({"series": [{"smooth": true}]})));

    assert_eq!(
        Value::Object(chart.engine().applied.last().cloned().unwrap()),
        json!({"series": [{"type": "line", "smooth": true}], "legend": {"show": true}})
    );
}

#[test]
fn test_each_render_starts_from_base() {
    let mut chart = Chart::new(obj(json!({"color": "red"})), Recorder::default());

    chart.render(obj(json!({"width": 10})));
    chart.render(obj(json!({"height": 20})));

    assert_eq!(
        Value::Object(chart.option()),
        json!({"color": "red", "height": 20})
    );
    assert_eq!(chart.engine().applied.len(), 3);
}

#[test]
fn test_set_base_keeps_last_override() {
    let mut chart = Chart::new(obj(json!({"color": "red"})), Recorder::default());
    chart.render(obj(json!({"width": 10})));

    chart.set_base(obj(json!({"color": "blue"})));

    assert_eq!(
        Value::Object(chart.option()),
        json!({"color": "blue", "width": 10})
    );
    assert_eq!(chart.base()["color"], json!("blue"));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_from_json_str() {
    let chart = Chart::from_json_str(r#"{"title": {"text": "x"}}"#, Recorder::default()).unwrap();
    assert_eq!(chart.base()["title"], json!({"text": "x"}));
}

#[test]
fn test_parse_config_rejects_non_objects() {
    assert!(matches!(
        parse_config("[1, 2]"),
        Err(WeftError::NotAnObject("array"))
    ));
    assert!(matches!(
        parse_config("null"),
        Err(WeftError::NotAnObject("null"))
    ));
    assert!(matches!(parse_config("{"), Err(WeftError::Config(_))));
}
