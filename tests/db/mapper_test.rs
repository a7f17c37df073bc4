// tests/db/mapper_test.rs
use nau_reports::db::{map_rows, Column, DbError, Value};

fn columns(names: &[&str]) -> Vec<Column> {
    names.iter().map(|n| Column::named(*n)).collect()
}

#[test]
fn test_maps_rows_positionally() {
    let data = map_rows(
        &columns(&["a", "b"]),
        vec![
            vec![Value::Int(1), Value::from("x")],
            vec![Value::Int(2), Value::from("y")],
        ],
    )
    .unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.records()[0].get("a"), Some(&Value::Int(1)));
    assert_eq!(data.records()[0].get("b"), Some(&Value::from("x")));
    assert_eq!(data.records()[1].get("a"), Some(&Value::Int(2)));
    assert_eq!(data.records()[1].get("b"), Some(&Value::from("y")));
}

#[test]
fn test_no_rows_gives_empty_dataset() {
    let data = map_rows(&columns(&["a", "b"]), vec![]).unwrap();
    assert!(data.is_empty());
    assert_eq!(data.columns(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn test_records_share_column_order() {
    let data = map_rows(
        &columns(&["id", "name", "active"]),
        vec![
            vec![Value::Int(1), Value::from("NAU"), Value::Bool(true)],
            vec![Value::Int(2), Value::Null, Value::Bool(false)],
            vec![Value::Int(3), Value::from("FCT"), Value::Null],
        ],
    )
    .unwrap();

    for record in &data {
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "name", "active"]);
    }
}

#[test]
fn test_values_are_not_coerced() {
    let data = map_rows(
        &columns(&["n"]),
        vec![vec![Value::from("42")], vec![Value::Float(1.5)]],
    )
    .unwrap();

    assert_eq!(data.records()[0].get("n"), Some(&Value::Text("42".into())));
    assert_eq!(data.records()[1].get("n"), Some(&Value::Float(1.5)));
}

#[test]
fn test_short_row_is_rejected() {
    let err = map_rows(&columns(&["a", "b"]), vec![vec![Value::Int(1)]]).unwrap_err();
    assert!(matches!(
        err,
        DbError::ShapeMismatch {
            row: 0,
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn test_serializes_as_array_of_objects() {
    let data = map_rows(
        &columns(&["b", "a"]),
        vec![vec![Value::Int(1), Value::from("x")]],
    )
    .unwrap();

    let json = serde_json::to_string(&data).unwrap();
    assert_eq!(json, r#"[{"b":1,"a":"x"}]"#);
}

#[test]
fn test_repeated_column_label_appears_once() {
    let data = map_rows(
        &columns(&["id", "id"]),
        vec![vec![Value::Int(1), Value::Int(2)]],
    )
    .unwrap();

    let record = &data.records()[0];
    assert_eq!(record.len(), 1);
    assert_eq!(record.get("id"), Some(&Value::Int(2)));
    assert_eq!(serde_json::to_string(&data).unwrap(), r#"[{"id":2}]"#);
}

#[test]
fn test_repeated_label_keeps_first_position() {
    let data = map_rows(
        &columns(&["name", "id", "name"]),
        vec![
            vec![Value::from("old"), Value::Int(1), Value::from("new")],
            vec![Value::Null, Value::Int(2), Value::from("other")],
        ],
    )
    .unwrap();

    assert_eq!(data.columns(), &["name".to_string(), "id".to_string()]);
    assert_eq!(
        serde_json::to_string(&data).unwrap(),
        r#"[{"name":"new","id":1},{"name":"other","id":2}]"#
    );
}
