use multiline_chart::core::{Dataset, DomainValue, Record, Slot};
use multiline_chart::error::ChartError;

fn slot(x_key: &str, x: f64, y_key: &str, y: f64) -> Slot {
    let mut slot = Slot::new();
    slot.insert(x_key.to_owned(), DomainValue::Number(x));
    slot.insert(y_key.to_owned(), DomainValue::Number(y));
    slot
}

fn aligned_record(x: f64, apple: f64, fb: f64) -> Record {
    Record::new(vec![
        slot("date", x, "apple", apple),
        slot("date", x, "fb", fb),
    ])
}

fn y_props() -> Vec<String> {
    vec!["apple".to_owned(), "fb".to_owned()]
}

#[test]
fn aligned_dataset_passes_shape_validation() {
    let dataset = Dataset::new(vec![aligned_record(1.0, 10.0, 20.0)]);
    assert!(dataset.validate_shape("date", &y_props()).is_ok());
}

#[test]
fn empty_dataset_passes_shape_validation() {
    assert!(Dataset::default().validate_shape("date", &y_props()).is_ok());
}

#[test]
fn slot_count_mismatch_is_a_configuration_error() {
    let dataset = Dataset::new(vec![Record::new(vec![slot("date", 1.0, "apple", 10.0)])]);
    let result = dataset.validate_shape("date", &y_props());
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn missing_x_key_is_a_configuration_error() {
    let mut bad = Slot::new();
    bad.insert("apple".to_owned(), DomainValue::Number(10.0));
    let dataset = Dataset::new(vec![Record::new(vec![bad, slot("date", 1.0, "fb", 20.0)])]);
    let result = dataset.validate_shape("date", &y_props());
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn missing_series_y_key_is_a_configuration_error() {
    // slot 1 carries the wrong series key
    let dataset = Dataset::new(vec![Record::new(vec![
        slot("date", 1.0, "apple", 10.0),
        slot("date", 1.0, "apple", 20.0),
    ])]);
    let result = dataset.validate_shape("date", &y_props());
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn json_records_parse_into_typed_values() {
    let json = r#"[
        [
            {"date": "2019-05-01T00:00:00Z", "apple": 210.5},
            {"date": "2019-05-01T00:00:00Z", "fb": 193.0}
        ],
        [
            {"date": "2019-05-02T00:00:00Z", "apple": 209.1},
            {"date": "2019-05-02T00:00:00Z", "fb": 192.5}
        ]
    ]"#;

    let dataset = Dataset::from_json_records(json).expect("parse dataset");
    assert_eq!(dataset.len(), 2);
    assert!(dataset.validate_shape("date", &y_props()).is_ok());

    let first = &dataset.records()[0];
    assert!(matches!(
        first.x_value("date"),
        Some(DomainValue::Time(_))
    ));
    assert_eq!(
        first.y_value(0, "apple"),
        Some(&DomainValue::Number(210.5))
    );
}

#[test]
fn malformed_json_is_invalid_data() {
    let result = Dataset::from_json_records("{not json");
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}
