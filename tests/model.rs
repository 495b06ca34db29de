use chrono::NaiveDate;
use ledger_tools::classify::RowClass;
use ledger_tools::model::{CellValue, RowTuple, serial_to_datetime};

#[test]
fn date_serials_convert_to_calendar_time() {
    let expected = NaiveDate::from_ymd_opt(2025, 11, 15)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid timestamp");

    assert_eq!(serial_to_datetime(45976.5), Some(expected));
}

#[test]
fn out_of_range_serials_are_rejected() {
    assert_eq!(serial_to_datetime(-1e300), None);
    assert_eq!(serial_to_datetime(1e300), None);
    assert_eq!(serial_to_datetime(f64::NAN), None);
    assert_eq!(serial_to_datetime(f64::NEG_INFINITY), None);

    let cell = CellValue::DateTime(-1e300);
    assert!(cell.to_string().starts_with("datetime(-1000"));
    assert!(cell.order_id().is_some());
}

#[test]
fn raw_values_print_as_tuples() {
    let row = vec![
        CellValue::String("it's".into()),
        CellValue::Float(2.0),
        CellValue::Int(7),
        CellValue::Bool(true),
        CellValue::Bool(false),
        CellValue::Empty,
        CellValue::Error("#N/A".into()),
    ];

    assert_eq!(
        RowTuple(&row).to_string(),
        r"('it\'s', 2.0, 7, True, False, None, error(#N/A))"
    );
}

#[test]
fn zero_and_false_are_not_identifiers() {
    assert_eq!(CellValue::Int(0).order_id(), None);
    assert_eq!(CellValue::Float(0.0).order_id(), None);
    assert_eq!(CellValue::Bool(false).order_id(), None);
    assert_eq!(CellValue::String("0".into()).order_id().as_deref(), Some("0"));
    assert_eq!(CellValue::Bool(true).order_id().as_deref(), Some("true"));
}

#[test]
fn row_classes_have_readable_labels() {
    let labels: Vec<String> = [
        RowClass::None,
        RowClass::Mom,
        RowClass::Other,
        RowClass::Duplicate,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    assert_eq!(labels, vec!["none", "mom", "other", "duplicate"]);
}
