use arrow_array::{Array, Float64Array};
use seriesguard::message::CollectingSink;
use seriesguard::registry::names;
use seriesguard::{Column, NumericChecks, ReturnType, Value, validate_numeric};

fn numeric_test_column() -> Column {
    Column::new(
        "NumericTest",
        vec![
            13.into(),
            42.into(),
            73.into(),
            73.into(),
            3.14159.into(),
            1.1618033.into(),
            Value::Float(f64::NAN),
            Value::Missing,
        ],
    )
}

fn full_checks() -> NumericChecks {
    let mut checks = NumericChecks::default();
    checks
        .not_nullable()
        .is_unique()
        .is_integer()
        .min_value(15.0)
        .max_value(100.0);
    checks
}

#[test]
fn test_reports_every_failed_rule_in_one_message() {
    let sink = CollectingSink::default();
    let mut checks = full_checks();
    checks.returning(ReturnType::MaskSeries);
    let (_, text) = validate_numeric(&numeric_test_column(), &checks, &sink)
        .unwrap()
        .unwrap();
    let expected = "[RangeWarning]: 'NumericTest': NaN value(s); duplicates; \
                    non-integer(s); value(s) too low.";
    assert_eq!(text, expected);
    assert_eq!(sink.messages(), vec![expected.to_string()]);
}

#[test]
fn test_values_projection_nulls_every_flagged_row() {
    let sink = CollectingSink::default();
    let mut checks = full_checks();
    checks.returning(ReturnType::Values);
    let (projection, _) = validate_numeric(&numeric_test_column(), &checks, &sink)
        .unwrap()
        .unwrap();
    let values = projection.as_values().unwrap();
    let values = values.as_any().downcast_ref::<Float64Array>().unwrap();
    let collected: Vec<Option<f64>> = values.iter().collect();
    assert_eq!(
        collected,
        vec![None, Some(42.0), Some(73.0), None, None, None, None, None]
    );
}

#[test]
fn test_values_projection_is_idempotent() {
    let sink = CollectingSink::default();
    let mut checks = full_checks();
    checks.returning(ReturnType::Values);
    let (projection, _) = validate_numeric(&numeric_test_column(), &checks, &sink)
        .unwrap()
        .unwrap();
    let cleaned = projection.as_values().unwrap();
    let cleaned = cleaned.as_any().downcast_ref::<Float64Array>().unwrap();

    // Feed the cleaned values back through the same rules; nothing is left
    // to flag except the nulls, which the nullable default tolerates.
    let recycled = Column::new(
        "NumericTest",
        cleaned
            .iter()
            .map(|v| match v {
                Some(f) => Value::Float(f),
                None => Value::Missing,
            })
            .collect(),
    );
    let second_sink = CollectingSink::default();
    let mut relaxed = NumericChecks::default();
    relaxed
        .is_unique()
        .is_integer()
        .min_value(15.0)
        .max_value(100.0)
        .returning(ReturnType::Values);
    let (projection, text) = validate_numeric(&recycled, &relaxed, &second_sink)
        .unwrap()
        .unwrap();
    assert!(text.is_empty());
    assert!(second_sink.messages().is_empty());
    let again = projection.as_values().unwrap();
    let again = again.as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(
        again.iter().collect::<Vec<_>>(),
        cleaned.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_mask_frame_columns_follow_canonical_rule_order() {
    let sink = CollectingSink::default();
    // Setters applied in scrambled order must not affect the frame layout.
    let mut checks = NumericChecks::default();
    checks
        .max_value(100.0)
        .is_integer()
        .min_value(15.0)
        .is_unique()
        .not_nullable()
        .returning(ReturnType::MaskFrame);
    let (projection, _) = validate_numeric(&numeric_test_column(), &checks, &sink)
        .unwrap()
        .unwrap();
    let frame = projection.as_mask_frame().unwrap();
    let schema = frame.schema();
    let columns: Vec<&str> = schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    assert_eq!(
        columns,
        vec![
            names::INVALID_TYPE,
            names::ISNULL,
            names::NONUNIQUE,
            names::NONINTEGER,
            names::TOO_LOW,
            names::TOO_HIGH,
        ]
    );
    assert_eq!(frame.num_rows(), 8);
}

#[test]
fn test_bounds_are_inclusive() {
    let sink = CollectingSink::default();
    let column = Column::new("Bounds", vec![15.0.into(), 100.0.into(), 14.9.into()]);
    let mut checks = NumericChecks::default();
    checks
        .min_value(15.0)
        .max_value(100.0)
        .returning(ReturnType::MaskSeries);
    let (projection, text) = validate_numeric(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert_eq!(text, "[RangeWarning]: 'Bounds': value(s) too low.");
    let mask = projection.as_mask_series().unwrap();
    assert_eq!(
        mask.iter().collect::<Vec<_>>(),
        vec![Some(false), Some(false), Some(true)]
    );
}

#[test]
fn test_duplicates_flag_all_but_the_first_occurrence() {
    let sink = CollectingSink::default();
    let column = Column::new(
        "Dups",
        vec![73.0.into(), 73.0.into(), 73.0.into(), 42.0.into()],
    );
    let mut checks = NumericChecks::default();
    checks.is_unique().returning(ReturnType::MaskSeries);
    let (projection, _) = validate_numeric(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    let mask = projection.as_mask_series().unwrap();
    assert_eq!(mask.true_count(), 2);
    assert!(!mask.value(0));
}

#[test]
fn test_non_numeric_storage_trips_the_datatype_gate() {
    let sink = CollectingSink::default();
    let column = Column::new("NumericTest", vec![13.into(), "x".into(), 42.into()]);
    let mut checks = full_checks();
    checks.returning(ReturnType::MaskFrame);
    let (projection, text) = validate_numeric(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert_eq!(
        text,
        "[DatatypeWarning]: 'NumericTest': Expected numeric, received object. \
         Please address and re-validate."
    );
    assert_eq!(sink.messages().len(), 1);
    // Behind the gate only the coercion mask is recorded.
    let frame = projection.as_mask_frame().unwrap();
    assert_eq!(frame.num_columns(), 1);
    assert_eq!(frame.schema().field(0).name(), names::INVALID_TYPE);
}

#[test]
fn test_clean_column_emits_nothing() {
    let sink = CollectingSink::default();
    let column = Column::new("Clean", vec![15.into(), 42.into(), 100.into()]);
    let mut checks = full_checks();
    checks.returning(ReturnType::MaskSeries);
    let (projection, text) = validate_numeric(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert!(text.is_empty());
    assert!(sink.messages().is_empty());
    assert_eq!(projection.as_mask_series().unwrap().true_count(), 0);
}
