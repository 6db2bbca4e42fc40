use arrow_array::{Array, StringArray};
use seriesguard::message::CollectingSink;
use seriesguard::registry::names;
use seriesguard::rules::CaseStyle;
use seriesguard::{Column, ReturnType, StringChecks, Value, validate_string};

#[test]
fn test_reports_every_failed_rule_in_one_message() {
    let sink = CollectingSink::default();
    let column = Column::new(
        "StringTest",
        vec![
            "abc".into(),
            "ABC ".into(),
            1.into(),
            Value::Missing,
        ],
    );
    let mut checks = StringChecks::default();
    checks
        .not_nullable()
        .with_case(CaseStyle::Lower)
        .no_trailing_whitespace()
        .matching_regex("a");
    validate_string(&column, &checks, &sink).unwrap();
    assert_eq!(
        sink.messages(),
        vec![
            "[RangeWarning]: 'StringTest': Non-string value(s) set as NaN; \
             NaN value(s); wrong case letter(s); trailing whitespace; \
             mismatch(es) for \"matching regular expression\"."
                .to_string()
        ]
    );
}

#[test]
fn test_non_string_values_are_flagged_and_nulled() {
    let sink = CollectingSink::default();
    let column = Column::new(
        "Mixed",
        vec![
            "apple".into(),
            Value::Bytes(b"pear".to_vec()),
            1.into(),
            2.5.into(),
            Value::Missing,
        ],
    );
    let mut checks = StringChecks::default();
    checks.returning(ReturnType::Values);
    let (projection, text) = validate_string(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert_eq!(text, "[RangeWarning]: 'Mixed': Non-string value(s) set as NaN.");
    let values = projection.as_values().unwrap();
    let values = values.as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(values.value(0), "apple");
    for i in 1..5 {
        assert!(values.is_null(i));
    }
}

#[test]
fn test_length_whitelist_and_blacklist_rules() {
    let sink = CollectingSink::default();
    let column = Column::new(
        "Fruit",
        vec![
            "apple".into(),
            "banana".into(),
            "fig".into(),
            "dragonfruit".into(),
            "blocked".into(),
        ],
    );
    let mut checks = StringChecks::default();
    checks
        .with_min_length(4)
        .with_max_length(8)
        .with_whitelist(vec![
            "apple".into(),
            "banana".into(),
            "fig".into(),
            "blocked".into(),
        ])
        .with_blacklist(vec!["blocked".into()])
        .returning(ReturnType::MaskFrame);
    let (projection, text) = validate_string(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert_eq!(
        text,
        "[RangeWarning]: 'Fruit': string(s) too short; string(s) too long; \
         string(s) not in whitelist; string(s) in blacklist."
    );
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
            names::TOO_SHORT,
            names::TOO_LONG,
            names::NOT_IN_WHITELIST,
            names::IN_BLACKLIST,
        ]
    );
}

#[test]
fn test_whitespace_rules_run_only_when_disallowed() {
    let column = Column::new(
        "Notes",
        vec!["two words".into(), "trailing ".into(), "with\nnewline".into()],
    );

    let silent = CollectingSink::default();
    validate_string(&column, &StringChecks::default(), &silent).unwrap();
    assert!(silent.messages().is_empty());

    let sink = CollectingSink::default();
    let mut checks = StringChecks::default();
    checks
        .no_newlines()
        .no_trailing_whitespace()
        .no_whitespace();
    validate_string(&column, &checks, &sink).unwrap();
    assert_eq!(
        sink.messages(),
        vec![
            "[RangeWarning]: 'Notes': newline character(s); trailing whitespace; \
             whitespace."
                .to_string()
        ]
    );
}

#[test]
fn test_unique_flags_repeated_strings() {
    let sink = CollectingSink::default();
    let column = Column::new(
        "Ids",
        vec!["a1".into(), "a2".into(), "a1".into(), Value::Missing],
    );
    let mut checks = StringChecks::default();
    checks.is_unique().returning(ReturnType::MaskSeries);
    let (projection, text) = validate_string(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    assert_eq!(text, "[RangeWarning]: 'Ids': duplicates.");
    let mask = projection.as_mask_series().unwrap();
    assert_eq!(
        mask.iter().collect::<Vec<_>>(),
        vec![Some(false), Some(false), Some(true), Some(false)]
    );
}

#[test]
fn test_non_matching_regex_flags_matches() {
    let sink = CollectingSink::default();
    let column = Column::new("Names", vec!["fine".into(), "forbidden".into()]);
    let mut checks = StringChecks::default();
    checks
        .non_matching_regex("forbid")
        .returning(ReturnType::MaskSeries);
    let (projection, _) = validate_string(&column, &checks, &sink)
        .unwrap()
        .unwrap();
    let mask = projection.as_mask_series().unwrap();
    assert_eq!(
        mask.iter().collect::<Vec<_>>(),
        vec![Some(false), Some(true)]
    );
}

#[test]
fn test_malformed_regex_is_an_error_not_a_diagnostic() {
    let sink = CollectingSink::default();
    let column = Column::new("Names", vec!["fine".into()]);
    let mut checks = StringChecks::default();
    checks.matching_regex("[unclosed");
    assert!(validate_string(&column, &checks, &sink).is_err());
    assert!(sink.messages().is_empty());
}

#[test]
fn test_numeric_storage_trips_the_datatype_gate() {
    let sink = CollectingSink::default();
    let column = Column::new("Labels", vec![1.into(), 2.into(), 3.into()]);
    validate_string(&column, &StringChecks::default(), &sink).unwrap();
    assert_eq!(
        sink.messages(),
        vec![
            "[DatatypeWarning]: 'Labels': Expected object, received int64. \
             Please address and re-validate."
                .to_string()
        ]
    );
}

#[test]
fn test_unnamed_columns_render_an_empty_name() {
    let sink = CollectingSink::default();
    let column = Column::unnamed(vec!["x ".into()]);
    let mut checks = StringChecks::default();
    checks.no_trailing_whitespace();
    validate_string(&column, &checks, &sink).unwrap();
    assert_eq!(
        sink.messages(),
        vec!["[RangeWarning]: '': trailing whitespace.".to_string()]
    );
}
