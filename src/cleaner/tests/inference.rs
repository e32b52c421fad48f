use super::*;
use crate::cleaner::inference::{classify, parse_bool, parse_datetime};
use anyhow::Result;
use chrono::NaiveDate;

fn infer(values: &[Option<&str>]) -> Column {
    infer_column(
        Column::text("c", values.iter().copied()),
        &InferenceSettings::default(),
    )
}

#[test]
fn test_integer_column() {
    let column = infer(&[Some("1"), Some(" 2 "), None, Some("40")]);
    assert_eq!(column.kind(), ColumnKind::Numeric);
    assert!(column.is_integer());
    assert_eq!(
        column.cells(),
        [Cell::Integer(1), Cell::Integer(2), Cell::Missing, Cell::Integer(40)]
    );
}

#[test]
fn test_mixed_numbers_become_float() {
    let column = infer(&[Some("1"), Some("2.5"), Some("-3e2")]);
    assert_eq!(column.kind(), ColumnKind::Numeric);
    assert_eq!(
        column.cells(),
        [Cell::Float(1.0), Cell::Float(2.5), Cell::Float(-300.0)]
    );
}

#[test]
fn test_integral_floats_stay_integer() {
    let column = infer(&[Some("1.0"), Some("2")]);
    assert_eq!(column.cells(), [Cell::Integer(1), Cell::Integer(2)]);
}

#[test]
fn test_one_bad_value_fails_closed() {
    let column = infer(&[Some("1"), Some("2"), Some("three")]);
    assert_eq!(column.kind(), ColumnKind::Text);
    assert_eq!(column.cells()[0], Cell::text("1"));
}

#[test]
fn test_boolean_tokens() {
    let column = infer(&[Some("Yes"), Some("no"), Some("TRUE"), None]);
    assert_eq!(column.kind(), ColumnKind::Boolean);
    assert_eq!(
        column.cells(),
        [
            Cell::Boolean(true),
            Cell::Boolean(false),
            Cell::Boolean(true),
            Cell::Missing
        ]
    );
    assert_eq!(parse_bool(" f "), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}

#[test]
fn test_zero_one_column_is_boolean() {
    let column = infer(&[Some("1"), Some("0"), Some("1")]);
    assert_eq!(column.kind(), ColumnKind::Boolean);
}

#[test]
fn test_dates() -> Result<()> {
    let column = infer(&[Some("2024-01-05"), Some("2024-02-10 08:30:00"), None]);
    assert_eq!(column.kind(), ColumnKind::DateTime);

    let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow::anyhow!("bad date"))?;
    assert_eq!(column.cells()[0], Cell::DateTime(expected));
    assert_eq!(column.cells()[0].render().as_deref(), Some("2024-01-05"));
    assert_eq!(
        column.cells()[1].render().as_deref(),
        Some("2024-02-10 08:30:00")
    );

    assert!(parse_datetime("03/15/2023").is_some());
    assert!(parse_datetime("2023-03-15T10:00:00Z").is_some());
    assert!(parse_datetime("not a date").is_none());
    Ok(())
}

#[test]
fn test_iso_minutes_without_seconds() -> Result<()> {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .ok_or_else(|| anyhow::anyhow!("bad date"))?;
    assert_eq!(parse_datetime("2024-01-05T10:30"), Some(expected));

    let raw = [Some("2024-01-05T10:30"), None, Some("2024-02-10T08:05")];
    assert_eq!(
        classify(&raw, &InferenceSettings::default()),
        ColumnKind::DateTime
    );
    Ok(())
}

#[test]
fn test_categorical_needs_enough_rows() {
    let settings = InferenceSettings::default();
    let repeated: Vec<Option<&str>> = ["red", "green", "blue"]
        .into_iter()
        .cycle()
        .take(12)
        .map(Some)
        .collect();
    assert_eq!(classify(&repeated, &settings), ColumnKind::Categorical);

    let few: Vec<Option<&str>> = repeated.iter().copied().take(10).collect();
    assert_eq!(classify(&few, &settings), ColumnKind::Text);

    let column = infer_column(Column::text("c", repeated), &settings);
    assert_eq!(column.levels(), ["red", "green", "blue"]);
}

#[test]
fn test_high_cardinality_stays_text() {
    let values: Vec<String> = (0..20).map(|i| format!("name {i}")).collect();
    let raw: Vec<Option<&str>> = values.iter().map(|s| Some(s.as_str())).collect();
    assert_eq!(
        classify(&raw, &InferenceSettings::default()),
        ColumnKind::Text
    );
}

#[test]
fn test_all_missing_column_is_unchanged() {
    let column = infer(&[None, None]);
    assert_eq!(column.kind(), ColumnKind::Text);
    assert_eq!(column.missing_count(), 2);
}

#[test]
fn test_typed_columns_are_left_alone() {
    let column = integer_column("n", &[Some(1), Some(2)]);
    let inferred = infer_column(column.clone(), &InferenceSettings::default());
    assert_eq!(inferred, column);
}

#[test]
fn test_standardize_types_logs_changes() {
    let table = text_table(
        &["id", "name", "active"],
        &[
            &[Some("1"), Some("Ann"), Some("yes")],
            &[Some("2"), Some("Bob"), Some("no")],
        ],
    );
    let mut log = TransformLog::new();
    let (table, changes) = standardize_types(table, &InferenceSettings::default(), &mut log);

    assert_eq!(table.columns()[0].kind(), ColumnKind::Numeric);
    assert_eq!(table.columns()[1].kind(), ColumnKind::Text);
    assert_eq!(table.columns()[2].kind(), ColumnKind::Boolean);
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].column, "id");
    assert_eq!(changes[0].from, ColumnKind::Text);
    assert_eq!(changes[0].to, ColumnKind::Numeric);
    assert_eq!(log.len(), 3);
    assert_eq!(log.entries()[2].details, "Standardized 2 column types");
}

#[test]
fn test_standardize_types_on_empty_table() {
    let mut log = TransformLog::new();
    let (_, changes) = standardize_types(Table::default(), &InferenceSettings::default(), &mut log);
    assert!(changes.is_empty());
    assert!(log.is_empty());
}
