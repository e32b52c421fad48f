#![expect(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::indexing_slicing
)]
use super::*;

mod inference;
mod intent;
mod naming;
mod outliers;

/// Text table from string literals; `""` is not special, use `None` for missing.
pub(crate) fn text_table(headers: &[&str], rows: &[&[Option<&str>]]) -> Table {
    Table::from_records(headers, rows.iter().map(|r| r.to_vec())).unwrap()
}

pub(crate) fn numeric_column(name: &str, values: &[f64]) -> Column {
    Column::new(
        name,
        ColumnKind::Numeric,
        values.iter().map(|v| Cell::Float(*v)).collect(),
    )
}

pub(crate) fn integer_column(name: &str, values: &[Option<i64>]) -> Column {
    Column::new(
        name,
        ColumnKind::Numeric,
        values
            .iter()
            .map(|v| v.map_or(Cell::Missing, Cell::Integer))
            .collect(),
    )
}

#[test]
fn test_table_rejects_ragged_columns() {
    let result = Table::new(vec![
        Column::text("a", [Some("1"), Some("2")]),
        Column::text("b", [Some("1")]),
    ]);
    assert!(matches!(result, Err(crate::error::CleanerError::DataProcessing(_))));
}

#[test]
fn test_missing_is_distinct_from_empty_string() {
    let table = text_table(&["a"], &[&[Some("")], &[None]]);
    assert_eq!(table.missing_count(), 1);
    assert_eq!(table.columns()[0].cells()[0], Cell::text(""));
}

#[test]
fn test_preview_renders_missing_as_none() {
    let table = text_table(&["a", "b"], &[&[Some("x"), None], &[Some("y"), Some("z")]]);
    let preview = table.preview(1);
    assert_eq!(preview.columns, ["a", "b"]);
    assert_eq!(preview.rows, vec![vec![Some("x".to_owned()), None]]);
}

#[test]
fn test_categorical_levels_are_first_seen() {
    let column = Column::new(
        "c",
        ColumnKind::Categorical,
        vec![Cell::text("b"), Cell::Missing, Cell::text("a"), Cell::text("b")],
    );
    assert_eq!(column.levels(), ["b", "a"]);
}
