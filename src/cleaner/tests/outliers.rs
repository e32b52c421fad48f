use super::*;
use proptest::prelude::*;

fn single(values: &[f64]) -> Table {
    Table::new(vec![numeric_column("x", values)]).unwrap()
}

fn values_of(table: &Table) -> Vec<f64> {
    table.columns()[0]
        .numeric_values()
        .into_iter()
        .map(|(_, v)| v)
        .collect()
}

#[test]
fn test_zscore_removes_extreme_value() {
    // With five values |z| can never reach 2, so the short column needs a
    // lower threshold.
    let table = single(&[10.0, 12.0, 11.0, 13.0, 1000.0]);
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::ZScore { threshold: 1.5 }, &mut log);

    assert_eq!(values_of(&cleaned), [10.0, 12.0, 11.0, 13.0]);
    assert_eq!(report.rows_flagged, 1);
    assert_eq!(report.columns_analyzed, 1);
    assert!((report.removal_percentage - 20.0).abs() < 1e-9);
}

#[test]
fn test_zscore_default_threshold_on_longer_column() {
    let mut values: Vec<f64> = [10.0, 12.0].into_iter().cycle().take(20).collect();
    values.push(1000.0);
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(single(&values), OutlierRule::default(), &mut log);

    assert_eq!(cleaned.height(), 20);
    assert!(!values_of(&cleaned).contains(&1000.0));
    match report.columns[0].stats {
        Some(OutlierStats::ZScore { threshold, .. }) => assert_eq!(threshold, 3.0),
        ref other => panic!("unexpected stats: {other:?}"),
    }
}

#[test]
fn test_five_values_survive_default_threshold() {
    let table = single(&[10.0, 12.0, 11.0, 13.0, 1000.0]);
    let report = detect_outliers(&table, OutlierRule::default());
    assert_eq!(report.rows_flagged, 0);
}

#[test]
fn test_iqr_bounds() {
    let table = single(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0]);
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::Iqr, &mut log);

    assert_eq!(cleaned.height(), 9);
    match report.columns[0].stats {
        Some(OutlierStats::Iqr { q1, q3, lower, upper }) => {
            assert_eq!(q1, 3.25);
            assert_eq!(q3, 7.75);
            assert_eq!(lower, -3.5);
            assert_eq!(upper, 14.5);
        }
        ref other => panic!("unexpected stats: {other:?}"),
    }
}

#[test]
fn test_constant_column_is_skipped() {
    let table = single(&[5.0, 5.0, 5.0]);
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::default(), &mut log);
    assert_eq!(cleaned.height(), 3);
    assert_eq!(
        report.columns[0].skipped.as_deref(),
        Some("zero standard deviation")
    );
    assert!(log.entries().iter().any(|e| e.details.starts_with("Skipped 'x'")));
}

#[test]
fn test_union_of_flagged_rows_and_missing_cells() {
    let a = Column::new(
        "a",
        ColumnKind::Numeric,
        vec![
            Cell::Float(1.0),
            Cell::Float(2.0),
            Cell::Missing,
            Cell::Float(3.0),
            Cell::Float(2.0),
            Cell::Float(500.0),
        ],
    );
    let b = numeric_column("b", &[-400.0, 1.0, 2.0, 3.0, 2.0, 1.0]);
    let table = Table::new(vec![a, b, Column::text("t", [Some("k"); 6])]).unwrap();

    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::ZScore { threshold: 1.5 }, &mut log);

    assert_eq!(report.columns_analyzed, 2);
    assert_eq!(report.rows_flagged, 2);
    assert_eq!(cleaned.height(), 4);
    assert!(cleaned.columns()[0].cells()[1].is_missing());
}

#[test]
fn test_no_numeric_columns() {
    let table = text_table(&["a"], &[&[Some("x")]]);
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::Iqr, &mut log);
    assert_eq!(cleaned.height(), 1);
    assert_eq!(report.columns_analyzed, 0);
    assert_eq!(
        log.entries()[0].details,
        "No numeric columns to check for outliers"
    );
}

#[test]
fn test_unknown_method_is_rejected() {
    let err = "dbscan".parse::<OutlierMethod>().unwrap_err();
    assert!(err.to_string().contains("drop_outliers"));
    assert_eq!("IQR".parse::<OutlierMethod>().unwrap(), OutlierMethod::Iqr);
}

proptest! {
    #[test]
    fn prop_zscore_retained_rows_within_threshold(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 2..40),
        threshold in 0.5f64..4.0,
    ) {
        let rule = OutlierRule::ZScore { threshold };
        let mut log = TransformLog::new();
        let (cleaned, report) = remove_outliers(single(&values), rule, &mut log);
        if let Some(OutlierStats::ZScore { mean, std, .. }) = report.columns[0].stats {
            for v in values_of(&cleaned) {
                prop_assert!(((v - mean) / std).abs() <= threshold);
            }
        }
    }

    #[test]
    fn prop_iqr_retained_rows_within_bounds(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..40),
    ) {
        let mut log = TransformLog::new();
        let (cleaned, report) = remove_outliers(single(&values), OutlierRule::Iqr, &mut log);
        if let Some(OutlierStats::Iqr { lower, upper, .. }) = report.columns[0].stats {
            for v in values_of(&cleaned) {
                prop_assert!(v >= lower && v <= upper);
            }
        }
    }
}

#[test]
fn test_numbers_held_as_text_are_checked() {
    let table = text_table(
        &["x", "label"],
        &[
            &[Some("10"), Some("a")],
            &[Some("12"), Some("b")],
            &[None, Some("c")],
            &[Some("11"), Some("d")],
            &[Some("13"), Some("e")],
            &[Some("1000"), Some("f")],
        ],
    );
    let mut log = TransformLog::new();
    let (cleaned, report) = remove_outliers(table, OutlierRule::Iqr, &mut log);

    assert_eq!(report.columns_analyzed, 1);
    assert_eq!(report.rows_flagged, 1);
    assert_eq!(cleaned.height(), 5);
    // Kept cells are not converted.
    assert_eq!(cleaned.columns()[0].kind(), ColumnKind::Text);
    assert_eq!(cleaned.columns()[1].cells()[4], Cell::text("e"));
}
