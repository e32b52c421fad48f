//! Read-only analysis of a table: missing data, inferred types, header
//! problems and outliers. Nothing here changes the table.

use super::inference::{InferenceSettings, infer_column};
use super::naming::{NameIssues, name_changes, sanitize_column_names, validate_column_names};
use super::outliers::{OutlierReport, OutlierRule, OutlierStats, detect_outliers};
use super::table::{ColumnKind, Table, TableSummary};
use super::types::NameChange;
use crate::utils::fmt_opt;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissingReport {
    pub total_missing: usize,
    pub rows_with_missing: usize,
    pub columns: Vec<ColumnMissing>,
}

pub fn missing_report(table: &Table) -> MissingReport {
    let rows = table.height();
    let columns = table
        .columns()
        .iter()
        .filter(|c| c.has_missing())
        .map(|c| ColumnMissing {
            column: c.name().to_owned(),
            missing: c.missing_count(),
            percentage: if rows == 0 {
                0.0
            } else {
                c.missing_count() as f64 / rows as f64 * 100.0
            },
        })
        .collect();
    let rows_with_missing = (0..rows)
        .filter(|idx| table.row(*idx).iter().any(|c| c.is_missing()))
        .count();

    MissingReport {
        total_missing: table.missing_count(),
        rows_with_missing,
        columns,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnType {
    pub column: String,
    pub current: ColumnKind,
    pub inferred: ColumnKind,
    pub levels: Option<usize>,
}

/// Current kind of each column next to the kind inference would give it.
pub fn type_report(table: &Table, settings: &InferenceSettings) -> Vec<ColumnType> {
    table
        .columns()
        .iter()
        .map(|c| {
            let inferred = infer_column(c.clone(), settings);
            ColumnType {
                column: c.name().to_owned(),
                current: c.kind(),
                inferred: inferred.kind(),
                levels: (inferred.kind() == ColumnKind::Categorical)
                    .then(|| inferred.levels().len()),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamesReport {
    pub issues: NameIssues,
    pub suggested: Vec<NameChange>,
}

pub fn names_report(table: &Table) -> NamesReport {
    let original = table.column_names();
    let renamed = sanitize_column_names(&original);
    NamesReport {
        issues: validate_column_names(&original),
        suggested: name_changes(&original, &renamed),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataReport {
    pub summary: TableSummary,
    pub missing: MissingReport,
    pub types: Vec<ColumnType>,
    pub names: NamesReport,
    pub outliers: Option<OutlierReport>,
}

/// Build every report. Outliers are measured on the type-inferred table so
/// numeric columns loaded as text are still analysed.
pub fn build_report(
    table: &Table,
    settings: &InferenceSettings,
    outlier_rule: Option<OutlierRule>,
) -> DataReport {
    let outliers = outlier_rule.map(|rule| {
        let typed = Table::from_columns_unchecked(
            table
                .columns()
                .iter()
                .map(|c| infer_column(c.clone(), settings))
                .collect(),
        );
        detect_outliers(&typed, rule)
    });

    DataReport {
        summary: table.summary(),
        missing: missing_report(table),
        types: type_report(table, settings),
        names: names_report(table),
        outliers,
    }
}

impl fmt::Display for DataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rows: {}  Columns: {}  Missing cells: {}",
            self.summary.rows, self.summary.columns, self.summary.missing_cells
        )?;

        writeln!(f, "\nMissing data")?;
        if self.missing.columns.is_empty() {
            writeln!(f, "  none")?;
        }
        for col in &self.missing.columns {
            writeln!(
                f,
                "  {:<24} {:>6} ({:.1}%)",
                col.column, col.missing, col.percentage
            )?;
        }
        if self.missing.rows_with_missing > 0 {
            writeln!(
                f,
                "  {} rows have at least one missing value",
                self.missing.rows_with_missing
            )?;
        }

        writeln!(f, "\nTypes")?;
        for col in &self.types {
            match col.levels {
                Some(levels) => writeln!(
                    f,
                    "  {:<24} {} -> {} ({levels} levels)",
                    col.column, col.current, col.inferred
                )?,
                None => writeln!(f, "  {:<24} {} -> {}", col.column, col.current, col.inferred)?,
            }
        }

        writeln!(f, "\nColumn names")?;
        if self.names.suggested.is_empty() {
            writeln!(f, "  all names are clean")?;
        }
        for change in &self.names.suggested {
            writeln!(f, "  '{}' -> '{}'", change.original, change.renamed)?;
        }

        if let Some(outliers) = &self.outliers {
            writeln!(f, "\nOutliers ({})", outliers.rule.method())?;
            for col in &outliers.columns {
                match &col.skipped {
                    Some(reason) => writeln!(f, "  {:<24} skipped: {reason}", col.column)?,
                    None => writeln!(
                        f,
                        "  {:<24} {:>6} flagged  {}",
                        col.column,
                        col.flagged,
                        describe_stats(col.stats.as_ref())
                    )?,
                }
            }
            writeln!(
                f,
                "  {} of {} rows would be removed ({:.1}%)",
                outliers.rows_flagged, outliers.total_rows, outliers.removal_percentage
            )?;
        }
        Ok(())
    }
}

fn describe_stats(stats: Option<&OutlierStats>) -> String {
    match stats {
        Some(OutlierStats::ZScore { mean, std, .. }) => {
            format!("mean {} std {}", fmt_opt(Some(*mean)), fmt_opt(Some(*std)))
        }
        Some(OutlierStats::Iqr { lower, upper, .. }) => {
            format!("bounds [{}, {}]", fmt_opt(Some(*lower)), fmt_opt(Some(*upper)))
        }
        None => fmt_opt(None),
    }
}
