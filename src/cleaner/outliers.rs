//! Outlier detection over numeric columns.
//!
//! Each numeric column is analysed on its own, over non-missing values only.
//! A row is removed when any column flags it.

use super::inference::numeric_reading;
use super::stats;
use super::table::{ColumnKind, Table};
use super::types::{DEFAULT_ZSCORE_THRESHOLD, OutlierMethod, TransformLog};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const IQR_FACTOR: f64 = 1.5;

/// Removal share above which a warning is emitted.
const HIGH_REMOVAL_PCT: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum OutlierRule {
    ZScore { threshold: f64 },
    Iqr,
}

impl OutlierRule {
    pub fn new(method: OutlierMethod, threshold: f64) -> Self {
        match method {
            OutlierMethod::ZScore => Self::ZScore { threshold },
            OutlierMethod::Iqr => Self::Iqr,
        }
    }

    pub fn method(&self) -> OutlierMethod {
        match self {
            Self::ZScore { .. } => OutlierMethod::ZScore,
            Self::Iqr => OutlierMethod::Iqr,
        }
    }
}

impl Default for OutlierRule {
    fn default() -> Self {
        Self::ZScore {
            threshold: DEFAULT_ZSCORE_THRESHOLD,
        }
    }
}

/// Statistics a column was judged against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum OutlierStats {
    ZScore {
        mean: f64,
        std: f64,
        threshold: f64,
    },
    Iqr {
        q1: f64,
        q3: f64,
        lower: f64,
        upper: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    pub flagged: usize,
    pub stats: Option<OutlierStats>,
    pub skipped: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub rule: OutlierRule,
    pub columns: Vec<ColumnOutliers>,
    pub columns_analyzed: usize,
    pub total_rows: usize,
    /// Distinct rows flagged by at least one column.
    pub rows_flagged: usize,
    pub removal_percentage: f64,
}

impl OutlierReport {
    fn new(rule: OutlierRule, total_rows: usize) -> Self {
        Self {
            rule,
            columns: Vec::new(),
            columns_analyzed: 0,
            total_rows,
            rows_flagged: 0,
            removal_percentage: 0.0,
        }
    }
}

fn column_stats(values: &[f64], rule: OutlierRule) -> Result<OutlierStats, &'static str> {
    match rule {
        OutlierRule::ZScore { threshold } => {
            let mean = stats::mean(values).ok_or("no values")?;
            let std = stats::std_dev(values).ok_or("fewer than two values")?;
            if std == 0.0 {
                return Err("zero standard deviation");
            }
            Ok(OutlierStats::ZScore {
                mean,
                std,
                threshold,
            })
        }
        OutlierRule::Iqr => {
            let q1 = stats::quantile(values, 0.25).ok_or("no values")?;
            let q3 = stats::quantile(values, 0.75).ok_or("no values")?;
            let iqr = q3 - q1;
            if iqr == 0.0 {
                return Err("zero interquartile range");
            }
            Ok(OutlierStats::Iqr {
                q1,
                q3,
                lower: q1 - IQR_FACTOR * iqr,
                upper: q3 + IQR_FACTOR * iqr,
            })
        }
    }
}

impl OutlierStats {
    pub fn is_outlier(&self, value: f64) -> bool {
        match *self {
            Self::ZScore {
                mean,
                std,
                threshold,
            } => ((value - mean) / std).abs() > threshold,
            Self::Iqr { lower, upper, .. } => value < lower || value > upper,
        }
    }
}

/// Per-row flags plus the report. Nothing is removed.
fn analyse(table: &Table, rule: OutlierRule) -> (Vec<bool>, OutlierReport) {
    let mut flagged = vec![false; table.height()];
    let mut report = OutlierReport::new(rule, table.height());

    for original in table.columns() {
        // Text columns that hold numbers are analysed through their numeric reading.
        let column = match original.kind() {
            ColumnKind::Numeric => Cow::Borrowed(original),
            ColumnKind::Text => match numeric_reading(original) {
                Some(reading) => Cow::Owned(reading),
                None => continue,
            },
            _ => continue,
        };
        report.columns_analyzed += 1;
        let values = column.numeric_values();
        let plain: Vec<f64> = values.iter().map(|(_, v)| *v).collect();

        match column_stats(&plain, rule) {
            Ok(col_stats) => {
                let mut count = 0;
                for (idx, value) in &values {
                    if col_stats.is_outlier(*value) {
                        count += 1;
                        if let Some(flag) = flagged.get_mut(*idx) {
                            *flag = true;
                        }
                    }
                }
                report.columns.push(ColumnOutliers {
                    column: column.name().to_owned(),
                    flagged: count,
                    stats: Some(col_stats),
                    skipped: None,
                });
            }
            Err(reason) => report.columns.push(ColumnOutliers {
                column: column.name().to_owned(),
                flagged: 0,
                stats: None,
                skipped: Some(reason.to_owned()),
            }),
        }
    }

    report.rows_flagged = flagged.iter().filter(|f| **f).count();
    if report.total_rows > 0 {
        report.removal_percentage = report.rows_flagged as f64 / report.total_rows as f64 * 100.0;
    }
    (flagged, report)
}

/// Report outliers without removing them.
pub fn detect_outliers(table: &Table, rule: OutlierRule) -> OutlierReport {
    analyse(table, rule).1
}

pub fn remove_outliers(
    table: Table,
    rule: OutlierRule,
    log: &mut TransformLog,
) -> (Table, OutlierReport) {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping outlier removal");
        return (table, OutlierReport::new(rule, 0));
    }

    let (flagged, report) = analyse(&table, rule);
    if report.columns_analyzed == 0 {
        log.push("drop_outliers", "No numeric columns to check for outliers");
        return (table, report);
    }

    let keep: Vec<bool> = flagged.iter().map(|f| !f).collect();
    let cleaned = table.filter_rows(&keep);

    let method = rule.method();
    let summary = match rule {
        OutlierRule::ZScore { threshold } => format!(
            "Removed {} rows with outliers using {method} (threshold {threshold}), {:.1}% of rows",
            report.rows_flagged, report.removal_percentage
        ),
        OutlierRule::Iqr => format!(
            "Removed {} rows with outliers using {method}, {:.1}% of rows",
            report.rows_flagged, report.removal_percentage
        ),
    };
    log.push("drop_outliers", summary);

    for col in &report.columns {
        match (&col.skipped, col.flagged) {
            (Some(reason), _) => log.push(
                "drop_outliers",
                format!("Skipped '{}': {reason}", col.column),
            ),
            (None, 0) => {}
            (None, n) => log.push(
                "drop_outliers",
                format!("Column '{}': {n} outliers flagged", col.column),
            ),
        }
    }

    if report.removal_percentage > HIGH_REMOVAL_PCT {
        tracing::warn!(
            "Outlier removal dropped {:.1}% of rows ({} of {})",
            report.removal_percentage,
            report.rows_flagged,
            report.total_rows
        );
    }

    (cleaned, report)
}
