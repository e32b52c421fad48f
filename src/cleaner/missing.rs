use super::inference::numeric_reading;
use super::stats;
use super::table::{Cell, Column, ColumnKind, Table};
use super::types::{ImputeStrategy, TransformLog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What happened to one column during imputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnImputation {
    pub column: String,
    pub filled: usize,
    pub fill_value: Option<String>,
    pub skipped: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub strategy: Option<ImputeStrategy>,
    pub columns: Vec<ColumnImputation>,
    pub rows_removed: usize,
}

impl ImputationReport {
    pub fn cells_filled(&self) -> usize {
        self.columns.iter().map(|c| c.filled).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ColumnImputation> {
        self.columns.iter().filter(|c| c.skipped.is_some())
    }
}

pub fn impute(
    table: Table,
    strategy: ImputeStrategy,
    log: &mut TransformLog,
) -> (Table, ImputationReport) {
    let mut report = ImputationReport {
        strategy: Some(strategy),
        ..Default::default()
    };

    if table.is_empty() {
        tracing::warn!("Table is empty, skipping missing value handling");
        return (table, report);
    }
    if table.missing_count() == 0 {
        log.push("fix_missing", "No missing values found");
        return (table, report);
    }

    if strategy == ImputeStrategy::Drop {
        let keep: Vec<bool> = (0..table.height())
            .map(|idx| table.row(idx).iter().all(|c| !c.is_missing()))
            .collect();
        let cleaned = table.filter_rows(&keep);
        report.rows_removed = table.height() - cleaned.height();
        log.push(
            "fix_missing",
            format!(
                "Dropped {} rows with missing values ({} rows remaining)",
                report.rows_removed,
                cleaned.height()
            ),
        );
        return (cleaned, report);
    }

    let mut columns = Vec::with_capacity(table.width());
    let mut details = Vec::new();
    for column in table.into_columns() {
        if !column.has_missing() {
            columns.push(column);
            continue;
        }

        // Mean and median read numbers out of text columns that hold them.
        let column = match strategy {
            ImputeStrategy::Mean | ImputeStrategy::Median => {
                numeric_reading(&column).unwrap_or(column)
            }
            ImputeStrategy::Mode | ImputeStrategy::Drop => column,
        };

        match fill_value(&column, strategy) {
            Ok(fill) => {
                let (filled_column, filled) = fill_column(column, &fill);
                let rendered = fill.render();
                details.push(format!(
                    "Filled {filled} missing values in '{}' with {strategy} ({})",
                    filled_column.name(),
                    rendered.as_deref().unwrap_or_default()
                ));
                report.columns.push(ColumnImputation {
                    column: filled_column.name().to_owned(),
                    filled,
                    fill_value: rendered,
                    skipped: None,
                });
                columns.push(filled_column);
            }
            Err(reason) => {
                details.push(format!("Skipped '{}': {reason}", column.name()));
                report.columns.push(ColumnImputation {
                    column: column.name().to_owned(),
                    filled: 0,
                    fill_value: None,
                    skipped: Some(reason.to_owned()),
                });
                columns.push(column);
            }
        }
    }

    log.push(
        "fix_missing",
        format!(
            "Filled {} missing values using {strategy}",
            report.cells_filled()
        ),
    );
    for detail in details {
        log.push("fix_missing", detail);
    }

    (Table::from_columns_unchecked(columns), report)
}

fn fill_value(column: &Column, strategy: ImputeStrategy) -> Result<Cell, &'static str> {
    match strategy {
        ImputeStrategy::Mean | ImputeStrategy::Median => {
            if column.kind() != ColumnKind::Numeric {
                return Err("not numeric");
            }
            let values: Vec<f64> = column.numeric_values().into_iter().map(|(_, v)| v).collect();
            let stat = if strategy == ImputeStrategy::Mean {
                stats::mean(&values)
            } else {
                stats::median(&values)
            };
            let stat = stat.ok_or("no non-missing values")?;
            if column.is_integer() && stat.fract() == 0.0 {
                Ok(Cell::Integer(stat as i64))
            } else {
                Ok(Cell::Float(stat))
            }
        }
        ImputeStrategy::Mode => most_frequent(column.cells()).ok_or("no non-missing values"),
        ImputeStrategy::Drop => Err("drop works on rows"),
    }
}

/// Most frequent non-missing cell. Ties go to the value observed first.
pub fn most_frequent(cells: &[Cell]) -> Option<Cell> {
    // (count, first row) per distinct value, in first-seen order
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<(usize, usize)> = Vec::new();
    for (idx, cell) in cells.iter().enumerate() {
        if cell.is_missing() {
            continue;
        }
        let slot = *slots.entry(cell.key()).or_insert_with(|| {
            tallies.push((0, idx));
            tallies.len() - 1
        });
        if let Some(tally) = tallies.get_mut(slot) {
            tally.0 += 1;
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for &(count, idx) in &tallies {
        if best.is_none_or(|(best_count, _)| count > best_count) {
            best = Some((count, idx));
        }
    }
    cells.get(best?.1).cloned()
}

fn fill_column(column: Column, fill: &Cell) -> (Column, usize) {
    let (name, kind, cells) = column.into_parts();
    let promote = matches!(fill, Cell::Float(_));
    let mut filled = 0;
    let cells = cells
        .into_iter()
        .map(|cell| match cell {
            Cell::Missing => {
                filled += 1;
                fill.clone()
            }
            Cell::Integer(v) if promote => Cell::Float(v as f64),
            other => other,
        })
        .collect();
    (Column::new(name, kind, cells), filled)
}
