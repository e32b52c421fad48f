//! Column type inference.
//!
//! Text columns are tested against a fixed, ordered list of candidate kinds.
//! The first candidate that converts every non-missing value wins; a single
//! value that does not fit rejects the candidate outright and nothing is
//! partially converted. Columns that already carry a typed kind are left alone.

use super::table::{Cell, Column, ColumnKind, Table};
use super::types::{TransformLog, TypeChange};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BOOLEAN_TRUE: [&str; 5] = ["true", "yes", "1", "t", "y"];
const BOOLEAN_FALSE: [&str; 5] = ["false", "no", "0", "f", "n"];

const DATETIME_LAYOUTS: [&str; 11] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Integers above this magnitude cannot round-trip through `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Thresholds for treating a low-cardinality text column as categorical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// A column needs strictly more rows than this to be categorical.
    pub categorical_min_rows: usize,
    /// Distinct values must stay below this fraction of the row count.
    pub categorical_max_ratio: f64,
    /// Hard cap on the number of distinct values.
    pub categorical_max_levels: usize,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            categorical_min_rows: 10,
            categorical_max_ratio: 0.5,
            categorical_max_levels: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Candidate {
    Boolean,
    DateTime,
    Numeric,
    Categorical,
}

const CANDIDATES: [Candidate; 4] = [
    Candidate::Boolean,
    Candidate::DateTime,
    Candidate::Numeric,
    Candidate::Categorical,
];

impl Candidate {
    fn kind(self) -> ColumnKind {
        match self {
            Self::Boolean => ColumnKind::Boolean,
            Self::DateTime => ColumnKind::DateTime,
            Self::Numeric => ColumnKind::Numeric,
            Self::Categorical => ColumnKind::Categorical,
        }
    }

    fn try_convert(self, raw: &[Option<&str>], settings: &InferenceSettings) -> Option<Vec<Cell>> {
        match self {
            Self::Boolean => convert_all(raw, |s| parse_bool(s).map(Cell::Boolean)),
            Self::DateTime => convert_all(raw, |s| parse_datetime(s).map(Cell::DateTime)),
            Self::Numeric => convert_numeric(raw),
            Self::Categorical => is_low_cardinality(raw, settings).then(|| {
                raw.iter()
                    .map(|v| v.map_or(Cell::Missing, Cell::text))
                    .collect()
            }),
        }
    }
}

fn convert_all<F>(raw: &[Option<&str>], parse: F) -> Option<Vec<Cell>>
where
    F: Fn(&str) -> Option<Cell>,
{
    raw.iter()
        .map(|v| match v {
            None => Some(Cell::Missing),
            Some(s) => parse(s),
        })
        .collect()
}

pub fn parse_bool(value: &str) -> Option<bool> {
    let lowered = value.trim().to_lowercase();
    if BOOLEAN_TRUE.contains(&lowered.as_str()) {
        Some(true)
    } else if BOOLEAN_FALSE.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS.iter().find_map(|layout| {
                NaiveDate::parse_from_str(value, layout)
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
        })
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

fn parse_number(value: &str) -> Option<Number> {
    let value = value.trim();
    if let Ok(i) = value.parse::<i64>() {
        return Some(Number::Int(i));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::Float)
}

fn convert_numeric(raw: &[Option<&str>]) -> Option<Vec<Cell>> {
    let parsed: Vec<Option<Number>> = raw
        .iter()
        .map(|v| match v {
            None => Some(None),
            Some(s) => parse_number(s).map(Some),
        })
        .collect::<Option<_>>()?;

    let integral = parsed.iter().flatten().all(|n| match n {
        Number::Int(_) => true,
        Number::Float(f) => f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER,
    });

    Some(
        parsed
            .into_iter()
            .map(|n| match (n, integral) {
                (None, _) => Cell::Missing,
                (Some(Number::Int(i)), true) => Cell::Integer(i),
                (Some(Number::Float(f)), true) => Cell::Integer(f as i64),
                (Some(Number::Int(i)), false) => Cell::Float(i as f64),
                (Some(Number::Float(f)), false) => Cell::Float(f),
            })
            .collect(),
    )
}

fn is_low_cardinality(raw: &[Option<&str>], settings: &InferenceSettings) -> bool {
    let rows = raw.len();
    if rows <= settings.categorical_min_rows {
        return false;
    }
    let distinct = raw.iter().flatten().collect::<HashSet<_>>().len();
    let limit = (settings.categorical_max_levels as f64).min(rows as f64 * settings.categorical_max_ratio);
    (distinct as f64) < limit
}

/// Kind the raw values would be classified as.
pub fn classify(raw: &[Option<&str>], settings: &InferenceSettings) -> ColumnKind {
    if raw.iter().all(Option::is_none) {
        return ColumnKind::Text;
    }
    CANDIDATES
        .into_iter()
        .find(|c| c.try_convert(raw, settings).is_some())
        .map_or(ColumnKind::Text, Candidate::kind)
}

/// Numeric reading of a text column, converted the way the numeric candidate
/// would convert it. `None` for typed columns, columns without values, or
/// when any value is not a number.
pub fn numeric_reading(column: &Column) -> Option<Column> {
    if column.kind() != ColumnKind::Text {
        return None;
    }
    let raw: Vec<Option<&str>> = column.cells().iter().map(Cell::as_str).collect();
    if raw.iter().all(Option::is_none) {
        return None;
    }
    convert_numeric(&raw).map(|cells| Column::new(column.name(), ColumnKind::Numeric, cells))
}

/// Classify a text column and convert its cells. Typed columns, and columns
/// with no non-missing values, come back unchanged.
pub fn infer_column(column: Column, settings: &InferenceSettings) -> Column {
    if column.kind() != ColumnKind::Text {
        return column;
    }
    let converted = {
        let raw: Vec<Option<&str>> = column.cells().iter().map(Cell::as_str).collect();
        if raw.iter().all(Option::is_none) {
            None
        } else {
            CANDIDATES
                .into_iter()
                .find_map(|c| c.try_convert(&raw, settings).map(|cells| (c.kind(), cells)))
        }
    };

    match converted {
        Some((kind, cells)) => Column::new(column.name(), kind, cells),
        None => column,
    }
}

pub fn standardize_types(
    table: Table,
    settings: &InferenceSettings,
    log: &mut TransformLog,
) -> (Table, Vec<TypeChange>) {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping type standardization");
        return (table, Vec::new());
    }

    let mut changes = Vec::new();
    let mut columns = Vec::with_capacity(table.width());
    for column in table.into_columns() {
        let from = column.kind();
        let inferred = infer_column(column, settings);
        if inferred.kind() != from {
            log.push(
                "standardize_types",
                format!("Column '{}': {from} -> {}", inferred.name(), inferred.kind()),
            );
            changes.push(TypeChange {
                column: inferred.name().to_owned(),
                from,
                to: inferred.kind(),
            });
        }
        columns.push(inferred);
    }

    if changes.is_empty() {
        log.push("standardize_types", "No type conversions were necessary");
    } else {
        log.push(
            "standardize_types",
            format!("Standardized {} column types", changes.len()),
        );
    }

    (Table::from_columns_unchecked(columns), changes)
}
