//! In-memory table model the cleaning engine operates on.
//!
//! A [`Table`] is an ordered list of [`Column`]s of equal length. Every cell is
//! a [`Cell`], and [`Cell::Missing`] is the one and only representation of
//! absent data: it never compares equal to an empty string or to zero.

use crate::error::{CleanerError, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Semantic type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Boolean,
    DateTime,
    Categorical,
    Text,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Categorical => "categorical",
            Self::Text => "text",
        }
    }

    /// Kinds whose cells hold strings.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Categorical)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Printable form of the cell, `None` for [`Cell::Missing`].
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(s) => Some(s.clone()),
            Self::Integer(v) => Some(v.to_string()),
            Self::Float(v) => Some(v.to_string()),
            Self::Boolean(v) => Some(v.to_string()),
            Self::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    Some(dt.format("%Y-%m-%d").to_string())
                } else {
                    Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
                }
            }
        }
    }

    /// Identity used for duplicate detection and frequency counting. Two cells
    /// share a key only when they have the same variant and the same value.
    pub fn key(&self) -> String {
        match self {
            Self::Missing => "\u{0}missing".to_owned(),
            Self::Text(s) => format!("s:{s}"),
            Self::Integer(v) => format!("i:{v}"),
            Self::Float(v) => format!("f:{}", v.to_bits()),
            Self::Boolean(v) => format!("b:{v}"),
            Self::DateTime(dt) => format!("d:{}", dt.and_utc().timestamp_micros()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
    levels: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        let mut column = Self {
            name: name.into(),
            kind,
            cells,
            levels: Vec::new(),
        };
        column.refresh_levels();
        column
    }

    /// Build a text column from raw values; `None` becomes [`Cell::Missing`].
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .map(|v| v.map_or(Cell::Missing, |s| Cell::Text(s.into())))
            .collect();
        Self::new(name, ColumnKind::Text, cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Distinct values of a categorical column in first-seen order. Empty for
    /// every other kind.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    pub fn has_missing(&self) -> bool {
        self.cells.iter().any(Cell::is_missing)
    }

    /// Non-missing numeric values paired with their row index.
    pub fn numeric_values(&self) -> Vec<(usize, f64)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.as_f64().map(|v| (idx, v)))
            .collect()
    }

    /// True when every non-missing cell is an integer.
    pub fn is_integer(&self) -> bool {
        self.kind == ColumnKind::Numeric
            && self
                .cells
                .iter()
                .all(|c| matches!(c, Cell::Missing | Cell::Integer(_)))
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_parts(self) -> (String, ColumnKind, Vec<Cell>) {
        (self.name, self.kind, self.cells)
    }

    /// Keep the rows whose flag in `keep` is set.
    pub fn filter(&self, keep: &[bool]) -> Self {
        let cells = self
            .cells
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c.clone())
            .collect();
        Self::new(self.name.clone(), self.kind, cells)
    }

    pub(crate) fn refresh_levels(&mut self) {
        self.levels.clear();
        if self.kind != ColumnKind::Categorical {
            return;
        }
        let mut seen = HashSet::new();
        for cell in &self.cells {
            if let Cell::Text(s) = cell
                && seen.insert(s.as_str())
            {
                self.levels.push(s.clone());
            }
        }
    }
}

/// Row, column and missing-cell counts of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
}

/// First rows of a table rendered as strings (`None` marks a missing cell).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(CleanerError::DataProcessing(format!(
                    "column '{}' has {} rows, expected {expected}",
                    bad.name(),
                    bad.len()
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Build a text table from a header row and string records.
    pub fn from_records<H, R, S>(headers: &[H], records: R) -> Result<Self>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<Option<S>>>,
        S: Into<String>,
    {
        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for (row_idx, record) in records.into_iter().enumerate() {
            if record.len() != headers.len() {
                return Err(CleanerError::DataProcessing(format!(
                    "record {row_idx} has {} fields, expected {}",
                    record.len(),
                    headers.len()
                )));
            }
            for (cells, value) in columns.iter_mut().zip(record) {
                cells.push(value.map_or(Cell::Missing, |s| Cell::Text(s.into())));
            }
        }
        Self::new(
            headers
                .iter()
                .zip(columns)
                .map(|(h, cells)| Column::new(h.as_ref(), ColumnKind::Text, cells))
                .collect(),
        )
    }

    pub(crate) fn from_columns_unchecked(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// A table with no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_owned()).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            rows: self.height(),
            columns: self.width(),
            missing_cells: self.missing_count(),
        }
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Vec<&Cell> {
        self.columns
            .iter()
            .filter_map(|c| c.cells().get(idx))
            .collect()
    }

    /// Keep the rows whose flag in `keep` is set; row order is preserved.
    pub fn filter_rows(&self, keep: &[bool]) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.filter(keep)).collect(),
        }
    }

    pub fn preview(&self, limit: usize) -> TablePreview {
        let rows = (0..self.height().min(limit))
            .map(|idx| self.row(idx).into_iter().map(Cell::render).collect())
            .collect();
        TablePreview {
            columns: self.column_names(),
            rows,
        }
    }
}
