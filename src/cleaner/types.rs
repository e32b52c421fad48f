use super::missing::ImputationReport;
use super::outliers::OutlierReport;
use super::table::{ColumnKind, Table, TablePreview, TableSummary};
use crate::error::CleanerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

// REQUEST

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeStrategy {
    Mean,
    Median,
    Mode,
    Drop,
}

impl ImputeStrategy {
    pub const ALL: [Self; 4] = [Self::Mean, Self::Median, Self::Mode, Self::Drop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Drop => "drop",
        }
    }
}

impl FromStr for ImputeStrategy {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == lowered)
            .ok_or_else(|| CleanerError::invalid_option("fix_missing", s))
    }
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    ZScore,
    Iqr,
}

impl OutlierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZScore => "zscore",
            Self::Iqr => "iqr",
        }
    }
}

impl FromStr for OutlierMethod {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zscore" => Ok(Self::ZScore),
            "iqr" => Ok(Self::Iqr),
            _ => Err(CleanerError::invalid_option("drop_outliers", s)),
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Lower,
    Upper,
    Title,
}

impl TextCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Title => "title",
        }
    }
}

impl FromStr for TextCase {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            "title" => Ok(Self::Title),
            _ => Err(CleanerError::invalid_option("change_case", s)),
        }
    }
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindReplace {
    pub find: String,
    #[serde(default)]
    pub replace: String,
}

/// Validated set of operations for one pipeline run.
///
/// Build it directly, from a [`super::request::RequestDocument`], or from free
/// text via [`super::intent::translate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleaningRequest {
    pub fix_names: bool,
    pub fix_missing: Option<ImputeStrategy>,
    pub drop_outliers: Option<OutlierMethod>,
    pub zscore_threshold: f64,
    pub standardize_types: bool,
    pub remove_duplicates: bool,
    pub trim_whitespace: bool,
    pub change_case: Option<TextCase>,
    pub find_replace: Option<FindReplace>,
    pub drop_columns: Vec<String>,
    pub natural_command: Option<String>,
}

impl Default for CleaningRequest {
    fn default() -> Self {
        Self {
            fix_names: false,
            fix_missing: None,
            drop_outliers: None,
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            standardize_types: false,
            remove_duplicates: false,
            trim_whitespace: false,
            change_case: None,
            find_replace: None,
            drop_columns: Vec::new(),
            natural_command: None,
        }
    }
}

impl CleaningRequest {
    /// Combine explicit flags with flags inferred from free text. Explicit
    /// values win; booleans are enabled when either side enables them.
    #[must_use]
    pub fn merge_inferred(mut self, inferred: &Self) -> Self {
        self.fix_names |= inferred.fix_names;
        self.standardize_types |= inferred.standardize_types;
        self.remove_duplicates |= inferred.remove_duplicates;
        self.trim_whitespace |= inferred.trim_whitespace;
        self.fix_missing = self.fix_missing.or(inferred.fix_missing);
        self.drop_outliers = self.drop_outliers.or(inferred.drop_outliers);
        self.change_case = self.change_case.or(inferred.change_case);
        if self.find_replace.is_none() {
            self.find_replace.clone_from(&inferred.find_replace);
        }
        if self.drop_columns.is_empty() {
            self.drop_columns.clone_from(&inferred.drop_columns);
        }
        self
    }

    /// Names of the enabled operations, in execution order.
    pub fn enabled_operations(&self) -> Vec<&'static str> {
        let steps = [
            ("fix_names", self.fix_names),
            ("standardize_types", self.standardize_types),
            ("fix_missing", self.fix_missing.is_some()),
            ("drop_outliers", self.drop_outliers.is_some()),
            ("remove_duplicates", self.remove_duplicates),
            ("trim_whitespace", self.trim_whitespace),
            ("change_case", self.change_case.is_some()),
            ("find_replace", self.find_replace.is_some()),
            ("drop_columns", !self.drop_columns.is_empty()),
        ];
        steps
            .into_iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_noop(&self) -> bool {
        self.enabled_operations().is_empty()
    }
}

// RECORDS

/// A header whose final name differs from the original.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameChange {
    pub original: String,
    pub renamed: String,
}

/// A column whose kind changed during type standardization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub column: String,
    pub from: ColumnKind,
    pub to: ColumnKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationLogEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub details: String,
}

/// Append-only record of what each step did, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformLog {
    entries: Vec<TransformationLogEntry>,
}

impl TransformLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operation: impl Into<String>, details: impl Into<String>) {
        let entry = TransformationLogEntry {
            timestamp: Utc::now(),
            operation: operation.into(),
            details: details.into(),
        };
        tracing::debug!(operation = %entry.operation, "{}", entry.details);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TransformationLogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TransformationLogEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// RESULT

#[derive(Clone, Debug)]
pub struct CleaningResult {
    pub table: Table,
    pub name_changes: Vec<NameChange>,
    pub type_changes: Vec<TypeChange>,
    pub log: Vec<TransformationLogEntry>,
    pub before: TableSummary,
    pub after: TableSummary,
    pub imputation: Option<ImputationReport>,
    pub outliers: Option<OutlierReport>,
}

impl CleaningResult {
    pub fn to_response(&self, preview_rows: usize) -> CleaningResponse {
        CleaningResponse {
            row_count: self.table.height(),
            column_count: self.table.width(),
            columns: self.table.column_names(),
            preview: self.table.preview(preview_rows),
            name_changes: self.name_changes.clone(),
            type_changes: self.type_changes.clone(),
            transformations: self.log.clone(),
            before: self.before,
            after: self.after,
        }
    }
}

/// Serializable output shared by the command and request/response surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleaningResponse {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub preview: TablePreview,
    pub name_changes: Vec<NameChange>,
    pub type_changes: Vec<TypeChange>,
    pub transformations: Vec<TransformationLogEntry>,
    pub before: TableSummary,
    pub after: TableSummary,
}
