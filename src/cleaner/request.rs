use super::types::{
    CleaningRequest, DEFAULT_ZSCORE_THRESHOLD, FindReplace, ImputeStrategy, OutlierMethod,
    TextCase,
};
use crate::error::{CleanerError, Result as CleanerResult};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON form of a cleaning request, before validation.
///
/// Every field is optional and strategy names are plain strings, so a
/// document can be built by hand or posted from another tool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDocument {
    pub fix_names: Option<bool>,
    pub fix_missing: Option<String>,
    pub drop_outliers: Option<String>,
    pub zscore_threshold: Option<f64>,
    pub standardize_types: Option<bool>,
    pub remove_duplicates: Option<bool>,
    pub trim_whitespace: Option<bool>,
    pub change_case: Option<String>,
    pub find_replace: Option<FindReplace>,
    pub drop_columns: Option<Vec<String>>,
    pub natural_command: Option<String>,
}

impl RequestDocument {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read request file")?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse request JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize request")
    }

    /// Parse strategy names and check the threshold.
    ///
    /// # Errors
    ///
    /// [`CleanerError::InvalidOption`] naming the offending field when a
    /// strategy, method or case name is unknown, or when `zscore_threshold`
    /// is not a positive number.
    pub fn validate(&self) -> CleanerResult<CleaningRequest> {
        let zscore_threshold = self.zscore_threshold.unwrap_or(DEFAULT_ZSCORE_THRESHOLD);
        if !(zscore_threshold.is_finite() && zscore_threshold > 0.0) {
            return Err(CleanerError::invalid_option(
                "zscore_threshold",
                zscore_threshold.to_string(),
            ));
        }

        Ok(CleaningRequest {
            fix_names: self.fix_names.unwrap_or_default(),
            fix_missing: parse_opt::<ImputeStrategy>(self.fix_missing.as_deref())?,
            drop_outliers: parse_opt::<OutlierMethod>(self.drop_outliers.as_deref())?,
            zscore_threshold,
            standardize_types: self.standardize_types.unwrap_or_default(),
            remove_duplicates: self.remove_duplicates.unwrap_or_default(),
            trim_whitespace: self.trim_whitespace.unwrap_or_default(),
            change_case: parse_opt::<TextCase>(self.change_case.as_deref())?,
            find_replace: self.find_replace.clone(),
            drop_columns: self.drop_columns.clone().unwrap_or_default(),
            natural_command: self
                .natural_command
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Blank strings count as "not set".
fn parse_opt<T>(value: Option<&str>) -> CleanerResult<Option<T>>
where
    T: std::str::FromStr<Err = CleanerError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

impl From<&CleaningRequest> for RequestDocument {
    fn from(request: &CleaningRequest) -> Self {
        Self {
            fix_names: Some(request.fix_names),
            fix_missing: request.fix_missing.map(|s| s.as_str().to_owned()),
            drop_outliers: request.drop_outliers.map(|m| m.as_str().to_owned()),
            zscore_threshold: Some(request.zscore_threshold),
            standardize_types: Some(request.standardize_types),
            remove_duplicates: Some(request.remove_duplicates),
            trim_whitespace: Some(request.trim_whitespace),
            change_case: request.change_case.map(|c| c.as_str().to_owned()),
            find_replace: request.find_replace.clone(),
            drop_columns: Some(request.drop_columns.clone()),
            natural_command: request.natural_command.clone(),
        }
    }
}
