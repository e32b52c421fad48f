//! The cleaning engine.
//!
//! A [`Table`] goes into a [`CleaningPipeline`] together with a
//! [`CleaningRequest`] and comes back as a [`CleaningResult`]: the cleaned
//! table, the header renames, the type changes, an ordered transformation log
//! and before/after summaries.
//!
//! ```
//! use tidyframe::cleaner::{CleaningPipeline, CleaningRequest, ImputeStrategy, Table};
//!
//! let table = Table::from_records(
//!     &["First Name", "Age"],
//!     vec![
//!         vec![Some("Ann"), Some("31")],
//!         vec![Some("Bob"), None],
//!         vec![Some("Cy"), Some("29")],
//!     ],
//! )?;
//!
//! let request = CleaningRequest {
//!     fix_names: true,
//!     standardize_types: true,
//!     fix_missing: Some(ImputeStrategy::Mean),
//!     ..Default::default()
//! };
//! let result = CleaningPipeline::default().run(table, &request);
//!
//! assert_eq!(result.table.column_names(), ["first_name", "age"]);
//! assert_eq!(result.after.missing_cells, 0);
//! # Ok::<(), tidyframe::error::CleanerError>(())
//! ```

pub mod flows;
pub mod inference;
pub mod intent;
pub mod io;
pub mod missing;
pub mod naming;
pub mod outliers;
pub mod pipeline;
pub mod report;
pub mod request;
pub mod stats;
pub mod table;
pub mod transforms;
pub mod types;

pub use flows::{clean_file_flow, default_output_path, report_file_flow};
pub use inference::{InferenceSettings, infer_column, standardize_types};
pub use intent::{CommandExamples, normalize_command, supported_commands, translate};
pub use io::{FileFormat, load_table, save_table};
pub use missing::{ColumnImputation, ImputationReport, impute};
pub use naming::{
    NameIssues, fix_column_names, sanitize_column_name, sanitize_column_names,
    validate_column_names,
};
pub use outliers::{
    ColumnOutliers, OutlierReport, OutlierRule, OutlierStats, detect_outliers, remove_outliers,
};
pub use pipeline::CleaningPipeline;
pub use report::{DataReport, build_report};
pub use request::RequestDocument;
pub use table::{Cell, Column, ColumnKind, Table, TablePreview, TableSummary};
pub use transforms::{change_case, drop_columns, find_replace, remove_duplicates, trim_whitespace};
pub use types::{
    CleaningRequest, CleaningResponse, CleaningResult, DEFAULT_ZSCORE_THRESHOLD, FindReplace,
    ImputeStrategy, NameChange, OutlierMethod, TextCase, TransformLog, TransformationLogEntry,
    TypeChange,
};

#[cfg(test)]
mod tests;
