use super::inference::{InferenceSettings, standardize_types};
use super::intent::translate;
use super::missing::impute;
use super::naming::fix_column_names;
use super::outliers::{OutlierRule, remove_outliers};
use super::table::Table;
use super::transforms::{change_case, drop_columns, find_replace, remove_duplicates, trim_whitespace};
use super::types::{CleaningRequest, CleaningResult, TransformLog};

/// Runs the enabled operations of a request over one table.
///
/// Steps always execute in the same order: names, types, missing values,
/// outliers, duplicates, whitespace, case, find/replace, column drops. Each
/// step receives the output of the previous one.
#[derive(Clone, Debug, Default)]
pub struct CleaningPipeline {
    inference: InferenceSettings,
}

impl CleaningPipeline {
    pub fn new(inference: InferenceSettings) -> Self {
        Self { inference }
    }

    pub fn inference(&self) -> &InferenceSettings {
        &self.inference
    }

    /// Run `request` over `table`. A `natural_command` on the request is
    /// translated first and merged in, with explicit settings taking
    /// precedence.
    pub fn run(&self, table: Table, request: &CleaningRequest) -> CleaningResult {
        let mut log = TransformLog::new();
        let request = resolve_request(request, &mut log);
        let before = table.summary();

        tracing::info!(
            "Cleaning {} rows x {} columns: {}",
            before.rows,
            before.columns,
            request.enabled_operations().join(", ")
        );

        let mut table = table;
        let mut name_changes = Vec::new();
        let mut type_changes = Vec::new();
        let mut imputation = None;
        let mut outliers = None;

        if request.fix_names {
            let (t, changes) = fix_column_names(table, &mut log);
            table = t;
            name_changes = changes;
        }
        if request.standardize_types {
            let (t, changes) = standardize_types(table, &self.inference, &mut log);
            table = t;
            type_changes = changes;
        }
        if let Some(strategy) = request.fix_missing {
            let (t, report) = impute(table, strategy, &mut log);
            table = t;
            imputation = Some(report);
        }
        if let Some(method) = request.drop_outliers {
            let rule = OutlierRule::new(method, request.zscore_threshold);
            let (t, report) = remove_outliers(table, rule, &mut log);
            table = t;
            outliers = Some(report);
        }
        if request.remove_duplicates {
            table = remove_duplicates(table, &mut log);
        }
        if request.trim_whitespace {
            table = trim_whitespace(table, &mut log);
        }
        if let Some(case) = request.change_case {
            table = change_case(table, case, &mut log);
        }
        if let Some(rule) = &request.find_replace {
            table = find_replace(table, rule, &mut log);
        }
        if !request.drop_columns.is_empty() {
            table = drop_columns(table, &request.drop_columns, &mut log);
        }

        let after = table.summary();
        tracing::info!(
            "Cleaning finished: {} -> {} rows, {} -> {} missing cells",
            before.rows,
            after.rows,
            before.missing_cells,
            after.missing_cells
        );

        CleaningResult {
            table,
            name_changes,
            type_changes,
            log: log.into_entries(),
            before,
            after,
            imputation,
            outliers,
        }
    }
}

fn resolve_request(request: &CleaningRequest, log: &mut TransformLog) -> CleaningRequest {
    let Some(command) = request.natural_command.as_deref() else {
        return request.clone();
    };

    let inferred = translate(command);
    if inferred.is_noop() {
        log.push(
            "natural_command",
            format!("No operations recognised in '{command}'"),
        );
    } else {
        log.push(
            "natural_command",
            format!(
                "Interpreted '{command}' as: {}",
                inferred.enabled_operations().join(", ")
            ),
        );
    }
    request.clone().merge_inferred(&inferred)
}
