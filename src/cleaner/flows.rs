use super::inference::InferenceSettings;
use super::io::{load_table, save_table};
use super::outliers::OutlierRule;
use super::pipeline::CleaningPipeline;
use super::report::{DataReport, build_report};
use super::types::{CleaningRequest, CleaningResponse};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// `<stem>_cleaned.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("csv");
    input.with_file_name(format!("{stem}_cleaned.{ext}"))
}

/// Load `input`, run the pipeline, write the result and return the response.
pub fn clean_file_flow(
    input: &Path,
    output: Option<&Path>,
    request: &CleaningRequest,
    settings: &InferenceSettings,
    preview_rows: usize,
) -> Result<CleaningResponse> {
    let start = std::time::Instant::now();
    let table = load_table(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let pipeline = CleaningPipeline::new(settings.clone());
    let result = pipeline.run(table, request);

    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    save_table(&result.table, &output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    tracing::info!(
        "Cleaned {} -> {} in {:.2?}",
        input.display(),
        output.display(),
        start.elapsed()
    );
    Ok(result.to_response(preview_rows))
}

/// Load `input` and analyse it without writing anything.
pub fn report_file_flow(
    input: &Path,
    settings: &InferenceSettings,
    outliers: Option<OutlierRule>,
) -> Result<DataReport> {
    let table = load_table(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    Ok(build_report(&table, settings, outliers))
}
