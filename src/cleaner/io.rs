//! Loading and saving tables through polars.
//!
//! Everything is read as strings so type inference stays in the engine.

use super::table::{Cell, Column, ColumnKind, Table};
use crate::error::{CleanerError, Result, ResultExt as _};
use polars::prelude::{
    Column as FrameColumn, CsvWriter, DataFrame, DataType, JsonFormat, JsonReader, JsonWriter,
    LazyCsvReader, LazyFileListReader as _, NamedFrom as _, ParquetReader, ParquetWriter,
    SerReader as _, SerWriter as _, Series,
};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
    Json,
}

impl FileFormat {
    /// Format implied by the file extension.
    ///
    /// # Errors
    ///
    /// [`CleanerError::InvalidPath`] when the extension is missing or unsupported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            "json" => Ok(Self::Json),
            _ => Err(CleanerError::InvalidPath(format!(
                "Unsupported file extension '{ext}' for {}",
                path.display()
            ))),
        }
    }
}

pub fn load_table(path: &Path) -> Result<Table> {
    let df = match FileFormat::from_path(path)? {
        FileFormat::Csv => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()
            .context("Failed to read CSV")?,
        FileFormat::Parquet => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        FileFormat::Json => JsonReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read JSON")?,
    };
    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    frame_to_table(&df)
}

/// Convert a data frame into a text table. Nulls become missing cells.
pub fn frame_to_table(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let series = col.as_materialized_series().cast(&DataType::String)?;
        let values = series.str()?;
        columns.push(Column::text(col.name().as_str(), values.into_iter()));
    }
    Table::new(columns)
}

fn column_to_series(column: &Column) -> Series {
    let name = column.name().into();
    match column.kind() {
        ColumnKind::Numeric if column.is_integer() => {
            let values: Vec<Option<i64>> = column
                .cells()
                .iter()
                .map(|c| match c {
                    Cell::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        ColumnKind::Numeric => {
            let values: Vec<Option<f64>> = column.cells().iter().map(Cell::as_f64).collect();
            Series::new(name, values)
        }
        ColumnKind::Boolean => {
            let values: Vec<Option<bool>> = column
                .cells()
                .iter()
                .map(|c| match c {
                    Cell::Boolean(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        ColumnKind::DateTime | ColumnKind::Categorical | ColumnKind::Text => {
            let values: Vec<Option<String>> = column.cells().iter().map(Cell::render).collect();
            Series::new(name, values)
        }
    }
}

/// Typed data frame for writing: numeric and boolean columns keep their
/// dtype, everything else is written as rendered strings.
pub fn table_to_frame(table: &Table) -> Result<DataFrame> {
    let columns: Vec<FrameColumn> = table
        .columns()
        .iter()
        .map(|c| FrameColumn::from(column_to_series(c)))
        .collect();
    DataFrame::new(columns).map_err(CleanerError::from)
}

pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    let format = FileFormat::from_path(path)?;
    let mut df = table_to_frame(table)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    match format {
        FileFormat::Csv => CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .context("Failed to write CSV file")?,
        FileFormat::Parquet => {
            ParquetWriter::new(file)
                .finish(&mut df)
                .context("Failed to write Parquet file")?;
        }
        FileFormat::Json => JsonWriter::new(file)
            .with_json_format(JsonFormat::Json)
            .finish(&mut df)
            .context("Failed to write JSON file")?,
    }

    tracing::info!(
        "Saved {} rows x {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}
