use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tidyframe::cleaner::{
    CleaningRequest, CleaningResponse, FindReplace, OutlierMethod, OutlierRule, RequestDocument,
    clean_file_flow, default_output_path, report_file_flow, supported_commands, translate,
};
use tidyframe::config::AppSettings;

#[derive(Parser)]
#[command(name = "tidyframe", version, about = "Clean tabular data files")]
pub struct Cli {
    /// Path to a JSON settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TIDYFRAME_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a file and save the result
    Clean(CleanArgs),
    /// Show the request a free-text command translates to
    Translate {
        /// Command text, e.g. "fix column names and remove outliers"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Analyse a file without changing it
    Report {
        /// Input file path (CSV, Parquet, JSON)
        input: PathBuf,

        /// Also report outliers using this method (zscore, iqr)
        #[arg(long)]
        outliers: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List example phrases understood by --command
    Commands,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Input file path (CSV, Parquet, JSON)
    pub input: PathBuf,

    /// Output file path. Defaults to <stem>_cleaned.<ext> next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Standardize column names
    #[arg(long)]
    pub fix_names: bool,

    /// Handle missing values: mean, median, mode or drop
    #[arg(long, value_name = "STRATEGY")]
    pub fix_missing: Option<String>,

    /// Remove outlier rows: zscore or iqr
    #[arg(long, value_name = "METHOD")]
    pub drop_outliers: Option<String>,

    /// Z-score threshold for --drop-outliers zscore
    #[arg(long)]
    pub zscore_threshold: Option<f64>,

    /// Infer and convert column types
    #[arg(long)]
    pub standardize_types: bool,

    /// Remove duplicate rows
    #[arg(long)]
    pub remove_duplicates: bool,

    /// Trim surrounding whitespace in text columns
    #[arg(long)]
    pub trim_whitespace: bool,

    /// Change text case: lower, upper or title
    #[arg(long, value_name = "CASE")]
    pub change_case: Option<String>,

    /// Substring to replace in every cell
    #[arg(long)]
    pub find: Option<String>,

    /// Replacement for --find (may be empty)
    #[arg(long, requires = "find")]
    pub replace: Option<String>,

    /// Column to remove (repeatable)
    #[arg(long = "drop-column", value_name = "NAME")]
    pub drop_columns: Vec<String>,

    /// Free-text command, e.g. "fix column names and fill missing with mean"
    #[arg(short, long)]
    pub command: Option<String>,

    /// JSON request file; flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Number of preview rows to print
    #[arg(long)]
    pub preview: Option<usize>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
}

impl CleanArgs {
    /// Merge the request file (if any) with the flags, then validate.
    pub fn to_request(&self, settings: &AppSettings) -> Result<CleaningRequest> {
        let mut doc = match &self.request {
            Some(path) => RequestDocument::from_file(path)?,
            None => RequestDocument::default(),
        };

        if self.fix_names {
            doc.fix_names = Some(true);
        }
        if self.standardize_types {
            doc.standardize_types = Some(true);
        }
        if self.remove_duplicates {
            doc.remove_duplicates = Some(true);
        }
        if self.trim_whitespace {
            doc.trim_whitespace = Some(true);
        }
        if self.fix_missing.is_some() {
            doc.fix_missing.clone_from(&self.fix_missing);
        }
        if self.drop_outliers.is_some() {
            doc.drop_outliers.clone_from(&self.drop_outliers);
        }
        if self.change_case.is_some() {
            doc.change_case.clone_from(&self.change_case);
        }
        if let Some(find) = &self.find {
            doc.find_replace = Some(FindReplace {
                find: find.clone(),
                replace: self.replace.clone().unwrap_or_default(),
            });
        }
        if !self.drop_columns.is_empty() {
            doc.drop_columns = Some(self.drop_columns.clone());
        }
        if self.command.is_some() {
            doc.natural_command.clone_from(&self.command);
        }
        doc.zscore_threshold = self
            .zscore_threshold
            .or(doc.zscore_threshold)
            .or(Some(settings.zscore_threshold));

        doc.validate().context("Invalid cleaning request")
    }
}

pub fn run(cli: Cli, settings: &AppSettings) -> Result<()> {
    match cli.command {
        Commands::Clean(args) => handle_clean(&args, settings),
        Commands::Translate { text } => {
            let request = translate(&text.join(" "));
            let doc = RequestDocument::from(&request);
            println!("{}", doc.to_json()?);
            Ok(())
        }
        Commands::Report {
            input,
            outliers,
            json,
        } => {
            let rule = outliers
                .as_deref()
                .map(|m| {
                    m.parse::<OutlierMethod>()
                        .map(|method| OutlierRule::new(method, settings.zscore_threshold))
                })
                .transpose()?;
            let report = report_file_flow(&input, &settings.inference, rule)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
            Ok(())
        }
        Commands::Commands => {
            for group in supported_commands() {
                println!("{}:", group.category);
                for example in group.examples {
                    println!("  {example}");
                }
            }
            Ok(())
        }
    }
}

fn handle_clean(args: &CleanArgs, settings: &AppSettings) -> Result<()> {
    let request = args.to_request(settings)?;
    if request.is_noop() {
        tracing::warn!("No cleaning operations requested; the file will be copied unchanged");
    }

    let preview_rows = args.preview.unwrap_or(settings.preview_row_limit);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let response = clean_file_flow(
        &args.input,
        Some(&output),
        &request,
        &settings.inference,
        preview_rows,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_summary(&response);
        println!("\nSaved to {}", output.display());
    }
    Ok(())
}

fn print_summary(response: &CleaningResponse) {
    println!(
        "Rows: {} -> {}  Columns: {} -> {}  Missing cells: {} -> {}",
        response.before.rows,
        response.after.rows,
        response.before.columns,
        response.after.columns,
        response.before.missing_cells,
        response.after.missing_cells
    );

    if !response.name_changes.is_empty() {
        println!("\nRenamed columns:");
        for change in &response.name_changes {
            println!("  '{}' -> '{}'", change.original, change.renamed);
        }
    }
    if !response.type_changes.is_empty() {
        println!("\nType changes:");
        for change in &response.type_changes {
            println!("  {}: {} -> {}", change.column, change.from, change.to);
        }
    }

    println!("\nTransformations:");
    for entry in &response.transformations {
        println!(
            "  [{}] {}: {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.operation,
            entry.details
        );
    }

    println!("\nPreview:");
    println!("  {}", response.preview.columns.join("\t"));
    for row in &response.preview.rows {
        let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        println!("  {}", cells.join("\t"));
    }
}
