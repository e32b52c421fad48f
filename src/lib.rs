//! # tidyframe - tabular data cleaning
//!
//! tidyframe loads a CSV, Parquet or JSON file into an in-memory [`cleaner::Table`],
//! runs a fixed-order cleaning pipeline over it and records every change in a
//! timestamped transformation log.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tidyframe::cleaner::{CleaningRequest, ImputeStrategy, clean_file_flow};
//! use tidyframe::config::load_app_config;
//! use std::path::Path;
//!
//! let settings = load_app_config();
//! let request = CleaningRequest {
//!     fix_names: true,
//!     fix_missing: Some(ImputeStrategy::Median),
//!     ..Default::default()
//! };
//! let response = clean_file_flow(
//!     Path::new("sales.csv"),
//!     None,
//!     &request,
//!     &settings.inference,
//!     settings.preview_row_limit,
//! )?;
//! for entry in &response.transformations {
//!     println!("{}: {}", entry.operation, entry.details);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`cleaner`]: table model, cleaning operations, pipeline and file IO
//! - [`config`]: persisted user settings
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing subscriber setup
//! - [`utils`]: platform paths and formatting helpers

#![warn(clippy::all, rust_2018_idioms)]

pub mod cleaner;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;
