//! # tidyframe command line
//!
//! ```text
//! main()
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings (--config, TIDYFRAME_CONFIG or the platform config dir)
//!   ├─> Initialize logging (console + rolling file)
//!   └─> Run the subcommand
//! ```
//!
//! ```bash
//! tidyframe clean sales.csv --fix-names --fix-missing median
//! tidyframe clean sales.csv -c "fix column names and remove outliers"
//! tidyframe report sales.csv --outliers iqr
//! tidyframe translate fill missing with mode
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary
#![expect(clippy::print_stderr)]

mod cli;

use anyhow::Result;
use clap::Parser as _;
use tidyframe::config::{AppSettings, get_config_path, read_app_config};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let (settings, config_error) = match read_app_config(&config_path) {
        Ok(settings) => (settings.unwrap_or_default(), None),
        Err(e) => (AppSettings::default(), Some(e)),
    };

    // The console is still usable if the log directory is not.
    if let Err(e) = tidyframe::logging::init(&settings.log_level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    if let Some(e) = config_error {
        tracing::warn!("Ignoring unreadable config: {e:#}, using defaults");
    }

    cli::run(cli, &settings)
}
