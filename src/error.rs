//! Centralized error handling for tidyframe.
//!
//! Only a handful of conditions ever reach the caller as an error. Everything
//! else the engine runs into (an empty table, a column that cannot be imputed,
//! a value that does not parse as a candidate type) is resolved where it
//! happens and written to the transformation log instead.
//!
//! ## What surfaces as an error
//!
//! - [`CleanerError::InvalidOption`]: a strategy, method or case name the
//!   engine does not recognise. It names the offending request field so both
//!   front ends can point the user at it.
//! - [`CleanerError::DataProcessing`]: a malformed table (ragged columns) or a
//!   failure inside `polars` while reading or writing files.
//! - [`CleanerError::InvalidPath`]: an input or output path with an unsupported
//!   extension.
//!
//! ```
//! use tidyframe::cleaner::ImputeStrategy;
//! use tidyframe::error::CleanerError;
//!
//! let err = "average".parse::<ImputeStrategy>().unwrap_err();
//! match err {
//!     CleanerError::InvalidOption { field, value } => {
//!         assert_eq!(field, "fix_missing");
//!         assert_eq!(value, "average");
//!     }
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error converts
//! into [`CleanerError`]:
//!
//! ```no_run
//! use tidyframe::error::ResultExt as _;
//!
//! fn load_request() -> tidyframe::error::Result<String> {
//!     let raw = std::fs::read_to_string("request.json")
//!         .context("Failed to read cleaning request")?;
//!     Ok(raw)
//! }
//! ```

use std::fmt;

/// Main error type for tidyframe operations.
#[derive(Debug)]
pub enum CleanerError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (Polars, malformed tables)
    DataProcessing(String),

    /// A request field carried a value the engine does not recognise
    InvalidOption {
        field: &'static str,
        value: String,
    },

    /// Configuration file errors
    Config(String),

    /// File not found or unsupported path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl CleanerError {
    pub fn invalid_option(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            value: value.into(),
        }
    }

    /// True for errors caused by the request rather than by the data or the
    /// environment.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidOption { .. } | Self::Config(_))
    }
}

impl fmt::Display for CleanerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::InvalidOption { field, value } => {
                write!(f, "Invalid value '{value}' for '{field}'")
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CleanerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CleanerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for CleanerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for CleanerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for CleanerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<CleanerError> for String {
    fn from(err: CleanerError) -> Self {
        err.to_string()
    }
}

/// Result type alias for tidyframe operations.
pub type Result<T> = std::result::Result<T, CleanerError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CleanerError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: CleanerError = e.into();
            CleanerError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: CleanerError = e.into();
            CleanerError::Other(format!("{}: {}", f(), err))
        })
    }
}
