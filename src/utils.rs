use std::path::PathBuf;

pub const APP_NAME: &str = "tidyframe";

/// Per-user directories the application reads from and writes to.
#[derive(Debug, Clone)]
pub struct StandardPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

/// Platform directories for tidyframe. Falls back to the working directory
/// when the platform reports none.
pub fn standard_paths() -> StandardPaths {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);
    let logs_dir = data_dir.join("logs");
    StandardPaths {
        config_dir,
        data_dir,
        logs_dir,
    }
}

/// Formats an optional f64 to 4 decimal places, or returns "-" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "-".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.5)), "1.5000");
        assert_eq!(fmt_opt(Some(f64::NAN)), "-");
        assert_eq!(fmt_opt(None), "-");
    }

    #[test]
    fn test_standard_paths_are_app_scoped() {
        let paths = standard_paths();
        assert!(paths.config_dir.ends_with(APP_NAME));
        assert!(paths.logs_dir.starts_with(&paths.data_dir));
    }
}
