//! Free-text command translation.
//!
//! A command such as "fix column names and fill missing with median" is
//! matched against a rule table of regex patterns and turned into a
//! [`CleaningRequest`]. Within the missing-data and outlier groups the first
//! matching strategy wins; unmatched text enables nothing.

use super::types::{CleaningRequest, ImputeStrategy, OutlierMethod};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    FixNames,
    Missing(ImputeStrategy),
    Outliers(OutlierMethod),
    StandardizeTypes,
}

struct Rule {
    intent: Intent,
    patterns: Vec<Regex>,
}

impl Rule {
    fn new(intent: Intent, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::error!("Invalid command pattern '{p}': {e}");
                    None
                }
            })
            .collect();
        Self { intent, patterns }
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

const NAME_TARGET: &str = r"\s+(the\s+)?(column\s+)?(names?|headers?|titles?)";

/// Rules in priority order. Each group lists its specific strategies first.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let name_verbs = ["fix", "clean", "standardize", "normalize"].map(|v| format!("{v}{NAME_TARGET}"));
    let name_patterns: Vec<&str> = name_verbs.iter().map(String::as_str).collect();

    vec![
        Rule::new(Intent::FixNames, &name_patterns),
        Rule::new(
            Intent::Missing(ImputeStrategy::Mean),
            &[
                r"(fill|handle|fix)\s+missing\s+(data\s+)?(with\s+|using\s+)?mean",
                r"mean\s+(for\s+)?missing",
                r"replace\s+missing\s+(with\s+)?mean",
            ],
        ),
        Rule::new(
            Intent::Missing(ImputeStrategy::Median),
            &[
                r"(fill|handle|fix)\s+missing\s+(data\s+)?(with\s+|using\s+)?median",
                r"median\s+(for\s+)?missing",
                r"replace\s+missing\s+(with\s+)?median",
            ],
        ),
        Rule::new(
            Intent::Missing(ImputeStrategy::Mode),
            &[
                r"(fill|handle|fix)\s+missing\s+(data\s+)?(with\s+|using\s+)?mode",
                r"mode\s+(for\s+)?missing",
                r"replace\s+missing\s+(with\s+)?mode",
            ],
        ),
        Rule::new(
            Intent::Missing(ImputeStrategy::Drop),
            &[
                r"drop\s+(rows\s+with\s+)?missing",
                r"remove\s+(rows\s+with\s+)?missing",
                r"delete\s+(rows\s+with\s+)?missing",
                r"(handle|fix)\s+missing\s+(data\s+)?(by\s+)?drop",
            ],
        ),
        Rule::new(
            Intent::Outliers(OutlierMethod::ZScore),
            &[
                r"remove\s+outliers\s+(using\s+)?z.?score",
                r"drop\s+outliers\s+(using\s+)?z.?score",
                r"z.?score\s+outliers?",
            ],
        ),
        Rule::new(
            Intent::Outliers(OutlierMethod::Iqr),
            &[
                r"remove\s+outliers\s+(using\s+)?iqr",
                r"drop\s+outliers\s+(using\s+)?iqr",
                r"iqr\s+outliers?",
                r"interquartile\s+range\s+outliers?",
            ],
        ),
        // No method named: z-score
        Rule::new(
            Intent::Outliers(OutlierMethod::ZScore),
            &[
                r"remove\s+outliers?",
                r"drop\s+outliers?",
                r"delete\s+outliers?",
                r"(fix|handle)\s+outliers?",
            ],
        ),
        Rule::new(
            Intent::StandardizeTypes,
            &[
                r"standardize\s+(data\s+)?types?",
                r"convert\s+(data\s+)?types?",
                r"fix\s+(data\s+)?types?",
                r"normalize\s+(data\s+)?types?",
            ],
        ),
    ]
});

/// Trim, lower-case and collapse whitespace runs to one space.
pub fn normalize_command(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Translate a free-text command into a request. Only the operations the
/// text asks for are enabled; everything else keeps its default.
pub fn translate(text: &str) -> CleaningRequest {
    let mut request = CleaningRequest::default();
    let normalized = normalize_command(text);
    if normalized.is_empty() {
        return request;
    }
    tracing::debug!("Parsing normalized command: '{normalized}'");

    for rule in RULES.iter().filter(|r| r.matches(&normalized)) {
        match rule.intent {
            Intent::FixNames => request.fix_names = true,
            Intent::Missing(strategy) => {
                request.fix_missing.get_or_insert(strategy);
            }
            Intent::Outliers(method) => {
                request.drop_outliers.get_or_insert(method);
            }
            Intent::StandardizeTypes => request.standardize_types = true,
        }
    }

    if request.is_noop() {
        tracing::info!("No cleaning operations recognised in command '{normalized}'");
    } else {
        tracing::info!(
            "Command '{normalized}' enabled: {}",
            request.enabled_operations().join(", ")
        );
    }
    request
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandExamples {
    pub category: &'static str,
    pub examples: Vec<&'static str>,
}

/// Example phrases the translator understands, grouped by category.
pub fn supported_commands() -> Vec<CommandExamples> {
    let group = |category, examples: &[&'static str]| CommandExamples {
        category,
        examples: examples.to_vec(),
    };
    vec![
        group(
            "Column Names",
            &["fix column names", "clean headers", "standardize titles"],
        ),
        group(
            "Missing Data",
            &[
                "fill missing with mean",
                "handle missing using median",
                "drop rows with missing values",
            ],
        ),
        group(
            "Outliers",
            &[
                "remove outliers",
                "drop outliers using iqr",
                "remove outliers using z-score",
            ],
        ),
        group(
            "Data Types",
            &[
                "standardize data types",
                "convert data types",
                "fix data types",
            ],
        ),
        group(
            "Combined",
            &[
                "fix column names and remove outliers",
                "standardize types and fill missing with median",
                "clean headers and drop outliers using iqr",
            ],
        ),
    ]
}
