use super::table::Table;
use super::types::{NameChange, TransformLog};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const UNNAMED_COLUMN: &str = "unnamed_column";

pub fn sanitize_column_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    // Runs of whitespace, hyphens and periods become one underscore; anything
    // else outside [a-z0-9_] is dropped.
    let mut clean = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for c in lowered.chars() {
        if c.is_whitespace() || c == '-' || c == '.' {
            if !in_separator {
                clean.push('_');
                in_separator = true;
            }
            continue;
        }
        in_separator = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            clean.push(c);
        }
    }

    // Collapse multiple underscores
    let mut result = String::with_capacity(clean.len());
    let mut last_was_underscore = false;
    for c in clean.chars() {
        if c == '_' {
            if !last_was_underscore {
                result.push(c);
            }
            last_was_underscore = true;
        } else {
            result.push(c);
            last_was_underscore = false;
        }
    }

    let result = result.trim_matches('_');
    if result.is_empty() {
        return UNNAMED_COLUMN.to_owned();
    }

    // Ensure it doesn't start with a number
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        format!("col_{result}")
    } else {
        result.to_owned()
    }
}

/// Sanitize every header, then make the list unique left to right. The first
/// occurrence keeps its name; later repeats get `_1`, `_2`, ...
pub fn sanitize_column_names(names: &[String]) -> Vec<String> {
    let mut cleaned_names = Vec::with_capacity(names.len());
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    for name in names {
        let base = sanitize_column_name(name);
        let mut clean = base.clone();

        if taken.contains(&clean) {
            let count = repeats.entry(base.clone()).or_insert(0);
            loop {
                *count += 1;
                clean = format!("{base}_{count}");
                if !taken.contains(&clean) {
                    break;
                }
            }
        }

        taken.insert(clean.clone());
        cleaned_names.push(clean);
    }
    cleaned_names
}

/// Pair original headers with their final names, keeping only the ones that
/// changed.
pub fn name_changes(original: &[String], renamed: &[String]) -> Vec<NameChange> {
    original
        .iter()
        .zip(renamed)
        .filter(|(o, r)| o != r)
        .map(|(o, r)| NameChange {
            original: o.clone(),
            renamed: r.clone(),
        })
        .collect()
}

pub fn fix_column_names(table: Table, log: &mut TransformLog) -> (Table, Vec<NameChange>) {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping column name fixing");
        return (table, Vec::new());
    }

    let original = table.column_names();
    let renamed = sanitize_column_names(&original);
    let changes = name_changes(&original, &renamed);

    let columns = table
        .into_columns()
        .into_iter()
        .zip(&renamed)
        .map(|(column, name)| column.renamed(name.as_str()))
        .collect();
    let table = Table::from_columns_unchecked(columns);

    if changes.is_empty() {
        log.push("fix_names", "No column names needed fixing");
    } else {
        let detail = changes
            .iter()
            .map(|c| format!("'{}' -> '{}'", c.original, c.renamed))
            .collect::<Vec<_>>()
            .join(", ");
        log.push(
            "fix_names",
            format!("Renamed {} columns: {detail}", changes.len()),
        );
    }

    (table, changes)
}

/// Header problems found without renaming anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIssues {
    pub duplicates: Vec<String>,
    pub special_chars: Vec<String>,
    pub whitespace: Vec<String>,
    pub empty: Vec<String>,
    pub numeric_start: Vec<String>,
}

impl NameIssues {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
            && self.special_chars.is_empty()
            && self.whitespace.is_empty()
            && self.empty.is_empty()
            && self.numeric_start.is_empty()
    }
}

pub fn validate_column_names(names: &[String]) -> NameIssues {
    let mut issues = NameIssues::default();
    let mut seen = HashSet::new();

    for name in names {
        if !seen.insert(name.as_str()) {
            issues.duplicates.push(name.clone());
        }

        let trimmed = name.trim();
        if name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()))
        {
            issues.special_chars.push(name.clone());
        }
        if trimmed != name {
            issues.whitespace.push(name.clone());
        }
        if trimmed.is_empty() {
            issues.empty.push(name.clone());
        }
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            issues.numeric_start.push(name.clone());
        }
    }
    issues
}
