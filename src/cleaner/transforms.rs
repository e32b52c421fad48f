use super::table::{Cell, Column, ColumnKind, Table};
use super::types::{FindReplace, TextCase, TransformLog};
use std::collections::HashSet;

/// Drop rows equal to an earlier row in every cell. The first occurrence stays.
pub fn remove_duplicates(table: Table, log: &mut TransformLog) -> Table {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping duplicate removal");
        return table;
    }

    let mut seen = HashSet::new();
    let keep: Vec<bool> = (0..table.height())
        .map(|idx| {
            let key: Vec<String> = table.row(idx).into_iter().map(Cell::key).collect();
            seen.insert(key)
        })
        .collect();
    let cleaned = table.filter_rows(&keep);
    let removed = table.height() - cleaned.height();

    if removed == 0 {
        log.push("remove_duplicates", "No duplicate rows found");
    } else {
        log.push(
            "remove_duplicates",
            format!("Removed {removed} duplicate rows"),
        );
    }
    cleaned
}

/// Apply `edit` to the string cells of text and categorical columns. Returns
/// the names of the columns where at least one cell changed.
fn map_text_cells<F>(table: Table, edit: F) -> (Table, Vec<String>)
where
    F: Fn(&str) -> String,
{
    let mut changed = Vec::new();
    let columns = table
        .into_columns()
        .into_iter()
        .map(|column| {
            if !column.kind().is_textual() {
                return column;
            }
            let (name, kind, cells) = column.into_parts();
            let mut touched = false;
            let cells = cells
                .into_iter()
                .map(|cell| match cell {
                    Cell::Text(s) => {
                        let edited = edit(&s);
                        touched |= edited != s;
                        Cell::Text(edited)
                    }
                    other => other,
                })
                .collect();
            if touched {
                changed.push(name.clone());
            }
            Column::new(name, kind, cells)
        })
        .collect();
    (Table::from_columns_unchecked(columns), changed)
}

pub fn trim_whitespace(table: Table, log: &mut TransformLog) -> Table {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping whitespace trimming");
        return table;
    }

    let (table, changed) = map_text_cells(table, |s| s.trim().to_owned());
    if changed.is_empty() {
        log.push("trim_whitespace", "No whitespace to trim");
    } else {
        log.push(
            "trim_whitespace",
            format!("Trimmed whitespace in columns: {}", changed.join(", ")),
        );
    }
    table
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn apply_case(value: &str, case: TextCase) -> String {
    match case {
        TextCase::Lower => value.to_lowercase(),
        TextCase::Upper => value.to_uppercase(),
        TextCase::Title => title_case(value),
    }
}

pub fn change_case(table: Table, case: TextCase, log: &mut TransformLog) -> Table {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping case change");
        return table;
    }

    let (table, changed) = map_text_cells(table, |s| apply_case(s, case));
    if changed.is_empty() {
        log.push("change_case", format!("No values needed {case} case"));
    } else {
        log.push(
            "change_case",
            format!("Converted to {case} case in columns: {}", changed.join(", ")),
        );
    }
    table
}

/// Exact, case-sensitive substring replacement over every non-missing cell.
///
/// Text and categorical columns keep their kind. A typed column where any
/// rendered value contains the target becomes a text column holding the
/// rendered values, since the replaced strings no longer fit the type.
pub fn find_replace(table: Table, rule: &FindReplace, log: &mut TransformLog) -> Table {
    if table.is_empty() {
        tracing::warn!("Table is empty, skipping find/replace");
        return table;
    }
    if rule.find.is_empty() {
        tracing::warn!("Empty search string, skipping find/replace");
        return table;
    }

    let mut replaced = 0;
    let mut changed = Vec::new();
    let columns = table
        .into_columns()
        .into_iter()
        .map(|column| {
            let hits = column
                .cells()
                .iter()
                .filter(|c| c.render().is_some_and(|s| s.contains(&rule.find)))
                .count();
            if hits == 0 {
                return column;
            }
            replaced += hits;
            changed.push(column.name().to_owned());

            let (name, kind, cells) = column.into_parts();
            let kind = if kind.is_textual() {
                kind
            } else {
                ColumnKind::Text
            };
            let cells = cells
                .into_iter()
                .map(|cell| match cell.render() {
                    None => Cell::Missing,
                    Some(s) => Cell::Text(s.replace(&rule.find, &rule.replace)),
                })
                .collect();
            Column::new(name, kind, cells)
        })
        .collect();
    let table = Table::from_columns_unchecked(columns);

    if replaced == 0 {
        log.push(
            "find_replace",
            format!("No cells contained '{}'", rule.find),
        );
    } else {
        log.push(
            "find_replace",
            format!(
                "Replaced '{}' with '{}' in {replaced} cells across columns: {}",
                rule.find,
                rule.replace,
                changed.join(", ")
            ),
        );
    }
    table
}

/// Remove the named columns. Unknown names are logged, not treated as errors.
pub fn drop_columns(table: Table, names: &[String], log: &mut TransformLog) -> Table {
    // Headers can be dropped even when there are no rows.
    if table.width() == 0 {
        tracing::warn!("Table has no columns, skipping column drop");
        return table;
    }

    let present: HashSet<String> = table.column_names().into_iter().collect();
    let (found, missing): (Vec<&String>, Vec<&String>) =
        names.iter().partition(|n| present.contains(*n));

    for name in &missing {
        log.push("drop_columns", format!("Column '{name}' not found"));
    }

    if found.is_empty() {
        return table;
    }

    let columns = table
        .into_columns()
        .into_iter()
        .filter(|c| !names.iter().any(|n| n == c.name()))
        .collect();
    log.push(
        "drop_columns",
        format!(
            "Dropped columns: {}",
            found
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );
    Table::from_columns_unchecked(columns)
}
