use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_sanitize_column_name() {
    let cases = [
        ("First Name", "first_name"),
        ("  Price.USD  ", "price_usd"),
        ("e-mail", "e_mail"),
        ("Total ($)", "total"),
        ("a - b", "a_b"),
        ("__x__", "x"),
        ("123abc", "col_123abc"),
        ("2024 Sales", "col_2024_sales"),
        ("%%%", "unnamed_column"),
        ("", "unnamed_column"),
    ];
    for (input, expected) in cases {
        assert_eq!(sanitize_column_name(input), expected, "input: {input:?}");
    }
}

#[test]
fn test_duplicate_names_get_suffixes() {
    let result = sanitize_column_names(&names(&["Name", "name", "NAME "]));
    assert_eq!(result, ["name", "name_1", "name_2"]);
}

#[test]
fn test_suffix_skips_names_already_taken() {
    let result = sanitize_column_names(&names(&["a", "a", "a_1"]));
    assert_eq!(result.len(), 3);
    let unique: HashSet<_> = result.iter().collect();
    assert_eq!(unique.len(), 3, "names must be distinct: {result:?}");
    assert_eq!(result[0], "a");
}

#[test]
fn test_fix_column_names_records_changes() {
    let table = text_table(
        &["First Name", "age", "Zip-Code"],
        &[&[Some("Ann"), Some("3"), Some("1")]],
    );
    let mut log = TransformLog::new();
    let (table, changes) = fix_column_names(table, &mut log);

    assert_eq!(table.column_names(), ["first_name", "age", "zip_code"]);
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].original, "First Name");
    assert_eq!(changes[0].renamed, "first_name");
    assert_eq!(log.len(), 1);
    assert!(log.entries()[0].details.starts_with("Renamed 2 columns"));
}

#[test]
fn test_clean_names_are_noop_with_log() {
    let table = text_table(&["a", "b"], &[&[Some("1"), Some("2")]]);
    let mut log = TransformLog::new();
    let (table, changes) = fix_column_names(table, &mut log);
    assert_eq!(table.column_names(), ["a", "b"]);
    assert!(changes.is_empty());
    assert_eq!(log.entries()[0].details, "No column names needed fixing");
}

#[test]
fn test_empty_table_leaves_log_empty() {
    let mut log = TransformLog::new();
    let (table, changes) = fix_column_names(Table::default(), &mut log);
    assert!(table.is_empty());
    assert!(changes.is_empty());
    assert!(log.is_empty());
}

#[test]
fn test_validate_column_names() {
    let issues = validate_column_names(&names(&["id", "id", " pad", "a$b", "", "1st"]));
    assert_eq!(issues.duplicates, ["id"]);
    assert_eq!(issues.whitespace, [" pad"]);
    assert_eq!(issues.special_chars, ["a$b"]);
    assert_eq!(issues.empty, [""]);
    assert_eq!(issues.numeric_start, ["1st"]);
    assert!(!issues.is_clean());
    assert!(validate_column_names(&names(&["a", "b_c"])).is_clean());
}

#[test]
fn test_header_list_is_stable_on_second_pass() {
    let once = sanitize_column_names(&names(&["a", "a", "a_1"]));
    assert_eq!(once, ["a", "a_1", "a_1_1"]);
    assert_eq!(sanitize_column_names(&once), once);
}

proptest! {
    #[test]
    fn prop_header_list_is_idempotent(
        headers in prop::collection::vec(prop::sample::select(vec!["a", "a_1", "A ", "a-1", "1", "", "  "]), 0..10),
    ) {
        let headers: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
        let once = sanitize_column_names(&headers);
        prop_assert_eq!(sanitize_column_names(&once), once.clone());
    }

    #[test]
    fn prop_sanitize_is_idempotent(name in "\\PC{0,24}") {
        let once = sanitize_column_name(&name);
        prop_assert_eq!(sanitize_column_name(&once), once.clone());
        prop_assert!(!once.is_empty());
    }

    #[test]
    fn prop_sanitized_names_are_unique(headers in prop::collection::vec("[ a-zA-Z0-9_.-]{0,6}", 0..12)) {
        let result = sanitize_column_names(&headers);
        prop_assert_eq!(result.len(), headers.len());
        let unique: HashSet<_> = result.iter().collect();
        prop_assert_eq!(unique.len(), result.len());
        prop_assert!(result.iter().all(|n| !n.is_empty()));
    }
}
