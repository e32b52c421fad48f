use super::*;

#[test]
fn test_fix_names_phrases() {
    for command in [
        "fix column names",
        "clean headers",
        "standardize titles",
        "normalize column names",
        "fix the column headers",
        "clean column titles",
    ] {
        assert!(translate(command).fix_names, "command: {command}");
    }
}

#[test]
fn test_missing_strategies() {
    let cases = [
        ("fill missing with mean", ImputeStrategy::Mean),
        ("fix missing data with mean", ImputeStrategy::Mean),
        ("use mean for missing values", ImputeStrategy::Mean),
        ("handle missing using median", ImputeStrategy::Median),
        ("use median for missing", ImputeStrategy::Median),
        ("replace missing with mode", ImputeStrategy::Mode),
        ("drop missing", ImputeStrategy::Drop),
        ("remove rows with missing", ImputeStrategy::Drop),
        ("delete missing values", ImputeStrategy::Drop),
        ("handle missing by drop", ImputeStrategy::Drop),
    ];
    for (command, expected) in cases {
        assert_eq!(translate(command).fix_missing, Some(expected), "command: {command}");
    }
}

#[test]
fn test_outlier_methods() {
    let cases = [
        ("remove outliers using zscore", OutlierMethod::ZScore),
        ("drop outliers using z-score", OutlierMethod::ZScore),
        ("remove outliers using z score", OutlierMethod::ZScore),
        ("remove outliers using iqr", OutlierMethod::Iqr),
        ("drop outliers using IQR", OutlierMethod::Iqr),
        ("interquartile range outliers", OutlierMethod::Iqr),
        ("remove outliers", OutlierMethod::ZScore),
        ("handle outliers", OutlierMethod::ZScore),
    ];
    for (command, expected) in cases {
        assert_eq!(translate(command).drop_outliers, Some(expected), "command: {command}");
    }
}

#[test]
fn test_standardize_types_phrases() {
    for command in [
        "standardize data types",
        "convert data types",
        "fix data types",
        "normalize types",
    ] {
        let request = translate(command);
        assert!(request.standardize_types, "command: {command}");
        assert!(!request.fix_names, "command: {command}");
    }
}

#[test]
fn test_combined_command() {
    let request = translate("fix column names and remove outliers");
    assert!(request.fix_names);
    assert_eq!(request.drop_outliers, Some(OutlierMethod::ZScore));
    assert_eq!(request.fix_missing, None);
    assert!(!request.standardize_types);
    assert_eq!(request.enabled_operations(), ["fix_names", "drop_outliers"]);

    let request = translate("Fix column names,   handle missing using MEAN, and remove outliers");
    assert!(request.fix_names);
    assert_eq!(request.fix_missing, Some(ImputeStrategy::Mean));
}

#[test]
fn test_specific_strategy_wins() {
    // both "mean" and "drop" phrasing present
    let request = translate("drop missing or fill missing with mean");
    assert_eq!(request.fix_missing, Some(ImputeStrategy::Mean));
}

#[test]
fn test_unrecognised_and_blank_commands() {
    assert!(translate("").is_noop());
    assert!(translate("   ").is_noop());
    assert!(translate("make me a sandwich").is_noop());
}

#[test]
fn test_normalize_command() {
    assert_eq!(normalize_command("  Fix\tColumn   NAMES "), "fix column names");
}

#[test]
fn test_merge_prefers_explicit_values() {
    let explicit = CleaningRequest {
        fix_missing: Some(ImputeStrategy::Median),
        ..Default::default()
    };
    let inferred = translate("fix column names and fill missing with mean");
    let merged = explicit.merge_inferred(&inferred);
    assert!(merged.fix_names);
    assert_eq!(merged.fix_missing, Some(ImputeStrategy::Median));
}

#[test]
fn test_supported_commands_are_understood() {
    let groups = supported_commands();
    assert_eq!(groups.len(), 5);
    for group in &groups {
        for example in &group.examples {
            assert!(!translate(example).is_noop(), "example: {example}");
        }
    }
}
