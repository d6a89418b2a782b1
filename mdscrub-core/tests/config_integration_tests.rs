// mdscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use mdscrub_core::config::{merge_rules, ScrubConfig, ScrubRule};

#[test]
fn test_load_default_rules_in_catalog_order() {
    let config = ScrubConfig::load_default_rules().unwrap();
    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    // Order is semantic: invisible-character strips first, then the escape
    // rewrites, then environment removal.
    assert_eq!(
        names,
        vec![
            "emoji_joiners",
            "invisible_formatting",
            "escaped_hyphen",
            "escaped_plus",
            "escaped_asterisk",
            "inline_math_command",
            "latex_begin",
            "latex_end",
        ]
    );
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: test_rule
    pattern: "test"
    replace_with: "[TEST]"
    description: "A test rule"
    multiline: false
    dot_matches_new_line: false
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = ScrubConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "test_rule");
    assert_eq!(config.rules[0].pattern, Some("test".to_string()));
    assert!(!config.rules[0].multiline);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicate_names() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: dup
    pattern: "a"
    replace_with: ""
  - name: dup
    pattern: "b"
    replace_with: ""
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let result = ScrubConfig::load_from_file(file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Duplicate rule name"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_regex() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: broken
    pattern: "["
    replace_with: ""
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let result = ScrubConfig::load_from_file(file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("invalid regex pattern"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_bad_capture_reference() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: bad_ref
    pattern: "(a)"
    replace_with: "$2"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let result = ScrubConfig::load_from_file(file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("non-existent capture group"));
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let merged = merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_overrides_in_place_and_appends() {
    let default_config = ScrubConfig {
        rules: vec![
            ScrubRule {
                name: "first".to_string(),
                pattern: Some("a".to_string()),
                replace_with: "A".to_string(),
                ..Default::default()
            },
            ScrubRule {
                name: "second".to_string(),
                pattern: Some("b".to_string()),
                replace_with: "B".to_string(),
                ..Default::default()
            },
        ],
    };
    let user_config = ScrubConfig {
        rules: vec![
            ScrubRule {
                name: "first".to_string(),
                pattern: Some("a".to_string()),
                replace_with: "OVERRIDDEN".to_string(),
                ..Default::default()
            },
            ScrubRule {
                name: "third".to_string(),
                pattern: Some("c".to_string()),
                replace_with: "C".to_string(),
                ..Default::default()
            },
        ],
    };

    let merged = merge_rules(default_config, Some(user_config));
    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    // Overrides keep the default's position; new rules append at the end.
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(merged.rules[0].replace_with, "OVERRIDDEN");
}

#[test]
fn test_set_active_rules_disables_by_name() {
    let mut config = ScrubConfig::load_default_rules().unwrap();
    config.set_active_rules(&[], &["escaped_plus".to_string()]);
    assert!(!config.rules.iter().any(|r| r.name == "escaped_plus"));
    assert!(config.rules.iter().any(|r| r.name == "escaped_hyphen"));
}

#[test]
fn test_set_active_rules_opt_in_requires_enable() {
    let mut config = ScrubConfig {
        rules: vec![
            ScrubRule {
                name: "always_on".to_string(),
                pattern: Some("a".to_string()),
                replace_with: "".to_string(),
                ..Default::default()
            },
            ScrubRule {
                name: "opt_in_rule".to_string(),
                pattern: Some("b".to_string()),
                replace_with: "".to_string(),
                opt_in: true,
                ..Default::default()
            },
        ],
    };

    config.set_active_rules(&[], &[]);
    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["always_on"]);
}
