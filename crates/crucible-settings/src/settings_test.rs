// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use rstest::rstest;

use super::*;
use crate::schema::Schema;

fn default_settings() -> Settings {
    let schema = Schema::default_schema();
    Settings::new(&schema, ["os", "arch", "compiler", "build_type"])
}

#[test]
fn set_and_get_round_trip() {
    let mut settings = default_settings();
    settings.set("os", "Linux").unwrap();
    assert_eq!(settings.get("os"), Some("Linux"));
}

#[test]
fn set_validates_value_against_enumeration() {
    let mut settings = default_settings();
    let err = settings.set("os", "BeOS").unwrap_err();
    match err {
        Error::BadValue { field, value, allowed } => {
            assert_eq!(field, "settings.os");
            assert_eq!(value, "BeOS");
            assert!(allowed.contains(&"Linux".to_string()));
        }
        other => panic!("expected BadValue, got {other:?}"),
    }
}

#[test]
fn set_rejects_undeclared_field() {
    let schema = Schema::default_schema();
    let mut settings = Settings::new(&schema, ["os"]);
    let err = settings.set("arch", "x86_64").unwrap_err();
    match err {
        Error::UndefinedField { scope, field, siblings } => {
            assert_eq!(scope, "settings");
            assert_eq!(field, "arch");
            assert_eq!(siblings, vec!["os".to_string()]);
        }
        other => panic!("expected UndefinedField, got {other:?}"),
    }
}

#[test]
fn set_supports_nested_paths() {
    let mut settings = default_settings();
    settings.set("compiler.version", "11").unwrap();
    assert_eq!(settings.get("compiler.version"), Some("11"));
}

#[test]
fn remove_drops_declared_field_entirely() {
    let mut settings = default_settings();
    settings.set("os", "Linux").unwrap();
    settings.remove("os").unwrap();
    let err = settings.set("os", "Linux").unwrap_err();
    assert!(matches!(err, Error::UndefinedField { .. }));
}

#[test]
fn remove_value_narrows_allowed_enumeration() {
    let mut settings = default_settings();
    settings.remove_value("os", "Linux").unwrap();
    let err = settings.set("os", "Linux").unwrap_err();
    match err {
        Error::BadValue { allowed, .. } => {
            assert!(!allowed.contains(&"Linux".to_string()));
            assert!(allowed.contains(&"Windows".to_string()));
        }
        other => panic!("expected BadValue, got {other:?}"),
    }
}

#[test]
fn fields_returns_declared_keys_in_schema_order() {
    let settings = default_settings();
    assert_eq!(
        settings.fields(),
        vec![
            "os".to_string(),
            "arch".to_string(),
            "compiler".to_string(),
            "build_type".to_string()
        ]
    );
}

#[test]
fn dump_is_empty_for_unconfigured_settings() {
    let settings = default_settings();
    assert_eq!(settings.dump(), "");
}

#[rstest]
#[case(vec![("os", "Linux")], "os=Linux")]
#[case(vec![("os", "Linux"), ("arch", "x86_64")], "os=Linux\narch=x86_64")]
fn dump_is_in_schema_order(#[case] assignments: Vec<(&str, &str)>, #[case] expected: &str) {
    let mut settings = default_settings();
    for (path, value) in assignments {
        settings.set(path, value).unwrap();
    }
    assert_eq!(settings.dump(), expected);
}

#[test]
fn pairs_matches_dump_line_by_line() {
    let mut settings = default_settings();
    settings.set("os", "Linux").unwrap();
    settings.set("compiler.version", "11").unwrap();
    assert_eq!(
        settings.pairs(),
        vec![
            ("os".to_string(), "Linux".to_string()),
            ("compiler.version".to_string(), "11".to_string()),
        ]
    );
}

#[test]
fn dump_round_trips_through_set() {
    let mut settings = default_settings();
    settings.set("os", "Linux").unwrap();
    settings.set("compiler.version", "11").unwrap();
    let dumped = settings.dump();

    let mut replayed = default_settings();
    for line in dumped.split('\n') {
        let (path, value) = line.split_once('=').unwrap();
        replayed.set(path, value).unwrap();
    }
    assert_eq!(replayed.dump(), dumped);
}
