#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// LogLevel tests

#[test]
fn LogLevel___ordering___trace_less_than_debug() {
    assert!(LogLevel::Trace < LogLevel::Debug);
}

#[test]
fn LogLevel___ordering___debug_less_than_info() {
    assert!(LogLevel::Debug < LogLevel::Info);
}

#[test]
fn LogLevel___ordering___info_less_than_warning() {
    assert!(LogLevel::Info < LogLevel::Warning);
}

#[test]
fn LogLevel___ordering___warning_less_than_error() {
    assert!(LogLevel::Warning < LogLevel::Error);
}

#[test]
fn LogLevel___ordering___error_less_than_fatal() {
    assert!(LogLevel::Error < LogLevel::Fatal);
}

#[test]
fn LogLevel___all___is_sorted_and_complete() {
    let mut sorted = LogLevel::ALL;
    sorted.sort();

    assert_eq!(sorted, LogLevel::ALL);
    assert_eq!(LogLevel::ALL.len(), 6);
}

#[test]
fn LogLevel___default___is_info() {
    assert_eq!(LogLevel::default(), LogLevel::Info);
}

#[test_case(0, Some(LogLevel::Trace))]
#[test_case(1, Some(LogLevel::Debug))]
#[test_case(2, Some(LogLevel::Info))]
#[test_case(3, Some(LogLevel::Warning))]
#[test_case(4, Some(LogLevel::Error))]
#[test_case(5, Some(LogLevel::Fatal))]
#[test_case(6, None)]
#[test_case(255, None)]
fn LogLevel___from_u8___maps_wire_value(value: u8, expected: Option<LogLevel>) {
    assert_eq!(LogLevel::from_u8(value), expected);
}

#[test]
fn LogLevel___from_u8___inverts_discriminant() {
    for level in LogLevel::ALL {
        assert_eq!(LogLevel::from_u8(level as u8), Some(level));
    }
}

#[test_case(LogLevel::Trace, "TRACE")]
#[test_case(LogLevel::Debug, "DEBUG")]
#[test_case(LogLevel::Info, "INFO")]
#[test_case(LogLevel::Warning, "WARNING")]
#[test_case(LogLevel::Error, "ERROR")]
#[test_case(LogLevel::Fatal, "FATAL")]
fn LogLevel___display___upper_case_name(level: LogLevel, expected: &str) {
    assert_eq!(level.to_string(), expected);
}

#[test_case("trace", LogLevel::Trace)]
#[test_case("DEBUG", LogLevel::Debug)]
#[test_case("Info", LogLevel::Info)]
#[test_case("warning", LogLevel::Warning)]
#[test_case("WARN", LogLevel::Warning)]
#[test_case("eRrOr", LogLevel::Error)]
#[test_case("  fatal\n", LogLevel::Fatal)]
fn LogLevel___from_str___case_insensitive(input: &str, expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
}

#[test_case("")]
#[test_case("not-a-level")]
#[test_case("verbose")]
#[test_case("off")]
fn LogLevel___from_str_unknown___returns_invalid_level(input: &str) {
    let result = input.parse::<LogLevel>();

    assert!(matches!(result, Err(LogError::InvalidLevel(_))));
}

#[test]
fn LogLevel___serde___uses_lower_case_names() {
    let json = serde_json::to_string(&LogLevel::Warning).unwrap();
    let parsed: LogLevel = serde_json::from_str("\"fatal\"").unwrap();

    assert_eq!(json, "\"warning\"");
    assert_eq!(parsed, LogLevel::Fatal);
}

#[test]
fn LogLevel___deserialize___accepts_any_case() {
    let parsed: LogLevel = serde_json::from_str("\"DEBUG\"").unwrap();

    assert_eq!(parsed, LogLevel::Debug);
}

#[test]
fn LogLevel___deserialize_unknown___fails() {
    let result = serde_json::from_str::<LogLevel>("\"loud\"");

    assert!(result.is_err());
}

#[test]
fn LogLevel___try_from_string___parses_level_name() {
    let level = LogLevel::try_from("error".to_string()).unwrap();

    assert_eq!(level, LogLevel::Error);
}

#[test]
fn LogLevel___try_from_string_unknown___returns_invalid_level() {
    let result = LogLevel::try_from("loud".to_string());

    assert!(matches!(result, Err(LogError::InvalidLevel(value)) if value == "loud"));
}
