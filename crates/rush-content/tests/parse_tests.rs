//! Tests for permissive JSONC parsing and style analysis

use rstest::rstest;
use rush_content::Error;
use rush_content::jsonc::{self, JsoncStyle, Quote};
use serde_json::json;

#[test]
fn test_parse_plain_json() {
    let value = jsonc::parse(r#"{"a": [1, 2.5, -3e2], "b": null, "c": true}"#).unwrap();
    assert_eq!(value, json!({"a": [1, 2.5, -300.0], "b": null, "c": true}));
}

#[test]
fn test_parse_comments_and_trailing_commas() {
    let source = r#"/* header */
{
  // line comment
  "projects": [
    "a", /* inline */
    "b",
  ],
}
// footer"#;
    let value = jsonc::parse(source).unwrap();
    assert_eq!(value, json!({"projects": ["a", "b"]}));
}

#[test]
fn test_parse_single_quotes_and_bare_keys() {
    let value = jsonc::parse(r#"{ name: 'it\'s', $ref: "x", _k: 'y "z"' }"#).unwrap();
    assert_eq!(value, json!({"name": "it's", "$ref": "x", "_k": "y \"z\""}));
}

#[test]
fn test_parse_escapes() {
    let value = jsonc::parse(r#"["\n\t\\\/\b\f\r", "\u00e9", "\ud83d\ude00"]"#).unwrap();
    assert_eq!(value, json!(["\n\t\\/\u{8}\u{c}\r", "é", "😀"]));
}

#[test]
fn test_parse_byte_order_mark() {
    let value = jsonc::parse("\u{feff}{\"a\": 1}").unwrap();
    assert_eq!(value, json!({"a": 1}));
}

#[test]
fn test_parse_preserves_key_order() {
    let value = jsonc::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[rstest]
#[case("", "empty document")]
#[case("   // only a comment", "empty document")]
#[case("{", "expected object key")]
#[case("[1 2]", "expected ',' or ']'")]
#[case("{\"a\" 1}", "expected ':'")]
#[case("{\"a\": 1 \"b\": 2}", "expected ',' or '}'")]
#[case("/* open", "unterminated block comment")]
#[case("\"abc", "unterminated string")]
#[case("{} {}", "unexpected content")]
#[case("[01]", "expected ',' or ']'")]
#[case("[undefined]", "unexpected token 'undefined'")]
#[case("[\"\\x\"]", "invalid escape")]
#[case("[\"\\ud800\"]", "unpaired surrogate")]
#[case("{ name: 'it''s' }", "expected ',' or '}'")]
fn test_parse_errors(#[case] source: &str, #[case] fragment: &str) {
    let err = jsonc::parse(source).unwrap_err();
    assert!(
        err.to_string().contains(fragment),
        "expected '{fragment}' in: {err}"
    );
}

#[test]
fn test_duplicate_keys_rejected() {
    let err = jsonc::parse("{\n  \"a\": 1,\n  \"a\": 2\n}").unwrap_err();
    match err {
        Error::DuplicateKey { key, line, column } => {
            assert_eq!(key, "a");
            assert_eq!(line, 3);
            assert_eq!(column, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_deep_nesting_rejected() {
    let source = format!("{}{}", "[".repeat(300), "]".repeat(300));
    let err = jsonc::parse(&source).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"));
}

#[test]
fn test_analyze_default_style() {
    let style = jsonc::analyze(r#"{"a": "b"}"#).unwrap();
    assert_eq!(style, JsoncStyle::default());
}

#[test]
fn test_analyze_tabs_single_quotes_bare_keys() {
    let style = jsonc::analyze("{\n\tname: 'a',\n\tnested: {\n\t\tkey: 'b'\n\t}\n}").unwrap();
    assert_eq!(style.indent, "\t");
    assert_eq!(style.quote, Quote::Single);
    assert!(!style.quote_keys);
}

#[test]
fn test_analyze_four_spaces() {
    let style = jsonc::analyze("{\n    \"a\": {\n        \"b\": 1\n    }\n}").unwrap();
    assert_eq!(style.indent, "    ");
    assert_eq!(style.quote, Quote::Double);
    assert!(style.quote_keys);
}
