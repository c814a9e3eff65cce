// tests/script_args.rs

use serde_json::{Value, json};
use starterpack::errors::StarterpackError;
use starterpack::launcher::{parse_literal, parse_script_args};

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn pairs_are_decoded_with_literal_values() {
    let args = parse_script_args(&tokens(&["frames", "10", "name", "shot01"])).unwrap();

    assert_eq!(Value::Object(args), json!({ "frames": 10, "name": "shot01" }));
}

#[test]
fn odd_token_count_is_invalid() {
    match parse_script_args(&tokens(&["frames", "10", "name"])) {
        Err(StarterpackError::InvalidArgument(msg)) => assert!(msg.contains("3 tokens")),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn empty_tokens_give_empty_args() {
    assert!(parse_script_args(&[]).unwrap().is_empty());
}

#[test]
fn repeated_key_keeps_last_value() {
    let args = parse_script_args(&tokens(&["frames", "1", "frames", "2"])).unwrap();
    assert_eq!(args.get("frames"), Some(&json!(2)));
}

#[test]
fn literals_are_recognised() {
    assert_eq!(parse_literal("True"), json!(true));
    assert_eq!(parse_literal("false"), json!(false));
    assert_eq!(parse_literal("None"), Value::Null);
    assert_eq!(parse_literal("3.5"), json!(3.5));
    assert_eq!(parse_literal("-4"), json!(-4));
    assert_eq!(parse_literal("[1, 2, 3]"), json!([1, 2, 3]));
    assert_eq!(parse_literal(r#"{"a": "b"}"#), json!({ "a": "b" }));
    assert_eq!(parse_literal("'quoted text'"), json!("quoted text"));
    assert_eq!(parse_literal(r#""10""#), json!("10"));
}

#[test]
fn non_literals_are_kept_verbatim() {
    assert_eq!(parse_literal("shot01"), json!("shot01"));
    assert_eq!(parse_literal("C:/projects/shot 01.aep"), json!("C:/projects/shot 01.aep"));
    assert_eq!(parse_literal("[unclosed"), json!("[unclosed"));
}

#[test]
fn malformed_single_quoted_strings_stay_raw() {
    assert_eq!(parse_literal("'a'b'"), json!("'a'b'"));
    assert_eq!(parse_literal("'"), json!("'"));
    assert_eq!(parse_literal(r"'trailing\'"), json!(r"'trailing\'"));
    assert_eq!(parse_literal(r"'it\'s'"), json!("it's"));
    assert_eq!(parse_literal("''"), json!(""));
}

#[test]
fn integers_beyond_64_bits_stay_raw() {
    assert_eq!(parse_literal("18446744073709551615"), json!(u64::MAX));
    assert_eq!(parse_literal("-9223372036854775808"), json!(i64::MIN));
    assert_eq!(parse_literal("18446744073709551616"), json!("18446744073709551616"));
    assert_eq!(parse_literal("-99999999999999999999"), json!("-99999999999999999999"));
    // Large values written as floats are still numbers.
    assert_eq!(parse_literal("1e20"), json!(1e20));
}
