// src/launcher/script_args.rs

//! Structured script arguments given as alternating key/value tokens.
//!
//! `["frames", "10", "name", "shot01"]` becomes `{"frames": 10, "name":
//! "shot01"}`: every value is read as a literal when it is one and kept as
//! raw text otherwise.

use serde_json::{Map, Value};

use crate::errors::{Result, StarterpackError};

/// Decoded script arguments, keyed by name.
pub type ScriptArgs = Map<String, Value>;

/// Pair up `tokens` as key/value and auto-type every value.
///
/// An odd token count is an `InvalidArgument`. A repeated key keeps its last
/// value.
pub fn parse_script_args(tokens: &[String]) -> Result<ScriptArgs> {
    if tokens.len() % 2 != 0 {
        return Err(StarterpackError::InvalidArgument(format!(
            "script arguments must be key/value pairs; got {} tokens: {:?}",
            tokens.len(),
            tokens
        )));
    }

    let mut args = ScriptArgs::new();
    for pair in tokens.chunks_exact(2) {
        args.insert(pair[0].clone(), parse_literal(&pair[1]));
    }
    Ok(args)
}

/// Read `raw` as a literal.
///
/// Recognises booleans (`true`/`True`), null (`null`/`None`), numbers, lists,
/// mappings and quoted strings. Anything else is returned as a string
/// unchanged, including a single-quoted string with a stray inner quote and
/// an integer that does not fit in 64 bits.
pub fn parse_literal(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "True" | "true" => return Value::Bool(true),
        "False" | "false" => return Value::Bool(false),
        "None" | "null" => return Value::Null,
        _ => {}
    }

    if trimmed.starts_with('\'') {
        return match single_quoted(trimmed) {
            Some(text) => Value::String(text),
            None => Value::String(raw.to_string()),
        };
    }

    match serde_json::from_str(trimmed) {
        Ok(Value::Number(n)) if !n.is_i64() && !n.is_u64() && is_integer_text(trimmed) => {
            Value::String(raw.to_string())
        }
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Body of a `'...'` literal. Only `\'` and `\\` are escapes; an unescaped
/// inner quote makes the whole token invalid.
fn single_quoted(text: &str) -> Option<String> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('\'' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                // The backslash escapes the closing quote.
                None => return None,
            },
            '\'' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
