//! Parse-then-render normalization of JSON fragments.
//!
//! Object key order survives the round trip (`serde_json` is built with
//! `preserve_order`), so a reflowed fragment keeps the layout order of its input.

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

const INDENT: &[u8] = b"  ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct ReflowError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for ReflowError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line X column Y"; keep the bare reason.
        let full = err.to_string();
        let message = full
            .rsplit_once(" at line ")
            .map(|(head, _)| head.to_string())
            .unwrap_or(full);
        Self {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

pub fn parse(text: &str) -> Result<Value, ReflowError> {
    Ok(serde_json::from_str(text)?)
}

pub fn render(value: &Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}

pub fn reflow(text: &str) -> Result<String, ReflowError> {
    parse(text).map(|value| render(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_with_two_space_indent_in_parse_order() {
        let text = r#"{"zeta":1,"alpha":{"b":[true,null],"a":"x"}}"#;
        let expected = "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": [\n      true,\n      null\n    ],\n    \"a\": \"x\"\n  }\n}";
        assert_eq!(reflow(text).unwrap(), expected);
    }

    #[test]
    fn reflow_is_stable_after_first_pass() {
        let samples = [
            "[1, 2.5, -3e2, \"s\"]",
            "{\"nested\": {\"list\": [{}, []]}, \"flag\": false}",
            "\"just a string\"",
            "null",
            "  {\"k\" :\n\"v\"}  ",
        ];
        for sample in samples {
            let first = parse(sample).unwrap();
            let again = parse(&render(&first)).unwrap();
            assert_eq!(first, again, "round trip changed {sample}");
            assert_eq!(render(&again), render(&first));
        }
    }

    #[test]
    fn malformed_input_is_an_error_value() {
        let err = parse("{\"a\": }").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.column > 0);
        assert!(!err.message.contains(" at line "));
        assert!(parse("not json").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn render_keeps_scalars_compact() {
        assert_eq!(render(&json!(42)), "42");
        assert_eq!(render(&json!([])), "[]");
        assert_eq!(render(&json!({})), "{}");
    }
}
