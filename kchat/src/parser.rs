//! Classifies raw model text as a direct answer or a tool-call directive.
//!
//! A directive is a JSON array of `{"name": ..., "params": {...}}` objects; a lone
//! object counts as a one-element array. Anything that does not start with `[` or `{`
//! is an answer, and so is anything that looks like JSON but fails to decode.
//!
//! ```rust
//! use kchat::{ParsedOutput, parse_model_output};
//!
//! assert_eq!(parse_model_output("NO"), ParsedOutput::Answer("NO".to_string()));
//!
//! let ParsedOutput::ToolCalls(calls) = parse_model_output(r#"[{"name":"add","params":{"a":2,"b":3}}]"#)
//! else {
//!     panic!("expected a directive");
//! };
//! assert_eq!(calls[0].name, "add");
//! ```

use ktooling::{ToolArgs, ToolCallRequest};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedOutput {
    Answer(String),
    ToolCalls(Vec<ToolCallRequest>),
}

impl ParsedOutput {
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireDirective {
    Batch(Vec<WireCall>),
    Single(WireCall),
}

#[derive(Debug, Deserialize)]
struct WireCall {
    name: String,
    #[serde(default)]
    params: Option<ToolArgs>,
}

impl From<WireCall> for ToolCallRequest {
    fn from(call: WireCall) -> Self {
        ToolCallRequest::new(call.name).with_params(call.params.unwrap_or_default())
    }
}

pub fn looks_like_directive(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('[' | '{'))
}

pub fn parse_model_output(text: &str) -> ParsedOutput {
    if !looks_like_directive(text) {
        return ParsedOutput::Answer(text.to_string());
    }

    let calls = match decode(text.trim()) {
        Ok(WireDirective::Batch(calls)) => calls,
        Ok(WireDirective::Single(call)) => vec![call],
        Err(error) => {
            tracing::warn!(
                error = %error,
                text = %text,
                "model output looked like a tool directive but could not be decoded"
            );
            return ParsedOutput::Answer(text.to_string());
        }
    };

    if calls.is_empty() {
        return ParsedOutput::Answer(text.to_string());
    }

    ParsedOutput::ToolCalls(calls.into_iter().map(ToolCallRequest::from).collect())
}

fn decode(text: &str) -> Result<WireDirective, serde_json::Error> {
    serde_json::from_str(text).or_else(|strict_error| {
        // Small models often answer with Python-style quoting.
        serde_json::from_str(&text.replace('\'', "\"")).map_err(|_| strict_error)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn calls(text: &str) -> Vec<ToolCallRequest> {
        match parse_model_output(text) {
            ParsedOutput::ToolCalls(calls) => calls,
            ParsedOutput::Answer(answer) => panic!("expected tool calls, got answer {answer:?}"),
        }
    }

    #[test]
    fn plain_text_is_returned_unchanged() {
        for text in ["NO", "The answer is 4.", "  hello [1]", ""] {
            assert_eq!(parse_model_output(text), ParsedOutput::Answer(text.to_string()));
        }
    }

    #[test]
    fn strict_array_preserves_order_and_params() {
        let parsed = calls(
            r#"[{"name":"add","params":{"a":2,"b":3}},{"name":"get_current_time","params":{}}]"#,
        );

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "add");
        assert_eq!(parsed[0].raw_params.get("a"), Some(&Value::from(2)));
        assert_eq!(parsed[1].name, "get_current_time");
        assert!(parsed[1].raw_params.is_empty());
    }

    #[test]
    fn single_quotes_are_normalised() {
        let parsed = calls("  [{'name':'echo','params':{'text':'hi'}}]\n");
        assert_eq!(parsed[0].raw_params.get("text"), Some(&Value::from("hi")));
    }

    #[test]
    fn single_object_and_missing_or_null_params() {
        let parsed = calls(r#"{"name":"get_current_time"}"#);
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].raw_params.is_empty());

        let parsed = calls(r#"[{"name":"get_current_time","params":null}]"#);
        assert!(parsed[0].raw_params.is_empty());
    }

    #[test]
    fn malformed_or_misshapen_directives_fall_back_to_answer() {
        for text in [
            r#"[{"name":"add","params":{"a":2"#,
            r#"[{"tool":"add"}]"#,
            r#"[{"name":"add","params":[1,2]}]"#,
            r#"[1, 2, 3]"#,
            "{not json at all}",
            "[]",
        ] {
            assert_eq!(
                parse_model_output(text),
                ParsedOutput::Answer(text.to_string()),
                "{text}"
            );
        }
    }
}
