//! Argument map type and extraction helpers for tool handlers.
//!
//! ```rust
//! use ktooling::{ToolArgs, required_f64, required_string};
//! use serde_json::json;
//!
//! let args: ToolArgs = json!({"query": "rust", "limit": 3.0}).as_object().cloned().unwrap();
//! assert_eq!(required_string(&args, "query").unwrap(), "rust");
//! assert_eq!(required_f64(&args, "limit").unwrap(), 3.0);
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

/// Named arguments as they reach a handler.
pub type ToolArgs = Map<String, Value>;

pub fn required_string(args: &ToolArgs, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

pub fn optional_string(args: &ToolArgs, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(ToString::to_string)
}

pub fn required_f64(args: &ToolArgs, key: &str) -> Result<f64, ToolError> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required number: '{key}'")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_present_values() {
        let args = json!({"text": "hi", "a": 2}).as_object().cloned().expect("object");
        assert_eq!(required_string(&args, "text").expect("text"), "hi");
        assert_eq!(optional_string(&args, "text").as_deref(), Some("hi"));
        assert_eq!(required_f64(&args, "a").expect("a"), 2.0);
    }

    #[test]
    fn wrong_type_or_missing_key_is_invalid_arguments() {
        let args = json!({"a": "not a number"}).as_object().cloned().expect("object");
        let error = required_f64(&args, "a").expect_err("string is not a number");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidArguments);
        assert!(required_string(&args, "b").is_err());
        assert_eq!(optional_string(&args, "b"), None);
    }
}
