//! Declared parameter types and tool specifications.
//!
//! ```rust
//! use ktooling::{ParamType, ToolSpec};
//!
//! let spec = ToolSpec::new("add", "Adds two numbers")
//!     .param("a", ParamType::Float)
//!     .param("b", ParamType::Float);
//!
//! assert_eq!(spec.params.len(), 2);
//! assert_eq!(
//!     spec.example_directive(),
//!     r#"{"name":"add","params":{"a":<number>,"b":<number>}}"#
//! );
//! ```

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    String,
    Float,
    Integer,
    Boolean,
    /// Any JSON value, passed through untouched.
    Json,
}

impl ParamType {
    /// Placeholder shown to the model in example directives.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::String => "\"<text>\"",
            Self::Float => "<number>",
            Self::Integer => "<integer>",
            Self::Boolean => "<true|false>",
            Self::Json => "<json>",
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Json => "json",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: ParamType,
}

/// Parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamSchema {
    params: Vec<ParamDecl>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<ParamType> {
        self.params
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| decl.ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamDecl> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub params: ParamSchema,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: ParamSchema::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params = self.params.with(name, ty);
        self
    }

    pub fn with_params(mut self, params: ParamSchema) -> Self {
        self.params = params;
        self
    }

    pub fn validate(&self) -> Result<(), ToolError> {
        if self.name.trim().is_empty() {
            return Err(ToolError::invalid_arguments("tool name must not be empty"));
        }

        let mut seen = HashSet::new();
        for decl in self.params.iter() {
            if !seen.insert(decl.name.as_str()) {
                return Err(ToolError::invalid_arguments(format!(
                    "parameter '{}' is declared more than once",
                    decl.name
                ))
                .with_tool_name(self.name.clone()));
            }
        }

        Ok(())
    }

    /// Renders a one-call directive showing the model how to invoke this tool.
    pub fn example_directive(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|decl| format!("{}:{}", quote(&decl.name), decl.ty.placeholder()))
            .collect::<Vec<_>>()
            .join(",");

        format!("{{\"name\":{},\"params\":{{{params}}}}}", quote(&self.name))
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolErrorKind;

    #[test]
    fn schema_lookup_respects_declared_types() {
        let schema = ParamSchema::new()
            .with("query", ParamType::String)
            .with("limit", ParamType::Integer);

        assert_eq!(schema.get("limit"), Some(ParamType::Integer));
        assert_eq!(schema.get("missing"), None);
        let names: Vec<&str> = schema.iter().map(|decl| decl.name.as_str()).collect();
        assert_eq!(names, vec!["query", "limit"]);
    }

    #[test]
    fn validate_rejects_blank_names_and_repeated_params() {
        let blank = ToolSpec::new("  ", "nothing");
        assert_eq!(
            blank.validate().expect_err("blank name").kind,
            ToolErrorKind::InvalidArguments
        );

        let repeated = ToolSpec::new("echo", "Echoes text")
            .param("text", ParamType::String)
            .param("text", ParamType::Json);
        let error = repeated.validate().expect_err("repeated param");
        assert!(error.message.contains("'text'"));
        assert_eq!(error.tool_name.as_deref(), Some("echo"));
    }

    #[test]
    fn example_directive_for_parameterless_tool() {
        let spec = ToolSpec::new("get_current_time", "Reads the clock");
        assert_eq!(
            spec.example_directive(),
            r#"{"name":"get_current_time","params":{}}"#
        );
    }
}
