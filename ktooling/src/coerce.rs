//! Best-effort conversion of model-supplied arguments to declared parameter types.
//!
//! | Declared  | Accepted                                                      |
//! |-----------|---------------------------------------------------------------|
//! | `String`  | string; number or bool (rendered as text)                     |
//! | `Float`   | number; trimmed numeric string with a finite value            |
//! | `Integer` | integer; float without fraction; trimmed integer string       |
//! | `Boolean` | bool; `true/false/yes/no/1/0` strings (any case); numbers 0/1 |
//! | `Json`    | anything, unchanged                                           |
//!
//! A value outside these rules keeps its original form: typing is a courtesy to the
//! handler, never a validation gate.
//!
//! ```rust
//! use ktooling::{ParamType, coerce_value};
//! use serde_json::json;
//!
//! assert_eq!(coerce_value(&json!("2.5"), ParamType::Float), Some(json!(2.5)));
//! assert_eq!(coerce_value(&json!("two"), ParamType::Float), None);
//! ```

use serde_json::{Number, Value};

use crate::{ParamSchema, ParamType, ToolArgs};

/// Converts `value` to `ty`, or `None` when no rule applies.
pub fn coerce_value(value: &Value, ty: ParamType) -> Option<Value> {
    match ty {
        ParamType::Json => Some(value.clone()),
        ParamType::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(number) => Some(Value::String(number.to_string())),
            Value::Bool(flag) => Some(Value::String(flag.to_string())),
            _ => None,
        },
        ParamType::Float => {
            let parsed = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            }?;
            Number::from_f64(parsed).map(Value::Number)
        }
        ParamType::Integer => match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral))
                .map(Value::from),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(integral))
                    .map(Value::from)
            }
            _ => None,
        },
        ParamType::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Number(number) => match number.as_f64() {
                Some(n) if n == 0.0 => Some(Value::Bool(false)),
                Some(n) if n == 1.0 => Some(Value::Bool(true)),
                _ => None,
            },
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(Value::Bool(true)),
                "false" | "no" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Arguments prepared for a handler, plus what happened along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoercedArgs {
    pub args: ToolArgs,
    /// Declared parameters whose value could not be converted and was passed as-is.
    pub passed_through: Vec<String>,
    /// Supplied parameters the schema does not declare; these are not forwarded.
    pub undeclared: Vec<String>,
}

/// Applies `schema` to `raw`. Declared-but-absent parameters are simply omitted.
pub fn coerce_args(schema: &ParamSchema, raw: &ToolArgs) -> CoercedArgs {
    let mut coerced = CoercedArgs::default();

    for decl in schema.iter() {
        let Some(value) = raw.get(&decl.name) else {
            continue;
        };

        let value = match coerce_value(value, decl.ty) {
            Some(converted) => converted,
            None => {
                coerced.passed_through.push(decl.name.clone());
                value.clone()
            }
        };
        coerced.args.insert(decl.name.clone(), value);
    }

    coerced.undeclared = raw
        .keys()
        .filter(|key| schema.get(key).is_none())
        .cloned()
        .collect();

    coerced
}
