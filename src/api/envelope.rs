//! Response normalization for the profiles backend.
//!
//! Endpoints answer either with the bare value or with `{ "data": ... }`.
//! Both shapes are folded into [`Payload`] at the boundary so domain code
//! only ever sees the inner value.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A backend response body, before unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{ "data": <inner> }`
    Enveloped { data: Value },
    /// The inner value itself.
    Bare(Value),
}

impl Payload {
    /// Classify a raw response body.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key("data") => Payload::Enveloped {
                data: map.remove("data").unwrap_or(Value::Null),
            },
            other => Payload::Bare(other),
        }
    }

    pub fn into_inner(self) -> Value {
        match self {
            Payload::Enveloped { data } => data,
            Payload::Bare(value) => value,
        }
    }

    /// Unwrap to a list of records. Anything that is not an array is
    /// treated as an empty collection.
    pub fn into_list(self) -> Vec<Value> {
        match self.into_inner() {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                tracing::warn!(kind = %value_kind(&other), "Expected a list response, treating as empty");
                Vec::new()
            }
        }
    }

    /// Unwrap to a single object. `null` means "absent".
    pub fn into_object<T: DeserializeOwned>(self) -> Result<Option<T>, serde_json::Error> {
        match self.into_inner() {
            Value::Null => Ok(None),
            other => serde_json::from_value(other).map(Some),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
