//! Conversion of request parameters into JSON objects.
//!
//! The client needs every request body as a JSON object so it can add the
//! `partner_key` field after the operation-specific fields are in place.
//! [`MarshalMap`] is the seam that makes this possible for any parameter type.

use crate::errors::{Result, TapPayError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Trait for request parameter types that serialize into a JSON object.
///
/// The default method works for every `Serialize` type whose JSON form is an
/// object. Types serializing to anything else (numbers, arrays, ...) are
/// rejected with [`TapPayError::InvalidPayload`].
pub trait MarshalMap: Serialize {
    /// Serializes `self` into a string-keyed JSON map.
    fn marshal_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(TapPayError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl MarshalMap for Map<String, Value> {}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Wrapper {
        name: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<&'static str>,
    }

    impl MarshalMap for Wrapper {}

    #[derive(Serialize)]
    struct Bare(u32);

    impl MarshalMap for Bare {}

    #[test]
    fn test_struct_marshals_to_map() {
        let map = Wrapper {
            name: "tappay",
            nickname: None,
        }
        .marshal_map()
        .unwrap();

        assert_eq!(map.get("name"), Some(&json!("tappay")));
        assert!(!map.contains_key("nickname"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = Bare(7).marshal_map().unwrap_err();
        assert!(matches!(err, TapPayError::InvalidPayload(msg) if msg.contains("a number")));
    }
}
