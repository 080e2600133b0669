//! Building styles from JSON values.
//!
//! Objects with a `$$css` key become compiled descriptors, other objects
//! become dynamic descriptors, arrays become nested lists, and `false`/`null`
//! are skipped. Anything else is rejected with a [`StyleError`] naming the
//! offending path, rather than being coerced.

use serde_json::{Map, Value};

use super::descriptor::{CompiledStyle, Descriptor, DynamicStyle, Marker};
use super::error::StyleError;
use super::input::StyleInput;
use super::value::StyleValue;
use super::Style;

/// Marker key identifying a compiled style object.
pub const COMPILED_KEY: &str = "$$css";

/// Marker key identifying a compiled style that needs localizing.
pub const LOCALIZE_KEY: &str = "$$css$localize";

impl Style {
    /// Builds a descriptor from a JSON object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use styleq::Style;
    /// use serde_json::json;
    ///
    /// let style = Style::from_json(&json!({ "$$css": true, "color": "color-red" })).unwrap();
    /// assert!(style.is_compiled());
    /// ```
    pub fn from_json(value: &Value) -> Result<Descriptor, StyleError> {
        match value {
            Value::Object(map) => descriptor_from_map(map, "$"),
            other => Err(StyleError::MalformedInput {
                path: "$".to_string(),
                found: json_type(other),
            }),
        }
    }
}

impl StyleInput {
    /// Builds a (possibly nested) style input from a JSON value.
    pub fn from_json(value: &Value) -> Result<Self, StyleError> {
        input_from_json(value, "$")
    }
}

fn input_from_json(value: &Value, path: &str) -> Result<StyleInput, StyleError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(StyleInput::Skip),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| input_from_json(item, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(StyleInput::List),
        Value::Object(map) => descriptor_from_map(map, path).map(StyleInput::Style),
        other => Err(StyleError::MalformedInput {
            path: path.to_string(),
            found: json_type(other),
        }),
    }
}

fn descriptor_from_map(map: &Map<String, Value>, path: &str) -> Result<Descriptor, StyleError> {
    let marker = match map.get(COMPILED_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(true)) => Some(Marker::Anonymous),
        Some(Value::String(label)) => Some(Marker::Label(label.clone())),
        Some(other) => {
            return Err(StyleError::InvalidMarker {
                path: format!("{}.{}", path, COMPILED_KEY),
                found: json_type(other),
            })
        }
    };
    let localize = map.get(LOCALIZE_KEY).is_some_and(|v| !v.is_null());
    let properties = map
        .iter()
        .filter(|(key, _)| *key != COMPILED_KEY && *key != LOCALIZE_KEY);

    match marker {
        Some(marker) => {
            let mut style = CompiledStyle::new().with_marker(marker);
            if localize {
                style = style.localized();
            }
            for (property, value) in properties {
                style = style.set(property.clone(), value_from_json(value, path, property)?);
            }
            Ok(style.into_descriptor())
        }
        None if localize => Err(StyleError::LocalizeWithoutCompiled {
            path: path.to_string(),
        }),
        None => {
            let mut style = DynamicStyle::new();
            for (property, value) in properties {
                style = style.set(property.clone(), value_from_json(value, path, property)?);
            }
            Ok(style.into_descriptor())
        }
    }
}

fn value_from_json(value: &Value, path: &str, property: &str) -> Result<StyleValue, StyleError> {
    Ok(match value {
        Value::Null => StyleValue::Null,
        Value::Bool(b) => StyleValue::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(StyleValue::Undefined, StyleValue::Number),
        Value::String(s) => StyleValue::String(s.clone()),
        Value::Array(items) => StyleValue::Array(
            items
                .iter()
                .map(|item| value_from_json(item, path, property))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(_) => {
            return Err(StyleError::UnsupportedValue {
                path: path.to_string(),
                property: property.to_string(),
            })
        }
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compiled_from_json_keeps_order() {
        let style = Style::from_json(&json!({
            "$$css": true,
            "b": "b1",
            "a": "a1",
            ":focus$a": null
        }))
        .unwrap();

        let compiled = style.as_compiled().unwrap();
        let keys: Vec<&str> = compiled.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", ":focus$a"]);
        assert_eq!(compiled.marker(), &Marker::Anonymous);
    }

    #[test]
    fn test_compiled_label_from_json() {
        let style = Style::from_json(&json!({ "$$css": "Foo.root", "a": "a1" })).unwrap();
        assert_eq!(style.as_compiled().unwrap().debug_label(), Some("Foo.root"));
    }

    #[test]
    fn test_dynamic_from_json() {
        let style = Style::from_json(&json!({ "opacity": 1, "color": null })).unwrap();
        let dynamic = style.as_dynamic().unwrap();
        assert_eq!(dynamic.get("opacity"), Some(&StyleValue::Number(1.0)));
        assert_eq!(dynamic.get("color"), Some(&StyleValue::Null));
    }

    #[test]
    fn test_null_marker_is_dynamic() {
        let style = Style::from_json(&json!({ "$$css": null, "a": 1 })).unwrap();
        assert!(!style.is_compiled());
        assert!(style.as_dynamic().unwrap().get(COMPILED_KEY).is_none());
    }

    #[test]
    fn test_localize_marker() {
        let style = Style::from_json(&json!({
            "$$css": true,
            "$$css$localize": true,
            "float": ["float-left", "float-right"]
        }))
        .unwrap();
        let compiled = style.as_compiled().unwrap();
        assert!(compiled.is_localized());
        assert_eq!(compiled.len(), 1);
    }

    #[test]
    fn test_localize_without_compiled_is_error() {
        let err = Style::from_json(&json!({ "$$css$localize": true })).unwrap_err();
        assert!(matches!(err, StyleError::LocalizeWithoutCompiled { .. }));
    }

    #[test]
    fn test_invalid_marker_is_error() {
        let err = Style::from_json(&json!({ "$$css": 3 })).unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidMarker {
                path: "$.$$css".to_string(),
                found: "number"
            }
        );
    }

    #[test]
    fn test_nested_object_value_is_error() {
        let err = Style::from_json(&json!({ "shadow": { "x": 1 } })).unwrap_err();
        assert!(matches!(err, StyleError::UnsupportedValue { property, .. } if property == "shadow"));
    }

    #[test]
    fn test_input_from_json_nested() {
        let input = StyleInput::from_json(&json!([
            { "$$css": true, "a": "a1" },
            false,
            null,
            [{ "b": 2 }]
        ]))
        .unwrap();

        match input {
            StyleInput::List(items) => {
                assert_eq!(items.len(), 4);
                assert!(items[1].is_skip());
                assert!(items[2].is_skip());
                assert!(matches!(&items[3], StyleInput::List(inner) if inner.len() == 1));
            }
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn test_input_from_json_rejects_scalars() {
        let err = StyleInput::from_json(&json!([{ "a": 1 }, [true]])).unwrap_err();
        assert_eq!(
            err,
            StyleError::MalformedInput {
                path: "$[1][0]".to_string(),
                found: "true"
            }
        );

        let err = StyleInput::from_json(&json!("class-a")).unwrap_err();
        assert!(matches!(err, StyleError::MalformedInput { found: "string", .. }));
    }
}
