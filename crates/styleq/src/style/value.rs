//! Property values carried by style descriptors.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single property value.
///
/// Compiled descriptors only accept [`StyleValue::String`] (a class-name
/// token) and [`StyleValue::Null`] (claim the property without emitting a
/// class). Dynamic descriptors accept any variant; [`StyleValue::Undefined`]
/// is skipped entirely and [`StyleValue::Null`] claims the property without
/// emitting an inline value.
///
/// [`StyleValue::Array`] only has meaning for descriptors that go through the
/// bidirectional compiler, where it holds the `[ltr, rtl]` pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StyleValue {
    /// Present but unset.
    #[default]
    Undefined,
    /// Explicitly cleared.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<StyleValue>),
}

impl StyleValue {
    /// Returns the runtime type label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            StyleValue::Undefined => "undefined",
            StyleValue::Null => "null",
            StyleValue::Bool(_) => "boolean",
            StyleValue::Number(_) => "number",
            StyleValue::String(_) => "string",
            StyleValue::Array(_) => "array",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, StyleValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StyleValue::Null)
    }

    /// Returns the string contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::String(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::String(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

/// `None` becomes [`StyleValue::Null`].
impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Null, Into::into)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(values: Vec<T>) -> Self {
        StyleValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Undefined | StyleValue::Null => serializer.serialize_none(),
            StyleValue::Bool(b) => serializer.serialize_bool(*b),
            // Integral numbers serialize without a fractional part, as they
            // would in a style attribute.
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            StyleValue::Number(n) => serializer.serialize_f64(*n),
            StyleValue::String(s) => serializer.serialize_str(s),
            StyleValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(StyleValue::Undefined.type_name(), "undefined");
        assert_eq!(StyleValue::Null.type_name(), "null");
        assert_eq!(StyleValue::from(true).type_name(), "boolean");
        assert_eq!(StyleValue::from(1).type_name(), "number");
        assert_eq!(StyleValue::from("x").type_name(), "string");
        assert_eq!(StyleValue::from(vec!["a", "b"]).type_name(), "array");
    }

    #[test]
    fn test_option_none_is_null() {
        assert_eq!(StyleValue::from(None::<&str>), StyleValue::Null);
        assert_eq!(StyleValue::from(Some("x")), StyleValue::from("x"));
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serde_json::to_string(&StyleValue::from(1)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&StyleValue::from(0.5)).unwrap(),
            "0.5"
        );
    }

    #[test]
    fn test_serialize_unset_values_as_null() {
        assert_eq!(serde_json::to_string(&StyleValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&StyleValue::Undefined).unwrap(),
            "null"
        );
    }
}
