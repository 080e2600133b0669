//! Resolution results.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::style::{upsert, StyleValue};

/// The merged output of one resolver call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolved {
    /// Space-separated class names, in the order the styles were supplied.
    pub class_name: String,
    /// Inline styles, or `None` when no dynamic style contributed a value.
    pub inline_style: Option<InlineStyle>,
    /// `; `-separated debug labels of the compiled styles that were merged.
    pub debug_string: String,
}

impl Resolved {
    /// Splits the result into `(class_name, inline_style, debug_string)`.
    pub fn into_parts(self) -> (String, Option<InlineStyle>, String) {
        (self.class_name, self.inline_style, self.debug_string)
    }
}

/// Insertion-ordered inline style mapping.
///
/// Serializes as a JSON object; `Undefined` values are left out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    entries: Vec<(String, StyleValue)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `lower` underneath the current entries.
    ///
    /// The resulting key order lists `lower`'s keys first, followed by keys
    /// only present here; values already present here win.
    pub(crate) fn merge_under<I>(&mut self, lower: I)
    where
        I: IntoIterator<Item = (String, StyleValue)>,
    {
        let upper = std::mem::take(&mut self.entries);
        let mut merged: Vec<(String, StyleValue)> = Vec::new();
        for (key, value) in lower.into_iter().chain(upper) {
            upsert(&mut merged, key, value);
        }
        self.entries = merged;
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Vec::new();
        for (key, value) in iter {
            upsert(&mut entries, key.into(), value.into());
        }
        Self { entries }
    }
}

impl Serialize for InlineStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter().filter(|(_, v)| !v.is_undefined()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
