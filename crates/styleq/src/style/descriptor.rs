//! Compiled and dynamic style descriptors.

use std::sync::Arc;

use super::value::StyleValue;

/// A shared style descriptor.
///
/// The resolver's cache is keyed by the identity of the `Arc` allocation, not
/// by contents: clone the `Arc` to reuse a descriptor across merges, and avoid
/// rebuilding equal descriptors on every call.
pub type Descriptor = Arc<Style>;

/// The two kinds of style object.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// Property values are pre-generated class-name tokens.
    Compiled(CompiledStyle),
    /// Property values are literal runtime values, applied inline.
    Dynamic(DynamicStyle),
}

impl Style {
    pub fn is_compiled(&self) -> bool {
        matches!(self, Style::Compiled(_))
    }

    pub fn as_compiled(&self) -> Option<&CompiledStyle> {
        match self {
            Style::Compiled(style) => Some(style),
            Style::Dynamic(_) => None,
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicStyle> {
        match self {
            Style::Dynamic(style) => Some(style),
            Style::Compiled(_) => None,
        }
    }
}

impl From<CompiledStyle> for Style {
    fn from(style: CompiledStyle) -> Self {
        Style::Compiled(style)
    }
}

impl From<DynamicStyle> for Style {
    fn from(style: DynamicStyle) -> Self {
        Style::Dynamic(style)
    }
}

/// The value of the compiled marker.
///
/// A bare marker corresponds to `$$css: true`; a label is a human-readable
/// name for the descriptor that ends up in the resolved debug string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Anonymous,
    Label(String),
}

/// A style object whose values are class-name tokens.
///
/// Entries keep declaration order. Setting a property that already exists
/// replaces its value in place.
///
/// # Example
///
/// ```rust
/// use styleq::CompiledStyle;
///
/// let button = CompiledStyle::new()
///     .label("Button.styles.root")
///     .class("display", "display-flex")
///     .class("color", "color-red")
///     .unset("outline")
///     .into_descriptor();
///
/// assert!(button.is_compiled());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledStyle {
    marker: Marker,
    localize: bool,
    entries: Vec<(String, StyleValue)>,
}

impl CompiledStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debug label carried by the compiled marker.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.marker = Marker::Label(label.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Flags the descriptor as carrying `[ltr, rtl]` value pairs that a
    /// bidirectional compiler must resolve before merging.
    pub fn localized(mut self) -> Self {
        self.localize = true;
        self
    }

    /// Adds a class-name token for `property`.
    pub fn class(self, property: impl Into<String>, token: impl Into<String>) -> Self {
        self.set(property, StyleValue::String(token.into()))
    }

    /// Claims `property` without contributing a class name.
    pub fn unset(self, property: impl Into<String>) -> Self {
        self.set(property, StyleValue::Null)
    }

    /// Sets an arbitrary value.
    ///
    /// Values other than strings and `Null` are accepted here so that loosely
    /// typed input can be represented; the resolver reports them as invalid.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        upsert(&mut self.entries, property.into(), value.into());
        self
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn debug_label(&self) -> Option<&str> {
        match &self.marker {
            Marker::Label(label) => Some(label),
            Marker::Anonymous => None,
        }
    }

    pub fn is_localized(&self) -> bool {
        self.localize
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        lookup(&self.entries, property)
    }

    /// Iterates entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wraps the style in a new shared descriptor.
    pub fn into_descriptor(self) -> Descriptor {
        Arc::new(Style::Compiled(self))
    }
}

/// A style object whose values are applied as inline styles.
///
/// # Example
///
/// ```rust
/// use styleq::DynamicStyle;
///
/// let inline = DynamicStyle::new()
///     .set("opacity", 0.5)
///     .set("width", "100px")
///     .into_descriptor();
///
/// assert!(!inline.is_compiled());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicStyle {
    entries: Vec<(String, StyleValue)>,
}

impl DynamicStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        upsert(&mut self.entries, property.into(), value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        lookup(&self.entries, property)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_descriptor(self) -> Descriptor {
        Arc::new(Style::Dynamic(self))
    }
}

/// Replaces the value for `key` in place, or appends a new entry.
pub(crate) fn upsert(entries: &mut Vec<(String, StyleValue)>, key: String, value: StyleValue) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

fn lookup<'a>(entries: &'a [(String, StyleValue)], key: &str) -> Option<&'a StyleValue> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}
