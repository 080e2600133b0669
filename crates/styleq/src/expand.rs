//! Property expansion for claim bookkeeping.
//!
//! An expander maps a property name to the set of names it should count as
//! claiming. This is how logical and physical properties override each other:
//! if `marginInlineStart` expands to `marginLeft` and `marginRight` as well,
//! a higher-priority `marginInlineStart` blocks lower-priority `marginLeft`
//! and `marginRight` declarations.
//!
//! Expansion only affects which names are claimed. Class names and inline
//! values are still recorded under the property as written.

use std::sync::Arc;

/// The names a property claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyExpansion {
    One(String),
    Many(Vec<String>),
}

impl PropertyExpansion {
    /// Iterates the claimed names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            PropertyExpansion::One(name) => std::slice::from_ref(name),
            PropertyExpansion::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for PropertyExpansion {
    fn from(name: &str) -> Self {
        PropertyExpansion::One(name.to_string())
    }
}

impl From<String> for PropertyExpansion {
    fn from(name: String) -> Self {
        PropertyExpansion::One(name)
    }
}

impl From<Vec<String>> for PropertyExpansion {
    fn from(names: Vec<String>) -> Self {
        PropertyExpansion::Many(names)
    }
}

impl From<&[&str]> for PropertyExpansion {
    fn from(names: &[&str]) -> Self {
        PropertyExpansion::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// A pluggable property expander.
pub type PropertyExpander = Arc<dyn Fn(&str) -> PropertyExpansion + Send + Sync>;

const LOGICAL_PROPERTIES: &[(&str, &[&str])] = &[
    (
        "marginInlineStart",
        &["marginInlineStart", "marginLeft", "marginRight"],
    ),
    (
        "marginInlineEnd",
        &["marginInlineEnd", "marginRight", "marginLeft"],
    ),
    (
        "paddingInlineStart",
        &["paddingInlineStart", "paddingLeft", "paddingRight"],
    ),
    (
        "paddingInlineEnd",
        &["paddingInlineEnd", "paddingRight", "paddingLeft"],
    ),
    (
        "marginLeft",
        &["marginLeft", "marginInlineStart", "marginInlineEnd"],
    ),
    (
        "marginRight",
        &["marginRight", "marginInlineEnd", "marginInlineStart"],
    ),
    (
        "paddingLeft",
        &["paddingLeft", "paddingInlineStart", "paddingInlineEnd"],
    ),
    (
        "paddingRight",
        &["paddingRight", "paddingInlineEnd", "paddingInlineStart"],
    ),
];

/// Expander treating inline-start/end margins and paddings as equivalent to
/// their left/right physical counterparts, in both directions.
///
/// # Example
///
/// ```rust
/// use styleq::{logical_properties, styles, CompiledStyle, Styleq, StyleqOptions};
///
/// let resolver = Styleq::factory(StyleqOptions::new().property_expander(logical_properties()));
/// let logical = CompiledStyle::new()
///     .class("marginInlineStart", "margin-start-0px")
///     .class("marginInlineEnd", "margin-end-10px")
///     .into_descriptor();
/// let physical = CompiledStyle::new().class("marginLeft", "margin-left-4px").into_descriptor();
///
/// let resolved = resolver.resolve(&styles![&logical, &physical]);
/// assert_eq!(resolved.class_name, "margin-left-4px");
/// ```
pub fn logical_properties() -> PropertyExpander {
    Arc::new(|property: &str| -> PropertyExpansion {
        LOGICAL_PROPERTIES
            .iter()
            .find(|(name, _)| *name == property)
            .map_or_else(|| property.into(), |(_, names)| (*names).into())
    })
}
