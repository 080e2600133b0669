//! Nested, conditional style input.

use std::sync::Arc;

use super::descriptor::{CompiledStyle, Descriptor, DynamicStyle};

/// One argument to the resolver.
///
/// Lists may nest arbitrarily; nesting only affects flattening order.
/// [`StyleInput::Skip`] stands in for `false`, `null`, or an absent style and
/// is ignored, which makes conditional styles easy to write:
///
/// ```rust
/// use styleq::{CompiledStyle, StyleInput};
///
/// let base = CompiledStyle::new().class("color", "color-black").into_descriptor();
/// let active = CompiledStyle::new().class("color", "color-blue").into_descriptor();
/// let is_active = false;
///
/// let input = StyleInput::from(vec![
///     StyleInput::from(&base),
///     StyleInput::when(is_active, &active),
/// ]);
/// # let _ = input;
/// ```
#[derive(Debug, Clone, Default)]
pub enum StyleInput {
    #[default]
    Skip,
    Style(Descriptor),
    List(Vec<StyleInput>),
}

impl StyleInput {
    /// Returns `input` when `condition` holds, otherwise [`StyleInput::Skip`].
    pub fn when(condition: bool, input: impl Into<StyleInput>) -> Self {
        if condition {
            input.into()
        } else {
            StyleInput::Skip
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, StyleInput::Skip)
    }
}

impl From<Descriptor> for StyleInput {
    fn from(descriptor: Descriptor) -> Self {
        StyleInput::Style(descriptor)
    }
}

impl From<&Descriptor> for StyleInput {
    fn from(descriptor: &Descriptor) -> Self {
        StyleInput::Style(Arc::clone(descriptor))
    }
}

/// Wraps a fresh descriptor. Each conversion allocates a new identity, so
/// the result never hits the cache on later calls.
impl From<CompiledStyle> for StyleInput {
    fn from(style: CompiledStyle) -> Self {
        StyleInput::Style(style.into_descriptor())
    }
}

impl From<DynamicStyle> for StyleInput {
    fn from(style: DynamicStyle) -> Self {
        StyleInput::Style(style.into_descriptor())
    }
}

impl<T: Into<StyleInput>> From<Option<T>> for StyleInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(StyleInput::Skip, Into::into)
    }
}

impl<T: Into<StyleInput>> From<Vec<T>> for StyleInput {
    fn from(items: Vec<T>) -> Self {
        StyleInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<StyleInput>, const N: usize> From<[T; N]> for StyleInput {
    fn from(items: [T; N]) -> Self {
        StyleInput::List(items.into_iter().map(Into::into).collect())
    }
}

/// Builds an array of [`StyleInput`]s from anything convertible.
///
/// ```rust
/// use styleq::{styleq, styles, CompiledStyle};
///
/// let a = CompiledStyle::new().class("a", "a1").into_descriptor();
/// let b = CompiledStyle::new().class("b", "b1").into_descriptor();
///
/// let resolved = styleq(&styles![&a, styles![&b, None::<&styleq::Descriptor>]]);
/// assert_eq!(resolved.class_name, "a1 b1");
/// ```
#[macro_export]
macro_rules! styles {
    ($($input:expr),* $(,)?) => {
        [$($crate::StyleInput::from($input)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_when_false_is_skip() {
        let style = CompiledStyle::new().class("a", "a").into_descriptor();
        assert!(StyleInput::when(false, &style).is_skip());
        assert!(!StyleInput::when(true, &style).is_skip());
    }

    #[test]
    fn test_from_option() {
        let none: Option<Descriptor> = None;
        assert!(StyleInput::from(none).is_skip());
    }

    #[test]
    fn test_from_reference_keeps_identity() {
        let style = CompiledStyle::new().class("a", "a").into_descriptor();
        match StyleInput::from(&style) {
            StyleInput::Style(d) => assert!(Arc::ptr_eq(&d, &style)),
            other => panic!("expected a style, got {:?}", other),
        }
    }

    #[test]
    fn test_from_nested_arrays() {
        let style = CompiledStyle::new().class("a", "a").into_descriptor();
        let input = StyleInput::from([styles![&style], styles![StyleInput::Skip]]);
        match input {
            StyleInput::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected a list, got {:?}", other),
        }
    }
}
