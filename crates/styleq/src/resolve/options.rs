//! Resolver configuration.

use std::sync::Arc;

use log::error;
use serde::{Deserialize, Serialize};

use crate::cache::StyleCache;
use crate::expand::{PropertyExpander, PropertyExpansion};
use crate::style::{Descriptor, StyleDiagnostic};

/// A pre-classification hook applied to every descriptor the resolver visits.
pub type Transform = Arc<dyn Fn(&Descriptor) -> Descriptor + Send + Sync>;

/// Receives non-fatal diagnostics raised during resolution.
pub type DiagnosticHandler = Arc<dyn Fn(&StyleDiagnostic) + Send + Sync>;

/// Boolean switches, loadable from configuration.
///
/// Field names follow the camelCase spelling used by style tooling:
///
/// ```rust
/// use styleq::ResolveFlags;
///
/// let flags: ResolveFlags = serde_json::from_str(r#"{ "disableMix": true }"#).unwrap();
/// assert!(flags.disable_mix);
/// assert!(!flags.disable_cache);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveFlags {
    /// Bypass the memo cache entirely.
    pub disable_cache: bool,
    /// Merge dynamic styles as whole objects instead of per property.
    pub disable_mix: bool,
}

/// Options for [`Styleq::factory`](crate::Styleq::factory).
///
/// # Example
///
/// ```rust
/// use styleq::{Styleq, StyleqOptions};
///
/// let resolver = Styleq::factory(
///     StyleqOptions::new()
///         .disable_mix(true)
///         .transform_property(|property: &str| property.to_string()),
/// );
/// assert!(resolver.flags().disable_mix);
/// ```
#[derive(Clone, Default)]
pub struct StyleqOptions {
    pub(crate) flags: ResolveFlags,
    pub(crate) transform: Option<Transform>,
    pub(crate) transform_property: Option<PropertyExpander>,
    pub(crate) cache: Option<StyleCache>,
    pub(crate) on_diagnostic: Option<DiagnosticHandler>,
}

impl StyleqOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flags(flags: ResolveFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn disable_cache(mut self, disable: bool) -> Self {
        self.flags.disable_cache = disable;
        self
    }

    pub fn disable_mix(mut self, disable: bool) -> Self {
        self.flags.disable_mix = disable;
        self
    }

    /// Sets the hook applied to each descriptor before it is classified.
    ///
    /// The hook runs every time a descriptor is visited. Return the same
    /// `Arc` for the same input to keep the resolver's cache effective.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Descriptor) -> Descriptor + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Sets the property expander from a closure.
    pub fn transform_property<F, R>(mut self, expand: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: Into<PropertyExpansion>,
    {
        self.transform_property = Some(Arc::new(move |property: &str| expand(property).into()));
        self
    }

    /// Sets a ready-made property expander, such as
    /// [`logical_properties`](crate::logical_properties).
    pub fn property_expander(mut self, expander: PropertyExpander) -> Self {
        self.transform_property = Some(expander);
        self
    }

    /// Uses `cache` instead of the process-wide cache.
    pub fn cache(mut self, cache: StyleCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Routes diagnostics to `handler` instead of the log.
    pub fn on_diagnostic<F>(mut self, handler: F) -> Self
    where
        F: Fn(&StyleDiagnostic) + Send + Sync + 'static,
    {
        self.on_diagnostic = Some(Arc::new(handler));
        self
    }

    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }
}

impl std::fmt::Debug for StyleqOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleqOptions")
            .field("flags", &self.flags)
            .field("transform", &self.transform.is_some())
            .field("transform_property", &self.transform_property.is_some())
            .field("cache", &self.cache.is_some())
            .field("on_diagnostic", &self.on_diagnostic.is_some())
            .finish()
    }
}

/// The default diagnostic handler.
pub(crate) fn log_diagnostic(diagnostic: &StyleDiagnostic) {
    error!("{}", diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_off() {
        let flags: ResolveFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, ResolveFlags::default());
    }

    #[test]
    fn test_flags_camel_case() {
        let flags: ResolveFlags =
            serde_json::from_str(r#"{ "disableCache": true, "disableMix": true }"#).unwrap();
        assert!(flags.disable_cache);
        assert!(flags.disable_mix);

        let json = serde_json::to_string(&ResolveFlags::default()).unwrap();
        assert_eq!(json, r#"{"disableCache":false,"disableMix":false}"#);
    }

    #[test]
    fn test_builder_sets_flags() {
        let options = StyleqOptions::new().disable_cache(true);
        assert!(options.flags().disable_cache);
        assert!(!options.flags().disable_mix);
    }

    #[test]
    fn test_from_flags() {
        let options = StyleqOptions::from_flags(ResolveFlags {
            disable_cache: false,
            disable_mix: true,
        });
        assert!(options.flags().disable_mix);
        assert!(options.transform.is_none());
    }

    #[test]
    fn test_transform_property_wraps_closure() {
        let options = StyleqOptions::new().transform_property(|p: &str| vec![p.to_string(), format!("{}-alias", p)]);
        let expand = options.transform_property.unwrap();
        assert_eq!(
            expand("a").names().collect::<Vec<_>>(),
            vec!["a", "a-alias"]
        );
    }
}
