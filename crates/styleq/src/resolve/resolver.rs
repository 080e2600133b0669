//! The merge loop.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::options::{log_diagnostic, DiagnosticHandler, ResolveFlags, StyleqOptions, Transform};
use super::result::{InlineStyle, Resolved};
use crate::cache::{CacheHit, CacheLevel, CachedChunk, StyleCache};
use crate::expand::{PropertyExpander, PropertyExpansion};
use crate::style::{
    CompiledStyle, Descriptor, DynamicStyle, Marker, Style, StyleDiagnostic, StyleInput,
    StyleValue,
};

static DEFAULT_RESOLVER: Lazy<Styleq> = Lazy::new(Styleq::new);

/// Merges styles with the default resolver.
///
/// The default resolver mixes compiled and dynamic styles per property and
/// memoizes into [`StyleCache::global`].
///
/// # Example
///
/// ```rust
/// use styleq::{styleq, styles, CompiledStyle, DynamicStyle};
///
/// let base = CompiledStyle::new()
///     .class("color", "color-black")
///     .class("display", "display-block")
///     .into_descriptor();
/// let override_color = CompiledStyle::new().class("color", "color-blue").into_descriptor();
/// let inline = DynamicStyle::new().set("opacity", 0.5).into_descriptor();
///
/// let resolved = styleq(&styles![&base, &override_color, &inline]);
/// assert_eq!(resolved.class_name, "display-block color-blue");
/// assert!(resolved.inline_style.unwrap().contains_key("opacity"));
/// ```
pub fn styleq(inputs: &[StyleInput]) -> Resolved {
    DEFAULT_RESOLVER.resolve(inputs)
}

/// A configured style resolver.
///
/// Styles are processed from the last supplied to the first, so later styles
/// win. Each property is claimed by the first style (in that reverse order)
/// that declares it, and lower-priority declarations of a claimed property are
/// dropped. Compiled styles contribute class names; dynamic styles contribute
/// inline values.
#[derive(Clone)]
pub struct Styleq {
    flags: ResolveFlags,
    transform: Option<Transform>,
    transform_property: Option<PropertyExpander>,
    cache: Option<StyleCache>,
    on_diagnostic: DiagnosticHandler,
}

impl Styleq {
    /// Creates a resolver with default options.
    pub fn new() -> Self {
        Self::factory(StyleqOptions::default())
    }

    /// Creates an independently configured resolver.
    ///
    /// Unless caching is disabled or a cache is injected, the resolver shares
    /// the process-wide cache. A resolver with a property expander gets a
    /// cache of its own instead, since the claims it records depend on the
    /// expander.
    pub fn factory(options: StyleqOptions) -> Self {
        let cache = match (options.flags.disable_cache, options.cache) {
            (true, _) => None,
            (false, Some(cache)) => Some(cache),
            (false, None) if options.transform_property.is_some() => Some(StyleCache::new()),
            (false, None) => Some(StyleCache::global()),
        };
        let on_diagnostic: DiagnosticHandler = match options.on_diagnostic {
            Some(handler) => handler,
            None => Arc::new(log_diagnostic),
        };
        Self {
            flags: options.flags,
            transform: options.transform,
            transform_property: options.transform_property,
            cache,
            on_diagnostic,
        }
    }

    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }

    /// The cache this resolver memoizes into, if any.
    pub fn cache(&self) -> Option<&StyleCache> {
        self.cache.as_ref()
    }

    /// Merges `inputs` into a class name and inline style.
    pub fn resolve(&self, inputs: &[StyleInput]) -> Resolved {
        let mut state = Resolution::new(self.cache.as_ref().map(StyleCache::root));
        let mut stack: Vec<&StyleInput> = inputs.iter().collect();

        while let Some(input) = stack.pop() {
            let descriptor = match input {
                StyleInput::Skip => continue,
                StyleInput::List(items) => {
                    stack.extend(items.iter());
                    continue;
                }
                StyleInput::Style(descriptor) => descriptor,
            };

            let transformed;
            let descriptor = match &self.transform {
                Some(transform) => {
                    transformed = transform(descriptor);
                    &transformed
                }
                None => descriptor,
            };

            match &**descriptor {
                Style::Compiled(style) => self.apply_compiled(&mut state, descriptor, style),
                Style::Dynamic(style) if self.flags.disable_mix => state.assign_inline(style),
                Style::Dynamic(style) => self.apply_dynamic(&mut state, style),
            }
        }

        state.finish()
    }

    fn apply_compiled(&self, state: &mut Resolution, descriptor: &Descriptor, style: &CompiledStyle) {
        let hit = state.cursor.as_ref().and_then(|level| level.get(descriptor));
        let class_name = match hit {
            Some(CacheHit { chunk, next }) => {
                for property in chunk.properties.iter() {
                    state.claims.claim(property);
                }
                state.debug = chunk.debug_string;
                state.cursor = Some(next);
                chunk.class_name
            }
            None => {
                let chunk = self.scan_compiled(state, descriptor, style);
                let class_name = Arc::clone(&chunk.class_name);
                if let Some(level) = state.cursor.take() {
                    state.cursor = Some(level.put(descriptor, chunk));
                }
                class_name
            }
        };
        if !class_name.is_empty() {
            state.chunks.push(class_name);
        }
    }

    /// Computes a compiled descriptor's contribution from its properties.
    fn scan_compiled(
        &self,
        state: &mut Resolution,
        descriptor: &Descriptor,
        style: &CompiledStyle,
    ) -> CachedChunk {
        if let Marker::Label(label) = style.marker() {
            state.debug = if state.debug.is_empty() {
                Arc::from(label.as_str())
            } else {
                Arc::from(format!("{}; {}", label, state.debug))
            };
        }

        let record = state.cursor.is_some();
        let mut class_name = String::new();
        let mut properties = Vec::new();

        for (property, value) in style.entries() {
            let token = match value {
                StyleValue::String(token) => Some(token.as_str()),
                StyleValue::Null => None,
                other => {
                    (self.on_diagnostic)(&StyleDiagnostic::InvalidValue {
                        property: property.to_string(),
                        type_name: other.type_name(),
                        descriptor: Arc::clone(descriptor),
                    });
                    None
                }
            };
            if state.claims.contains(property) {
                continue;
            }
            for name in self.expand(property).names() {
                if state.claims.claim(name) && record {
                    properties.push(name.to_string());
                }
            }
            if let Some(token) = token {
                if !class_name.is_empty() {
                    class_name.push(' ');
                }
                class_name.push_str(token);
            }
        }

        CachedChunk {
            class_name: Arc::from(class_name),
            properties: Arc::from(properties),
            debug_string: Arc::clone(&state.debug),
        }
    }

    fn apply_dynamic(&self, state: &mut Resolution, style: &DynamicStyle) {
        let mut contributed = Vec::new();
        let mut claimed_any = false;

        for (property, value) in style.entries() {
            if value.is_undefined() || state.claims.contains(property) {
                continue;
            }
            if !value.is_null() {
                contributed.push((property.to_string(), value.clone()));
            }
            for name in self.expand(property).names() {
                state.claims.claim(name);
            }
            claimed_any = true;
        }

        // The claims made here depend on this particular interleaving of
        // dynamic styles, so nothing processed after them can be memoized.
        if claimed_any {
            state.cursor = None;
        }
        if !contributed.is_empty() {
            state
                .inline
                .get_or_insert_with(InlineStyle::new)
                .merge_under(contributed);
        }
    }

    fn expand(&self, property: &str) -> PropertyExpansion {
        match &self.transform_property {
            Some(expand) => expand(property),
            None => PropertyExpansion::One(property.to_string()),
        }
    }
}

impl Default for Styleq {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Styleq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Styleq")
            .field("flags", &self.flags)
            .field("transform", &self.transform.is_some())
            .field("transform_property", &self.transform_property.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Properties claimed so far. Each name is claimed at most once.
#[derive(Debug, Default)]
struct Claims {
    seen: HashSet<String>,
}

impl Claims {
    fn contains(&self, property: &str) -> bool {
        self.seen.contains(property)
    }

    /// Returns `true` if `property` was not already claimed.
    fn claim(&mut self, property: &str) -> bool {
        if self.seen.contains(property) {
            return false;
        }
        self.seen.insert(property.to_string())
    }
}

/// Per-call transient state.
struct Resolution {
    claims: Claims,
    /// Class-name chunks in processing order (last supplied first).
    chunks: Vec<Arc<str>>,
    inline: Option<InlineStyle>,
    debug: Arc<str>,
    cursor: Option<Arc<CacheLevel>>,
}

impl Resolution {
    fn new(cursor: Option<Arc<CacheLevel>>) -> Self {
        Self {
            claims: Claims::default(),
            chunks: Vec::new(),
            inline: None,
            debug: Arc::from(""),
            cursor,
        }
    }

    /// Whole-object merge used when mixing is disabled.
    fn assign_inline(&mut self, style: &DynamicStyle) {
        self.inline
            .get_or_insert_with(InlineStyle::new)
            .merge_under(style.entries().map(|(k, v)| (k.to_string(), v.clone())));
    }

    fn finish(self) -> Resolved {
        let chunks: Vec<&str> = self.chunks.iter().rev().map(|c| c.as_ref()).collect();
        Resolved {
            class_name: chunks.join(" "),
            inline_style: self.inline,
            debug_string: self.debug.to_string(),
        }
    }
}
