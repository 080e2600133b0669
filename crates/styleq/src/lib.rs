//! # styleq - merge style objects into class names and inline styles
//!
//! A resolver takes an ordered, possibly nested list of style descriptors and
//! produces one class-name string and one inline style mapping. Two kinds of
//! descriptor can be mixed freely:
//!
//! - **Compiled** styles ([`CompiledStyle`]) map properties to pre-generated
//!   class-name tokens.
//! - **Dynamic** styles ([`DynamicStyle`]) map properties to literal values
//!   that end up in the inline style.
//!
//! Later styles win. Each property is resolved at most once, by the
//! last-supplied style that declares it, whichever kind that style is.
//!
//! ## Quick Start
//!
//! ```rust
//! use styleq::{styleq, styles, CompiledStyle, DynamicStyle, StyleInput, StyleValue};
//!
//! let root = CompiledStyle::new()
//!     .class("display", "x-display-flex")
//!     .class("color", "x-color-black")
//!     .into_descriptor();
//! let active = CompiledStyle::new().class("color", "x-color-blue").into_descriptor();
//! let width = DynamicStyle::new().set("width", "120px").into_descriptor();
//!
//! let is_active = true;
//! let resolved = styleq(&styles![&root, StyleInput::when(is_active, &active), &width]);
//!
//! assert_eq!(resolved.class_name, "x-display-flex x-color-blue");
//! let inline = resolved.inline_style.unwrap();
//! assert_eq!(inline.get("width"), Some(&StyleValue::from("120px")));
//! ```
//!
//! ## Memoization
//!
//! Merging the same compiled descriptors in the same order again is served
//! from a [`StyleCache`], a trie keyed by descriptor identity. Identity is the
//! [`Descriptor`] (`Arc`) allocation: build descriptors once and clone the
//! `Arc` to reuse them. Cache entries do not keep descriptors alive.
//! Resolvers with a property expander memoize into a cache of their own.
//!
//! ## Configuration
//!
//! [`Styleq::factory`] builds resolvers with their own [`StyleqOptions`]:
//! cache and mix switches, a descriptor `transform` hook, a property
//! expander (see [`logical_properties`]), an injected cache, and a
//! diagnostics handler.

pub mod cache;
pub mod expand;
pub mod resolve;
pub mod style;

pub use cache::StyleCache;
pub use expand::{logical_properties, PropertyExpander, PropertyExpansion};
pub use resolve::{
    styleq, DiagnosticHandler, InlineStyle, ResolveFlags, Resolved, Styleq, StyleqOptions,
    Transform,
};
pub use style::{
    CompiledStyle, Descriptor, DynamicStyle, Marker, Style, StyleDiagnostic, StyleError,
    StyleInput, StyleValue, COMPILED_KEY, LOCALIZE_KEY,
};
