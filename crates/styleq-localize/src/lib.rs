//! # styleq-localize - bidirectional style compilation for styleq
//!
//! Compiled styles flagged as localized carry `[ltr, rtl]` pairs instead of
//! single class names:
//!
//! ```json
//! { "$$css": true, "$$css$localize": true, "float": ["float-left", "float-right"] }
//! ```
//!
//! [`localize`] turns such a style into a plain compiled style for one
//! writing direction. Results are memoized per source, so the output keeps a
//! stable identity and stays cacheable by the resolver.
//!
//! To localize every style a resolver sees, build it with
//! [`localized_options`] and flip the shared [`DirectionCell`] when the
//! document direction changes.

mod direction;
mod localizer;

pub use direction::DirectionCell;
pub use localizer::{localize, localized_options, Localizer};
