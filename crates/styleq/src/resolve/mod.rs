//! Style resolution.
//!
//! - [`Styleq`]: a configured resolver
//! - [`styleq`]: the default, process-wide resolver
//! - [`StyleqOptions`] and [`ResolveFlags`]: resolver configuration
//! - [`Resolved`] and [`InlineStyle`]: merge results

mod options;
mod resolver;
mod result;

pub use options::{DiagnosticHandler, ResolveFlags, StyleqOptions, Transform};
pub use resolver::{styleq, Styleq};
pub use result::{InlineStyle, Resolved};
