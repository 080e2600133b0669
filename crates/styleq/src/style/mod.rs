//! Style data model.
//!
//! - [`Style`]: a compiled or dynamic style object
//! - [`Descriptor`]: a shared, identity-carrying handle to a [`Style`]
//! - [`StyleInput`]: nested, conditional resolver arguments
//! - [`StyleValue`]: a single property value
//! - [`StyleError`] and [`StyleDiagnostic`]: input errors and non-fatal
//!   resolver reports

mod descriptor;
mod error;
mod input;
mod json;
mod value;

pub use descriptor::{CompiledStyle, Descriptor, DynamicStyle, Marker, Style};
pub use error::{StyleDiagnostic, StyleError};
pub use input::StyleInput;
pub use json::{COMPILED_KEY, LOCALIZE_KEY};
pub use value::StyleValue;

pub(crate) use descriptor::upsert;
