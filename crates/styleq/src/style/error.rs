//! Style input errors and resolver diagnostics.

use super::descriptor::Descriptor;

/// Error returned when loosely typed input cannot be turned into styles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// An item that is not a style object, a list, `false`, or `null`.
    #[error("malformed style input at {path}: expected an object, array, false or null, found {found}")]
    MalformedInput { path: String, found: &'static str },
    /// The compiled marker is neither `true` nor a debug label.
    #[error("invalid compiled marker at {path}: expected true or a string, found {found}")]
    InvalidMarker { path: String, found: &'static str },
    /// The localize marker appears on an object without a compiled marker.
    #[error("localize marker at {path} requires a compiled style")]
    LocalizeWithoutCompiled { path: String },
    /// A property value is a nested object.
    #[error("unsupported value for property '{property}' at {path}: nested objects are not style values")]
    UnsupportedValue { path: String, property: String },
}

/// A non-fatal problem found while resolving styles.
///
/// Diagnostics never abort a merge; the resolver reports them through the
/// configured handler and keeps going with a partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleDiagnostic {
    /// A compiled descriptor holds a value that is not a class-name token.
    ///
    /// The property still counts as claimed, but contributes no class name.
    #[error("styleq: {property} typeof {type_name} is not \"string\" or \"null\" in {descriptor:?}")]
    InvalidValue {
        property: String,
        type_name: &'static str,
        descriptor: Descriptor,
    },
}
