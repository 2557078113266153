//! Errors raised while converting between typed values and vectorized values.

use thiserror::Error;

use crate::ValueKind;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConversionError {
    /// Component count does not match what the kind requires.
    #[error("unsupported shape for {kind}: expected {expected} components, got {actual}")]
    UnsupportedShape {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },

    /// The vectorized value carries a kind the target type cannot be built from.
    #[error("cannot build {target} from a {actual} value")]
    KindMismatch {
        target: &'static str,
        actual: ValueKind,
    },

    /// The type has no entry in the conversion table.
    #[error("unsupported type: {type_name} has no registered conversion")]
    UnsupportedType { type_name: &'static str },

    /// NaN or infinite component handed to a vectorized value.
    #[error("component {index} of {kind} is not finite")]
    NonFiniteComponent { kind: ValueKind, index: usize },
}

impl ConversionError {
    pub(crate) fn shape(kind: &ValueKind, actual: usize) -> Self {
        Self::UnsupportedShape {
            kind: kind.clone(),
            expected: kind.arity(),
            actual,
        }
    }
}
