//! Vectorized values: a type tag paired with an ordered numeric component list.

use serde::{Deserialize, Serialize};

use crate::{ConversionError, ValueKind};

/// A value re-expressed as its [`ValueKind`] plus `kind.arity()` components.
///
/// The component count is checked on construction and cannot change afterwards;
/// [`VectorizedValue::components_mut`] hands out a slice so the values can be
/// overwritten in place without resizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVectorized")]
pub struct VectorizedValue {
    kind: ValueKind,
    components: Vec<f64>,
}

#[derive(Deserialize)]
struct RawVectorized {
    kind: ValueKind,
    components: Vec<f64>,
}

impl TryFrom<RawVectorized> for VectorizedValue {
    type Error = ConversionError;

    fn try_from(raw: RawVectorized) -> Result<Self, Self::Error> {
        VectorizedValue::new(raw.kind, raw.components)
    }
}

impl VectorizedValue {
    /// Build a vectorized value, rejecting a wrong component count or
    /// non-finite components.
    pub fn new(kind: ValueKind, components: Vec<f64>) -> Result<Self, ConversionError> {
        if components.len() != kind.arity() {
            return Err(ConversionError::shape(&kind, components.len()));
        }
        if let Some(index) = components.iter().position(|c| !c.is_finite()) {
            return Err(ConversionError::NonFiniteComponent { kind, index });
        }
        Ok(Self { kind, components })
    }

    /// Build from a slice; see [`VectorizedValue::new`].
    pub fn from_slice(kind: ValueKind, components: &[f64]) -> Result<Self, ConversionError> {
        Self::new(kind, components.to_vec())
    }

    /// All-zero value of the given kind.
    pub fn zeros(kind: ValueKind) -> Self {
        let components = vec![0.0; kind.arity()];
        Self { kind, components }
    }

    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Mutable view of the components. Length is fixed by the kind.
    #[inline]
    pub fn components_mut(&mut self) -> &mut [f64] {
        &mut self.components
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.components.len()
    }

    /// True when both values share kind (and therefore component count).
    #[inline]
    pub fn same_shape(&self, other: &VectorizedValue) -> bool {
        self.kind == other.kind
    }

    /// Overwrite this value's components from another of the same kind.
    pub fn copy_from(&mut self, other: &VectorizedValue) -> Result<(), ConversionError> {
        if !self.same_shape(other) {
            return Err(ConversionError::shape(&self.kind, other.arity()));
        }
        self.components.copy_from_slice(&other.components);
        Ok(())
    }

    pub fn into_parts(self) -> (ValueKind, Vec<f64>) {
        (self.kind, self.components)
    }
}

/// Copy `N` components out of a slice, checking the count against `kind`.
pub(crate) fn take_array<const N: usize>(
    kind: &ValueKind,
    components: &[f64],
) -> Result<[f64; N], ConversionError> {
    if components.len() != N || kind.arity() != N {
        return Err(ConversionError::shape(kind, components.len()));
    }
    let mut out = [0.0f64; N];
    out.copy_from_slice(components);
    Ok(out)
}
