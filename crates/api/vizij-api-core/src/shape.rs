//! Type tags for vectorized values.
//!
//! A [`ValueKind`] identifies the shape of a value and fixes how many numeric
//! components its vectorized form carries. Two vectorized values with the same
//! kind always have component sequences of the same length.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The type tag of a vectorized value.
///
/// Built-in kinds cover the shapes in [`crate::Value`]. `Custom` kinds are
/// declared by callers that register their own conversions in a
/// [`crate::ConversionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "id", content = "data")]
pub enum ValueKind {
    /// `[v]`
    Float,
    /// `[x, y]`; also used for points and sizes.
    Vec2,
    /// `[x, y, z]`
    Vec3,
    /// `[x, y, z, w]`
    Vec4,
    /// `[x, y, width, height]`
    Rect,
    /// `[top, left, bottom, right]`
    Insets,
    /// 2D affine transform `[a, b, c, d, tx, ty]`
    Affine,
    /// 4x4 transform, row-major `m11..m44`
    Matrix4,
    /// `[r, g, b, a]`
    ColorRgba,
    /// `[hue, saturation, brightness, a]`, hue normalized to `[0, 1]`
    ColorHsba,
    /// `[white, a]`
    ColorGray,
    /// `[c, m, y, k, a]`
    ColorCmyka,
    /// Caller-defined shape with a fixed component count.
    Custom { name: String, arity: usize },
}

impl ValueKind {
    /// Number of components every vectorized value of this kind carries.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            ValueKind::Float => 1,
            ValueKind::Vec2 | ValueKind::ColorGray => 2,
            ValueKind::Vec3 => 3,
            ValueKind::Vec4
            | ValueKind::Rect
            | ValueKind::Insets
            | ValueKind::ColorRgba
            | ValueKind::ColorHsba => 4,
            ValueKind::ColorCmyka => 5,
            ValueKind::Affine => 6,
            ValueKind::Matrix4 => 16,
            ValueKind::Custom { arity, .. } => *arity,
        }
    }

    /// Convenience constructor for caller-defined kinds.
    pub fn custom(name: impl Into<String>, arity: usize) -> Self {
        ValueKind::Custom {
            name: name.into(),
            arity,
        }
    }

    #[inline]
    pub fn is_color(&self) -> bool {
        matches!(
            self,
            ValueKind::ColorRgba
                | ValueKind::ColorHsba
                | ValueKind::ColorGray
                | ValueKind::ColorCmyka
        )
    }

    pub fn name(&self) -> &str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Vec2 => "vec2",
            ValueKind::Vec3 => "vec3",
            ValueKind::Vec4 => "vec4",
            ValueKind::Rect => "rect",
            ValueKind::Insets => "insets",
            ValueKind::Affine => "affine",
            ValueKind::Matrix4 => "matrix4",
            ValueKind::ColorRgba => "color-rgba",
            ValueKind::ColorHsba => "color-hsba",
            ValueKind::ColorGray => "color-gray",
            ValueKind::ColorCmyka => "color-cmyka",
            ValueKind::Custom { name, .. } => name,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name(), self.arity())
    }
}
