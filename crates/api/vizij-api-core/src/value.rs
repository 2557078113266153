//! Value: the built-in typed values that can be interpolated.
//! All numeric payloads are f64.

use serde::{Deserialize, Serialize};

use crate::vectorized::take_array;
use crate::{Color, ConversionError, ValueKind};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f64),

    /// 2D vector, point or size
    Vec2([f64; 2]),

    /// 3D vector
    Vec3([f64; 3]),

    /// 4D vector
    Vec4([f64; 4]),

    /// Axis-aligned rectangle
    Rect { origin: [f64; 2], size: [f64; 2] },

    /// Edge insets
    Insets {
        top: f64,
        left: f64,
        bottom: f64,
        right: f64,
    },

    /// 2D affine transform `[a, b, c, d, tx, ty]`
    Affine([f64; 6]),

    /// 4x4 transform, row-major
    Matrix4([f64; 16]),

    /// Color in one of the supported models
    Color(Color),
}

impl Value {
    /// Return the type tag of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Rect { .. } => ValueKind::Rect,
            Value::Insets { .. } => ValueKind::Insets,
            Value::Affine(_) => ValueKind::Affine,
            Value::Matrix4(_) => ValueKind::Matrix4,
            Value::Color(c) => c.kind(),
        }
    }

    /// Every numeric degree of freedom, in the order documented on [`ValueKind`].
    pub fn components(&self) -> Vec<f64> {
        match self {
            Value::Float(v) => vec![*v],
            Value::Vec2(a) => a.to_vec(),
            Value::Vec3(a) => a.to_vec(),
            Value::Vec4(a) => a.to_vec(),
            Value::Rect { origin, size } => vec![origin[0], origin[1], size[0], size[1]],
            Value::Insets {
                top,
                left,
                bottom,
                right,
            } => vec![*top, *left, *bottom, *right],
            Value::Affine(m) => m.to_vec(),
            Value::Matrix4(m) => m.to_vec(),
            Value::Color(c) => c.components(),
        }
    }

    /// Create a value from a kind and its components.
    pub fn from_components(kind: &ValueKind, components: &[f64]) -> Result<Value, ConversionError> {
        match kind {
            ValueKind::Float => {
                let [v] = take_array(kind, components)?;
                Ok(Value::Float(v))
            }
            ValueKind::Vec2 => Ok(Value::Vec2(take_array(kind, components)?)),
            ValueKind::Vec3 => Ok(Value::Vec3(take_array(kind, components)?)),
            ValueKind::Vec4 => Ok(Value::Vec4(take_array(kind, components)?)),
            ValueKind::Rect => {
                let [x, y, w, h] = take_array(kind, components)?;
                Ok(Value::rect(x, y, w, h))
            }
            ValueKind::Insets => {
                let [top, left, bottom, right] = take_array(kind, components)?;
                Ok(Value::Insets {
                    top,
                    left,
                    bottom,
                    right,
                })
            }
            ValueKind::Affine => Ok(Value::Affine(take_array(kind, components)?)),
            ValueKind::Matrix4 => Ok(Value::Matrix4(take_array(kind, components)?)),
            ValueKind::ColorRgba
            | ValueKind::ColorHsba
            | ValueKind::ColorGray
            | ValueKind::ColorCmyka => Ok(Value::Color(Color::from_components(kind, components)?)),
            ValueKind::Custom { .. } => Err(ConversionError::KindMismatch {
                target: "Value",
                actual: kind.clone(),
            }),
        }
    }

    /// Convenience constructors
    pub fn f(v: f64) -> Self {
        Value::Float(v)
    }

    pub fn vec2(x: f64, y: f64) -> Self {
        Value::Vec2([x, y])
    }

    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Value::Vec3([x, y, z])
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Value::Rect {
            origin: [x, y],
            size: [width, height],
        }
    }

    pub fn identity_affine() -> Self {
        Value::Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    pub fn identity_matrix4() -> Self {
        let mut m = [0.0; 16];
        for i in 0..4 {
            m[i * 4 + i] = 1.0;
        }
        Value::Matrix4(m)
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Value::Color(color)
    }
}
