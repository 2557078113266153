//! Color values in several native color models.
//!
//! Each model vectorizes under its own [`ValueKind`], so keyframes in different
//! models never blend channel-by-channel. Use [`Color::to_model`] to normalize a
//! keyframe list to one model before building an interpolator.

use serde::{Deserialize, Serialize};

use crate::vectorized::take_array;
use crate::{ConversionError, ValueKind};

/// Native color model of a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorModel {
    Rgba,
    Hsba,
    Gray,
    Cmyka,
}

impl ColorModel {
    pub fn kind(self) -> ValueKind {
        match self {
            ColorModel::Rgba => ValueKind::ColorRgba,
            ColorModel::Hsba => ValueKind::ColorHsba,
            ColorModel::Gray => ValueKind::ColorGray,
            ColorModel::Cmyka => ValueKind::ColorCmyka,
        }
    }

    pub fn from_kind(kind: &ValueKind) -> Option<Self> {
        match kind {
            ValueKind::ColorRgba => Some(ColorModel::Rgba),
            ValueKind::ColorHsba => Some(ColorModel::Hsba),
            ValueKind::ColorGray => Some(ColorModel::Gray),
            ValueKind::ColorCmyka => Some(ColorModel::Cmyka),
            _ => None,
        }
    }
}

/// Color with all channels in `[0, 1]`; hue is a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum Color {
    Rgba { r: f64, g: f64, b: f64, a: f64 },
    Hsba { h: f64, s: f64, b: f64, a: f64 },
    Gray { white: f64, a: f64 },
    Cmyka { c: f64, m: f64, y: f64, k: f64, a: f64 },
}

impl Default for Color {
    fn default() -> Self {
        Color::Rgba {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl Color {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::Rgba { r, g, b, a }
    }

    pub fn hsba(h: f64, s: f64, b: f64, a: f64) -> Self {
        Self::Hsba { h, s, b, a }
    }

    pub fn gray(white: f64, a: f64) -> Self {
        Self::Gray { white, a }
    }

    pub fn cmyka(c: f64, m: f64, y: f64, k: f64, a: f64) -> Self {
        Self::Cmyka { c, m, y, k, a }
    }

    pub fn model(&self) -> ColorModel {
        match self {
            Self::Rgba { .. } => ColorModel::Rgba,
            Self::Hsba { .. } => ColorModel::Hsba,
            Self::Gray { .. } => ColorModel::Gray,
            Self::Cmyka { .. } => ColorModel::Cmyka,
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.model().kind()
    }

    pub fn alpha(&self) -> f64 {
        match self {
            Self::Rgba { a, .. }
            | Self::Hsba { a, .. }
            | Self::Gray { a, .. }
            | Self::Cmyka { a, .. } => *a,
        }
    }

    /// Channels in the documented order for this model's kind.
    pub fn components(&self) -> Vec<f64> {
        match *self {
            Self::Rgba { r, g, b, a } => vec![r, g, b, a],
            Self::Hsba { h, s, b, a } => vec![h, s, b, a],
            Self::Gray { white, a } => vec![white, a],
            Self::Cmyka { c, m, y, k, a } => vec![c, m, y, k, a],
        }
    }

    /// Rebuild a color from a color kind and its channels.
    pub fn from_components(kind: &ValueKind, components: &[f64]) -> Result<Self, ConversionError> {
        match kind {
            ValueKind::ColorRgba => {
                let [r, g, b, a] = take_array(kind, components)?;
                Ok(Self::Rgba { r, g, b, a })
            }
            ValueKind::ColorHsba => {
                let [h, s, b, a] = take_array(kind, components)?;
                Ok(Self::Hsba { h, s, b, a })
            }
            ValueKind::ColorGray => {
                let [white, a] = take_array(kind, components)?;
                Ok(Self::Gray { white, a })
            }
            ValueKind::ColorCmyka => {
                let [c, m, y, k, a] = take_array(kind, components)?;
                Ok(Self::Cmyka { c, m, y, k, a })
            }
            other => Err(ConversionError::KindMismatch {
                target: "Color",
                actual: other.clone(),
            }),
        }
    }

    /// Convert to RGBA channels.
    pub fn to_rgba(&self) -> (f64, f64, f64, f64) {
        match *self {
            Self::Rgba { r, g, b, a } => (r, g, b, a),
            Self::Hsba { h, s, b, a } => {
                let (r, g, bl) = hsb_to_rgb(h, s, b);
                (r, g, bl, a)
            }
            Self::Gray { white, a } => (white, white, white, a),
            Self::Cmyka { c, m, y, k, a } => {
                ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k), a)
            }
        }
    }

    /// Re-express this color in another model (via RGBA).
    ///
    /// Converting to `Gray` keeps luma only.
    pub fn to_model(&self, model: ColorModel) -> Color {
        if self.model() == model {
            return *self;
        }
        let (r, g, b, a) = self.to_rgba();
        match model {
            ColorModel::Rgba => Self::Rgba { r, g, b, a },
            ColorModel::Hsba => {
                let (h, s, v) = rgb_to_hsb(r, g, b);
                Self::Hsba { h, s, b: v, a }
            }
            ColorModel::Gray => Self::Gray {
                white: 0.299 * r + 0.587 * g + 0.114 * b,
                a,
            },
            ColorModel::Cmyka => {
                let k = 1.0 - r.max(g).max(b);
                if k >= 1.0 {
                    Self::Cmyka {
                        c: 0.0,
                        m: 0.0,
                        y: 0.0,
                        k: 1.0,
                        a,
                    }
                } else {
                    let inv = 1.0 - k;
                    Self::Cmyka {
                        c: (1.0 - r - k) / inv,
                        m: (1.0 - g - k) / inv,
                        y: (1.0 - b - k) / inv,
                        k,
                        a,
                    }
                }
            }
        }
    }
}

/// HSB (hue as a fraction of a turn) to RGB. Hue wraps, so 0 and 1 are both red.
fn hsb_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h6 < 1.0 {
        (c, x, 0.0)
    } else if h6 < 2.0 {
        (x, c, 0.0)
    } else if h6 < 3.0 {
        (0.0, c, x)
    } else if h6 < 4.0 {
        (0.0, x, c)
    } else if h6 < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

fn rgb_to_hsb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max <= 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}
