//! Timing functions: deterministic remaps of progress used for easing.
//!
//! - [`Linear`] returns its input
//! - [`CubicBezier`] CSS-style curve, x inverted by bisection
//! - [`Spring`] damped harmonic oscillator, may overshoot 1.0
//! - [`TimingCurve`] serializable set of the built-ins plus polynomial presets
//!
//! Any `Fn(f64) -> f64` is also a timing function.

use serde::{Deserialize, Serialize};

/// Maps raw progress in `[0, 1]` to eased progress.
///
/// Output is usually in `[0, 1]` but may leave it transiently (springs, bezier
/// handles outside the unit square). Implementations must be pure.
pub trait TimingFunction {
    fn apply(&self, progress: f64) -> f64;
}

impl<F> TimingFunction for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn apply(&self, progress: f64) -> f64 {
        self(progress)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Linear;

impl TimingFunction for Linear {
    #[inline]
    fn apply(&self, progress: f64) -> f64 {
        progress
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Cubic bezier from (0,0) to (1,1) with control points (x1,y1), (x2,y2).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl TimingFunction for CubicBezier {
    fn apply(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        // Bezier(0,0,1,1) is exactly linear
        if self.x1 == 0.0 && self.y1 == 0.0 && self.x2 == 1.0 && self.y2 == 1.0 {
            return t;
        }
        if t == 0.0 || t == 1.0 {
            return t;
        }
        // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
        let (x1, x2) = (self.x1.clamp(0.0, 1.0), self.x2.clamp(0.0, 1.0));
        let mut lo = 0.0f64;
        let mut hi = 1.0f64;
        let mut mid = t;
        for _ in 0..48 {
            let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
            if (x - t).abs() < 1e-10 {
                break;
            }
            if x < t {
                lo = mid;
            } else {
                hi = mid;
            }
            mid = 0.5 * (lo + hi);
        }
        cubic_bezier(0.0, self.y1, self.y2, 1.0, mid)
    }
}

/// Damped spring released from 0 toward 1, sampled over one time unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    /// Raw oscillator position at time `t`, starting at rest from 0.
    fn displacement(&self, t: f64) -> f64 {
        let m = self.mass.max(f64::EPSILON);
        let k = self.stiffness.max(f64::EPSILON);
        let w0 = (k / m).sqrt();
        let zeta = self.damping.max(0.0) / (2.0 * (k * m).sqrt());

        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            1.0 - envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else if zeta == 1.0 {
            1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }
}

impl TimingFunction for Spring {
    /// The oscillator is cut off at `t = 1`; its remaining offset from 1 is
    /// spread linearly over the curve so the end lands on 1 without a jump.
    fn apply(&self, progress: f64) -> f64 {
        let t = progress;
        if t <= 0.0 || t >= 1.0 {
            return t.clamp(0.0, 1.0);
        }
        let residual = 1.0 - self.displacement(1.0);
        self.displacement(t) + residual * t
    }
}

/// Built-in timing functions in a form that can be stored in JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimingCurve {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    CubicBezier {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Spring {
        damping: f64,
        stiffness: f64,
        #[serde(default = "unit_mass")]
        mass: f64,
    },
}

fn unit_mass() -> f64 {
    1.0
}

impl From<CubicBezier> for TimingCurve {
    fn from(c: CubicBezier) -> Self {
        TimingCurve::CubicBezier {
            x1: c.x1,
            y1: c.y1,
            x2: c.x2,
            y2: c.y2,
        }
    }
}

impl From<Spring> for TimingCurve {
    fn from(s: Spring) -> Self {
        TimingCurve::Spring {
            damping: s.damping,
            stiffness: s.stiffness,
            mass: s.mass,
        }
    }
}

impl TimingFunction for TimingCurve {
    fn apply(&self, progress: f64) -> f64 {
        match *self {
            Self::Linear => progress,
            Self::InQuad => {
                let t = progress.clamp(0.0, 1.0);
                t * t
            }
            Self::OutQuad => {
                let t = progress.clamp(0.0, 1.0);
                1.0 - (1.0 - t) * (1.0 - t)
            }
            Self::InOutQuad => {
                let t = progress.clamp(0.0, 1.0);
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => {
                let t = progress.clamp(0.0, 1.0);
                t * t * t
            }
            Self::OutCubic => 1.0 - (1.0 - progress.clamp(0.0, 1.0)).powi(3),
            Self::InOutCubic => {
                let t = progress.clamp(0.0, 1.0);
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => CubicBezier { x1, y1, x2, y2 }.apply(progress),
            Self::Spring {
                damping,
                stiffness,
                mass,
            } => Spring {
                damping,
                stiffness,
                mass,
            }
            .apply(progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TimingCurve; 9] = [
        TimingCurve::Linear,
        TimingCurve::InQuad,
        TimingCurve::OutQuad,
        TimingCurve::InOutQuad,
        TimingCurve::InCubic,
        TimingCurve::OutCubic,
        TimingCurve::InOutCubic,
        TimingCurve::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        },
        TimingCurve::Spring {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
        },
    ];

    #[test]
    fn endpoints_are_fixed() {
        for curve in ALL {
            assert!((curve.apply(0.0)).abs() < 1e-12, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{curve:?} at 1");
        }
    }

    #[test]
    fn linear_is_identity() {
        for p in [0.0, 0.1, 0.5, 0.77, 1.0] {
            assert_eq!(Linear.apply(p), p);
            assert_eq!(TimingCurve::Linear.apply(p), p);
        }
    }

    #[test]
    fn identity_bezier_is_linear() {
        let c = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(c.apply(0.3), 0.3);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let c = CubicBezier::EASE_IN_OUT;
        assert!((c.apply(0.5) - 0.5).abs() < 1e-6);
        let a = c.apply(0.2);
        let b = c.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!(a < 0.2);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let spring = Spring::default();
        let peak = (1..100)
            .map(|i| spring.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn overdamped_spring_stays_below_one() {
        let spring = Spring {
            damping: 40.0,
            stiffness: 100.0,
            mass: 1.0,
        };
        let mut prev = 0.0;
        for i in 1..100 {
            let v = spring.apply(i as f64 / 100.0);
            assert!(v >= prev && v < 1.0, "non-monotone at {i}: {v}");
            prev = v;
        }
    }

    #[test]
    fn spring_reaches_one_without_a_jump() {
        for spring in [
            Spring::default(),
            Spring {
                damping: 2.0,
                stiffness: 60.0,
                mass: 1.0,
            },
        ] {
            let near_end = spring.apply(0.999);
            assert!(
                (near_end - spring.apply(1.0)).abs() < 1e-2,
                "{spring:?} jumps from {near_end}"
            );
        }
        assert!((Spring::default().apply(0.999) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn closures_are_timing_functions() {
        let square = |p: f64| p * p;
        assert_eq!(square.apply(0.5), 0.25);
    }

    #[test]
    fn curve_serde_tagging() {
        let json = serde_json::to_value(TimingCurve::from(CubicBezier::EASE_OUT)).unwrap();
        assert_eq!(json["type"], "cubic_bezier");
        let spring: TimingCurve =
            serde_json::from_str(r#"{"type":"spring","damping":5,"stiffness":50}"#).unwrap();
        assert_eq!(
            spring,
            TimingCurve::Spring {
                damping: 5.0,
                stiffness: 50.0,
                mass: 1.0
            }
        );
    }
}
