use crate::foundation::core::css_num;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Timing curve applied between two keyframes.
pub enum Ease {
    /// Constant speed.
    Linear,
    /// CSS `ease-in-out`, the default for drifting layers.
    EaseInOut,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; x control points must lie in `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    /// Map linear progress `t` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `animation-timing-function` value.
    pub fn to_css(self) -> String {
        let (x1, y1, x2, y2) = match self {
            Self::Linear => return "linear".to_string(),
            Self::EaseInOut => return "ease-in-out".to_string(),
            Self::InQuad => (0.11, 0.0, 0.5, 0.0),
            Self::OutQuad => (0.5, 1.0, 0.89, 1.0),
            Self::InOutQuad => (0.45, 0.0, 0.55, 1.0),
            Self::InCubic => (0.32, 0.0, 0.67, 0.0),
            Self::OutCubic => (0.33, 1.0, 0.68, 1.0),
            Self::InOutCubic => (0.65, 0.0, 0.35, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        };
        format!(
            "cubic-bezier({}, {}, {}, {})",
            css_num(x1),
            css_num(y1),
            css_num(x2),
            css_num(y2)
        )
    }

    pub(crate) fn is_valid(self) -> bool {
        match self {
            Self::CubicBezier(x1, y1, x2, y2) => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let bez = |a: f64, b: f64, s: f64| {
        let u = 1.0 - s;
        3.0 * u * u * s * a + 3.0 * u * s * s * b + s * s * s
    };

    // x(s) is monotonic for x1, x2 in [0, 1]; bisection is exact enough and never diverges.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut s = t;
    for _ in 0..48 {
        let x = bez(x1, x2, s);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bez(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
