use crate::foundation::error::{BackdropError, BackdropResult};

pub use kurbo::{Point, Vec2};

/// Straight-alpha color. Channels are sRGB bytes, alpha is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Straight alpha in `[0, 1]`.
    pub a: f64,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Build a color from channels and alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    /// Same channels, replaced alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same channels, alpha multiplied by `factor` and clamped.
    pub fn scale_alpha(self, factor: f64) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// `true` when the color contributes nothing.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// CSS color literal.
    pub fn to_css(self) -> String {
        if self.is_transparent() {
            "transparent".to_string()
        } else if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                css_num(self.a)
            )
        }
    }

    pub(crate) fn validate(self, what: &str) -> BackdropResult<()> {
        if !self.a.is_finite() || !(0.0..=1.0).contains(&self.a) {
            return Err(BackdropError::validation(format!(
                "{what} alpha must be finite and within [0, 1]"
            )));
        }
        Ok(())
    }
}

/// A CSS length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Length {
    /// Percentage of the containing block.
    Percent(f64),
    /// CSS pixels.
    Px(f64),
    /// Percentage of viewport width.
    Vw(f64),
    /// Percentage of viewport height.
    Vh(f64),
}

impl Length {
    /// Zero percent.
    pub const ZERO: Self = Self::Percent(0.0);
    /// One hundred percent.
    pub const FULL: Self = Self::Percent(100.0);

    /// Raw numeric value regardless of unit.
    pub fn value(self) -> f64 {
        match self {
            Self::Percent(v) | Self::Px(v) | Self::Vw(v) | Self::Vh(v) => v,
        }
    }

    /// Same unit, value grown by `px` pixels.
    ///
    /// Relative units assume a nominal 1000px container.
    pub fn grow_px(self, px: f64) -> Self {
        match self {
            Self::Px(v) => Self::Px(v + px),
            Self::Percent(v) => Self::Percent(v + px / 10.0),
            Self::Vw(v) => Self::Vw(v + px / 10.0),
            Self::Vh(v) => Self::Vh(v + px / 10.0),
        }
    }

    /// CSS literal.
    pub fn to_css(self) -> String {
        match self {
            Self::Percent(v) => format!("{}%", css_num(v)),
            Self::Px(v) => format!("{}px", css_num(v)),
            Self::Vw(v) => format!("{}vw", css_num(v)),
            Self::Vh(v) => format!("{}vh", css_num(v)),
        }
    }
}

/// Which point of the box the placement edges refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    /// Edges position the box's top-left corner.
    #[default]
    TopLeft,
    /// Edges position the box's center (`translate: -50% -50%`).
    Center,
}

/// Geometric placement of a layer inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Top edge offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    /// Left edge offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
    /// Right edge offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    /// Bottom edge offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
    /// Box width.
    pub width: Length,
    /// Box height.
    pub height: Length,
    /// Reference point of the edges.
    #[serde(default)]
    pub anchor: Anchor,
}

impl Placement {
    /// Cover the whole parent (`inset: 0`).
    pub fn fill() -> Self {
        Self {
            top: Some(Length::ZERO),
            left: Some(Length::ZERO),
            right: None,
            bottom: None,
            width: Length::FULL,
            height: Length::FULL,
            anchor: Anchor::TopLeft,
        }
    }

    /// Top-left anchored box.
    pub fn at(top: Length, left: Length, width: Length, height: Length) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
            right: None,
            bottom: None,
            width,
            height,
            anchor: Anchor::TopLeft,
        }
    }

    /// Box centered on a percentage point of the parent.
    pub fn centered(left_pct: f64, top_pct: f64, width: Length, height: Length) -> Self {
        Self {
            top: Some(Length::Percent(top_pct)),
            left: Some(Length::Percent(left_pct)),
            right: None,
            bottom: None,
            width,
            height,
            anchor: Anchor::Center,
        }
    }

    /// Same placement with a different vertical edge pair.
    pub fn from_bottom(mut self, bottom: Length) -> Self {
        self.top = None;
        self.bottom = Some(bottom);
        self
    }

    /// Same placement anchored on the right edge.
    pub fn from_right(mut self, right: Length) -> Self {
        self.left = None;
        self.right = Some(right);
        self
    }

    /// Grow the box by `px` on every side, keeping its visual center.
    pub fn grow_px(self, px: f64) -> Self {
        let shift = |edge: Option<Length>| edge.map(|l| l.grow_px(-px));
        let (top, left, right, bottom) = match self.anchor {
            Anchor::Center => (self.top, self.left, self.right, self.bottom),
            Anchor::TopLeft => (
                shift(self.top),
                shift(self.left),
                shift(self.right),
                shift(self.bottom),
            ),
        };
        Self {
            top,
            left,
            right,
            bottom,
            width: self.width.grow_px(2.0 * px),
            height: self.height.grow_px(2.0 * px),
            anchor: self.anchor,
        }
    }

    pub(crate) fn validate(&self, what: &str) -> BackdropResult<()> {
        for (name, len) in [("width", self.width), ("height", self.height)] {
            let v = len.value();
            if !v.is_finite() || v <= 0.0 {
                return Err(BackdropError::validation(format!(
                    "{what} {name} must be finite and > 0"
                )));
            }
        }
        for (name, edge) in [
            ("top", self.top),
            ("left", self.left),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if let Some(l) = edge
                && !l.value().is_finite()
            {
                return Err(BackdropError::validation(format!(
                    "{what} {name} must be finite"
                )));
            }
        }
        if self.top.is_none() && self.bottom.is_none() {
            return Err(BackdropError::validation(format!(
                "{what} needs a top or bottom edge"
            )));
        }
        if self.left.is_none() && self.right.is_none() {
            return Err(BackdropError::validation(format!(
                "{what} needs a left or right edge"
            )));
        }
        Ok(())
    }
}

/// Compositor-friendly 2D transform: translate, then rotate, then scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in CSS pixels.
    #[serde(default = "zero_vec")]
    pub translate: Vec2,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub rotate_deg: f64,
    /// Scale factors, default `(1, 1)`.
    #[serde(default = "unit_vec")]
    pub scale: Vec2,
}

fn zero_vec() -> Vec2 {
    Vec2::ZERO
}

fn unit_vec() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotate_deg: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::default()
        }
    }

    /// Pure rotation.
    pub fn rotate(deg: f64) -> Self {
        Self {
            rotate_deg: deg,
            ..Self::default()
        }
    }

    /// Uniform scale.
    pub fn scale(s: f64) -> Self {
        Self {
            scale: Vec2::new(s, s),
            ..Self::default()
        }
    }

    /// Translation plus uniform scale.
    pub fn translate_scale(x: f64, y: f64, s: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            rotate_deg: 0.0,
            scale: Vec2::new(s, s),
        }
    }

    /// `true` for the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Equivalent affine matrix (rotation about the box origin).
    pub fn to_affine(self) -> kurbo::Affine {
        kurbo::Affine::translate(self.translate)
            * kurbo::Affine::rotate(self.rotate_deg.to_radians())
            * kurbo::Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// CSS `transform` value.
    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return "none".to_string();
        }
        let mut parts = Vec::with_capacity(3);
        if self.translate != Vec2::ZERO {
            parts.push(format!(
                "translate({}px, {}px)",
                css_num(self.translate.x),
                css_num(self.translate.y)
            ));
        }
        if self.rotate_deg != 0.0 {
            parts.push(format!("rotate({}deg)", css_num(self.rotate_deg)));
        }
        if self.scale != Vec2::new(1.0, 1.0) {
            if self.scale.x == self.scale.y {
                parts.push(format!("scale({})", css_num(self.scale.x)));
            } else {
                parts.push(format!(
                    "scale({}, {})",
                    css_num(self.scale.x),
                    css_num(self.scale.y)
                ));
            }
        }
        parts.join(" ")
    }
}

/// Format a number for CSS output: at most 4 decimals, trailing zeros trimmed.
pub(crate) fn css_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
