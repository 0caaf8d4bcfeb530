use crate::{
    animation::ease::Ease,
    foundation::core::{Color, Transform2D, Vec2},
    foundation::error::{BackdropError, BackdropResult},
};

/// Linear interpolation between two values of the same kind.
pub trait Lerp: Sized {
    /// Interpolate from `a` (t = 0) to `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotate_deg: a.rotate_deg + (b.rotate_deg - a.rotate_deg) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: a.a + (b.a - a.a) * t,
        }
    }
}

/// A CSS property a keyframe channel animates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum AnimatedProperty {
    /// `transform`; handled by the compositor.
    Transform,
    /// `opacity`; handled by the compositor.
    Opacity,
    /// `filter`; forces re-rasterization of the filtered surface.
    Filter,
    /// `box-shadow`; forces repaint.
    BoxShadow,
    /// `background-position`; forces repaint.
    BackgroundPosition,
    /// Anything else, by CSS name.
    Other(String),
}

impl AnimatedProperty {
    /// Parse a CSS property name.
    pub fn from_css_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "transform" => Self::Transform,
            "opacity" => Self::Opacity,
            "filter" | "backdrop-filter" => Self::Filter,
            "box-shadow" | "boxshadow" => Self::BoxShadow,
            "background-position" | "backgroundposition" => Self::BackgroundPosition,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSS property name.
    pub fn css_name(&self) -> &str {
        match self {
            Self::Transform => "transform",
            Self::Opacity => "opacity",
            Self::Filter => "filter",
            Self::BoxShadow => "box-shadow",
            Self::BackgroundPosition => "background-position",
            Self::Other(name) => name,
        }
    }

    /// `true` when the compositor can update the property without a repaint.
    pub fn is_compositor_safe(&self) -> bool {
        matches!(self, Self::Transform | Self::Opacity)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One key of a channel, at a cycle progress in `[0, 1]`.
pub struct Keyframe<T> {
    /// Cycle progress of this key.
    pub at: f64,
    /// Value at this key.
    pub value: T,
    /// Ease toward the next key; the binding's ease is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered keys for one value kind.
pub struct Keyframes<T> {
    /// Keys sorted by `at`.
    pub keys: Vec<Keyframe<T>>,
}

impl<T> Keyframes<T> {
    /// Keys spread evenly over the cycle, as `[a, b, c]` value lists are in motion libraries.
    pub fn evenly(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        let n = values.len();
        let keys = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Keyframe {
                at: if n <= 1 {
                    0.0
                } else {
                    i as f64 / (n - 1) as f64
                },
                value,
                ease: None,
            })
            .collect();
        Self { keys }
    }

    /// Validate key ordering and bounds.
    pub fn validate(&self) -> BackdropResult<()> {
        if self.keys.is_empty() {
            return Err(BackdropError::animation(
                "keyframes must have at least one key",
            ));
        }
        for k in &self.keys {
            if !k.at.is_finite() || !(0.0..=1.0).contains(&k.at) {
                return Err(BackdropError::animation(
                    "keyframe offsets must be within [0, 1]",
                ));
            }
            if let Some(e) = k.ease
                && !e.is_valid()
            {
                return Err(BackdropError::animation("keyframe ease is invalid"));
            }
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(BackdropError::animation(
                "keyframe keys must be sorted by offset",
            ));
        }
        Ok(())
    }
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Sample at cycle progress `p`, easing each segment with the key's ease or `default_ease`.
    pub fn sample(&self, p: f64, default_ease: Ease) -> BackdropResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(BackdropError::animation("keyframes has no keys"));
        };
        let idx = self.keys.partition_point(|k| k.at <= p);
        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return Ok(a.value.clone());
        }
        let t = (p - a.at) / span;
        let te = a.ease.unwrap_or(default_ease).apply(t);
        Ok(T::lerp(&a.value, &b.value, te))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One animated property of a timeline.
pub enum Channel {
    /// Animated transform.
    Transform(Keyframes<Transform2D>),
    /// Animated opacity, clamped to `[0, 1]` at evaluation time.
    Opacity(Keyframes<f64>),
    /// Any other property with literal CSS values. Kept representable so scene files that
    /// declare them can be reported by the policy instead of failing to parse.
    Raw {
        /// CSS property name.
        property: String,
        /// Literal CSS values per key.
        keys: Vec<Keyframe<String>>,
    },
}

impl Channel {
    /// The property this channel animates.
    pub fn property(&self) -> AnimatedProperty {
        match self {
            Self::Transform(_) => AnimatedProperty::Transform,
            Self::Opacity(_) => AnimatedProperty::Opacity,
            Self::Raw { property, .. } => AnimatedProperty::from_css_name(property),
        }
    }

    fn validate(&self) -> BackdropResult<()> {
        match self {
            Self::Transform(k) => k.validate(),
            Self::Opacity(k) => {
                k.validate()?;
                if k.keys.iter().any(|k| !k.value.is_finite()) {
                    return Err(BackdropError::animation("opacity keys must be finite"));
                }
                Ok(())
            }
            Self::Raw { property, keys } => {
                if property.trim().is_empty() {
                    return Err(BackdropError::animation(
                        "raw channel property must be non-empty",
                    ));
                }
                if keys.is_empty() {
                    return Err(BackdropError::animation(format!(
                        "raw channel '{property}' must have at least one key"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Compositor values produced by sampling a timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ChannelSample {
    /// Sampled transform, when the timeline animates it.
    pub transform: Option<Transform2D>,
    /// Sampled opacity, when the timeline animates it.
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named set of channels, the data behind one CSS `@keyframes` rule.
pub struct Timeline {
    /// Animated channels; at most one per property.
    pub channels: Vec<Channel>,
}

impl Timeline {
    /// Timeline with a transform channel only.
    pub fn transform(keys: Keyframes<Transform2D>) -> Self {
        Self {
            channels: vec![Channel::Transform(keys)],
        }
    }

    /// Timeline with an opacity channel only.
    pub fn opacity(keys: Keyframes<f64>) -> Self {
        Self {
            channels: vec![Channel::Opacity(keys)],
        }
    }

    /// Timeline with both compositor channels.
    pub fn transform_opacity(transform: Keyframes<Transform2D>, opacity: Keyframes<f64>) -> Self {
        Self {
            channels: vec![Channel::Transform(transform), Channel::Opacity(opacity)],
        }
    }

    /// Every property the timeline touches.
    pub fn properties(&self) -> Vec<AnimatedProperty> {
        self.channels.iter().map(Channel::property).collect()
    }

    /// Validate channels and reject duplicate properties.
    pub fn validate(&self) -> BackdropResult<()> {
        if self.channels.is_empty() {
            return Err(BackdropError::animation(
                "timeline must have at least one channel",
            ));
        }
        let mut seen = std::collections::BTreeSet::new();
        for ch in &self.channels {
            ch.validate()?;
            let prop = ch.property();
            if !seen.insert(prop.clone()) {
                return Err(BackdropError::animation(format!(
                    "timeline animates '{}' more than once",
                    prop.css_name()
                )));
            }
        }
        Ok(())
    }

    /// Sample the compositor channels at cycle progress `p`.
    pub fn sample(&self, p: f64, default_ease: Ease) -> BackdropResult<ChannelSample> {
        let mut out = ChannelSample::default();
        for ch in &self.channels {
            match ch {
                Channel::Transform(k) => out.transform = Some(k.sample(p, default_ease)?),
                Channel::Opacity(k) => {
                    out.opacity = Some(k.sample(p, default_ease)?.clamp(0.0, 1.0));
                }
                Channel::Raw { .. } => {}
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
