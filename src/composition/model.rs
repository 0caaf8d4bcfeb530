use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    animation::{binding::AnimationBinding, keyframes::Timeline},
    foundation::core::{Color, Placement, Transform2D, Vec2},
    foundation::error::{BackdropError, BackdropResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete decorative background.
///
/// A scene is pure data. It can be built with [`crate::SceneBuilder`], taken from a preset
/// such as [`crate::dreamscape`], or read from JSON. Compiling it with
/// [`crate::compile_scene`] applies the compositor-safety policy.
pub struct Scene {
    /// Seed the scene's generated fields were built from.
    #[serde(default)]
    pub seed: u64,
    /// Timelines keyed by the name bindings refer to.
    #[serde(default)]
    pub keyframes: BTreeMap<String, Timeline>,
    /// Layers in authoring order. Paint order comes from `z`, ties keep this order.
    pub layers: Vec<SceneLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One entry of the scene stack.
pub enum SceneLayer {
    /// A single styled box.
    Layer(LayerSpec),
    /// An animated container of static children.
    Group(GroupSpec),
    /// Many small independently animated shapes.
    Particles(ParticleField),
    /// The pointer-following light.
    Lantern(LanternSpec),
}

impl SceneLayer {
    pub fn id(&self) -> &str {
        match self {
            Self::Layer(l) => &l.id,
            Self::Group(g) => &g.id,
            Self::Particles(p) => &p.id,
            Self::Lantern(l) => &l.id,
        }
    }

    pub fn z(&self) -> i32 {
        match self {
            Self::Layer(l) => l.z,
            Self::Group(g) => g.z,
            Self::Particles(p) => p.z,
            Self::Lantern(l) => l.z,
        }
    }
}

/// A color stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub color: Color,
    /// Position along the gradient in percent, `[0, 100]`.
    pub at_pct: f64,
}

impl GradientStop {
    pub const fn new(color: Color, at_pct: f64) -> Self {
        Self { color, at_pct }
    }

    pub(crate) fn to_css(self) -> String {
        format!(
            "{} {}%",
            self.color.to_css(),
            crate::foundation::core::css_num(self.at_pct)
        )
    }
}

/// Extent of a radial gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RadialShape {
    Circle,
    /// Ellipse fitted to the box.
    #[default]
    Ellipse,
    /// Ellipse with explicit radii in percent of the box.
    Sized { rx_pct: f64, ry_pct: f64 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// What paints a layer's box.
pub enum Fill {
    /// Nothing; useful for containers.
    None,
    Solid(Color),
    /// `linear-gradient(angle, stops)`.
    Linear {
        angle_deg: f64,
        stops: Vec<GradientStop>,
    },
    /// `radial-gradient(shape at cx cy, stops)`.
    Radial {
        #[serde(default)]
        shape: RadialShape,
        /// Center in percent of the box.
        #[serde(default = "center_pct")]
        center: Vec2,
        stops: Vec<GradientStop>,
    },
    /// `conic-gradient(from angle at cx cy, stops)`.
    Conic {
        from_deg: f64,
        #[serde(default = "center_pct")]
        center: Vec2,
        stops: Vec<GradientStop>,
    },
    /// A host-provided image, by relative URL.
    Image { source: String },
    /// Fractal noise grain painted from an SVG turbulence filter.
    Noise { base_frequency: f64, octaves: u32 },
}

fn center_pct() -> Vec2 {
    Vec2::new(50.0, 50.0)
}

impl Fill {
    /// Gradient stops, when the fill is a gradient.
    pub fn stops(&self) -> Option<&[GradientStop]> {
        match self {
            Self::Linear { stops, .. } | Self::Radial { stops, .. } | Self::Conic { stops, .. } => {
                Some(stops)
            }
            _ => None,
        }
    }

    pub(crate) fn stops_mut(&mut self) -> Option<&mut Vec<GradientStop>> {
        match self {
            Self::Linear { stops, .. } | Self::Radial { stops, .. } | Self::Conic { stops, .. } => {
                Some(stops)
            }
            _ => None,
        }
    }

    fn validate(&self, what: &str) -> BackdropResult<()> {
        if let Some(stops) = self.stops() {
            if stops.len() < 2 {
                return Err(BackdropError::validation(format!(
                    "{what} gradient needs at least two stops"
                )));
            }
            for s in stops {
                s.color.validate(what)?;
                if !s.at_pct.is_finite() || !(0.0..=100.0).contains(&s.at_pct) {
                    return Err(BackdropError::validation(format!(
                        "{what} gradient stop positions must be within [0, 100]"
                    )));
                }
            }
            if !stops.windows(2).all(|w| w[0].at_pct <= w[1].at_pct) {
                return Err(BackdropError::validation(format!(
                    "{what} gradient stops must be sorted"
                )));
            }
        }
        match self {
            Self::Solid(c) => c.validate(what),
            Self::Radial {
                shape: RadialShape::Sized { rx_pct, ry_pct },
                ..
            } if !(*rx_pct > 0.0 && *ry_pct > 0.0 && rx_pct.is_finite() && ry_pct.is_finite()) => {
                Err(BackdropError::validation(format!(
                    "{what} radial size must be finite and > 0"
                )))
            }
            Self::Image { source } if source.trim().is_empty() => Err(BackdropError::validation(
                format!("{what} image source must be non-empty"),
            )),
            Self::Noise {
                base_frequency,
                octaves,
            } if !(base_frequency.is_finite() && *base_frequency > 0.0) || *octaves == 0 => {
                Err(BackdropError::validation(format!(
                    "{what} noise needs base_frequency > 0 and octaves > 0"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// CSS `mix-blend-mode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    #[default]
    Normal,
    Screen,
    Overlay,
    SoftLight,
    Multiply,
}

impl BlendMode {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::Multiply => "multiply",
        }
    }
}

/// Static `box-shadow`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    #[serde(default)]
    pub offset: Vec2,
    pub blur_px: f64,
    #[serde(default)]
    pub spread_px: f64,
    pub color: Color,
}

impl Shadow {
    /// Centered glow.
    pub fn glow(blur_px: f64, spread_px: f64, color: Color) -> Self {
        Self {
            offset: Vec2::ZERO,
            blur_px,
            spread_px,
            color,
        }
    }

    fn validate(&self, what: &str) -> BackdropResult<()> {
        if !self.offset.x.is_finite() || !self.offset.y.is_finite() {
            return Err(BackdropError::validation(format!(
                "{what} shadow offset must be finite"
            )));
        }
        if !self.blur_px.is_finite() || self.blur_px < 0.0 || !self.spread_px.is_finite() {
            return Err(BackdropError::validation(format!(
                "{what} shadow blur must be finite and >= 0"
            )));
        }
        self.color.validate(what)
    }
}

fn one() -> f64 {
    1.0
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single decorative box.
///
/// Everything except `animation` is static style. Animation may only touch `transform`
/// and `opacity`; the compile step enforces this.
pub struct LayerSpec {
    pub id: String,
    pub z: i32,
    pub placement: Placement,
    pub fill: Fill,
    /// Static gaussian blur in pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub blur_px: f64,
    /// Resting opacity.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Resting transform.
    #[serde(default)]
    pub transform: Transform2D,
    #[serde(default)]
    pub blend: BlendMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationBinding>,
}

impl LayerSpec {
    /// A static, unblurred, fully opaque layer.
    pub fn new(id: impl Into<String>, z: i32, placement: Placement, fill: Fill) -> Self {
        Self {
            id: id.into(),
            z,
            placement,
            fill,
            blur_px: 0.0,
            opacity: 1.0,
            transform: Transform2D::default(),
            blend: BlendMode::Normal,
            shadow: None,
            animation: None,
        }
    }

    pub fn blur(mut self, px: f64) -> Self {
        self.blur_px = px;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    pub fn blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn animate(mut self, binding: AnimationBinding) -> Self {
        self.animation = Some(binding);
        self
    }

    pub fn validate(&self) -> BackdropResult<()> {
        validate_id(&self.id, "layer")?;
        let what = format!("layer '{}'", self.id);
        self.placement.validate(&what)?;
        self.fill.validate(&what)?;
        if !self.blur_px.is_finite() || self.blur_px < 0.0 {
            return Err(BackdropError::validation(format!(
                "{what} blur_px must be finite and >= 0"
            )));
        }
        validate_opacity(self.opacity, &what)?;
        validate_transform(&self.transform, &what)?;
        if let Some(s) = &self.shadow {
            s.validate(&what)?;
        }
        if let Some(a) = &self.animation {
            a.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An animated container whose children share its single compositor layer.
pub struct GroupSpec {
    pub id: String,
    pub z: i32,
    #[serde(default = "Placement::fill")]
    pub placement: Placement,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationBinding>,
    /// Static children, painted in order inside the container.
    pub children: Vec<LayerSpec>,
}

impl GroupSpec {
    pub fn new(id: impl Into<String>, z: i32) -> Self {
        Self {
            id: id.into(),
            z,
            placement: Placement::fill(),
            opacity: 1.0,
            animation: None,
            children: Vec::new(),
        }
    }

    pub fn animate(mut self, binding: AnimationBinding) -> Self {
        self.animation = Some(binding);
        self
    }

    pub fn child(mut self, layer: LayerSpec) -> Self {
        self.children.push(layer);
        self
    }

    pub fn validate(&self) -> BackdropResult<()> {
        validate_id(&self.id, "group")?;
        let what = format!("group '{}'", self.id);
        self.placement.validate(&what)?;
        validate_opacity(self.opacity, &what)?;
        if self.children.is_empty() {
            return Err(BackdropError::validation(format!(
                "{what} must have at least one child"
            )));
        }
        if let Some(a) = &self.animation {
            a.validate()?;
        }
        for c in &self.children {
            c.validate()?;
        }
        Ok(())
    }
}

/// Outline of a generated particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Star,
    Sparkle,
    Diamond,
    Heart,
    Circle,
    Starburst,
}

impl ShapeKind {
    pub const ALL: [Self; 6] = [
        Self::Star,
        Self::Sparkle,
        Self::Diamond,
        Self::Heart,
        Self::Circle,
        Self::Starburst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Sparkle => "sparkle",
            Self::Diamond => "diamond",
            Self::Heart => "heart",
            Self::Circle => "circle",
            Self::Starburst => "starburst",
        }
    }

    /// CSS `clip-path` outline; `None` for shapes drawn with `border-radius`.
    pub fn clip_path(self) -> Option<&'static str> {
        match self {
            Self::Star => Some(
                "polygon(50% 0%, 61% 35%, 98% 35%, 68% 57%, 79% 91%, 50% 70%, 21% 91%, 32% 57%, 2% 35%, 39% 35%)",
            ),
            Self::Sparkle | Self::Diamond => Some("polygon(50% 0%, 100% 50%, 50% 100%, 0% 50%)"),
            Self::Heart => Some(
                "polygon(50% 100%, 8% 58%, 0% 35%, 6% 14%, 24% 4%, 40% 8%, 50% 20%, 60% 8%, 76% 4%, 94% 14%, 100% 35%, 92% 58%)",
            ),
            Self::Starburst => Some(
                "polygon(50% 0%, 55% 35%, 85% 15%, 65% 45%, 100% 50%, 65% 55%, 85% 85%, 55% 65%, 50% 100%, 45% 65%, 15% 85%, 35% 55%, 0% 50%, 35% 45%, 15% 15%, 45% 35%)",
            ),
            Self::Circle => None,
        }
    }

    /// Width over height of the shape's box.
    pub fn aspect(self) -> f64 {
        match self {
            Self::Diamond => 0.7,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A generated decorative point. Immutable once generated.
pub struct ParticleSpec {
    pub id: String,
    /// Horizontal position in percent of the field.
    pub left_pct: f64,
    /// Vertical position in percent of the field.
    pub top_pct: f64,
    pub size_px: f64,
    pub color: Color,
    pub shape: ShapeKind,
    /// Timeline name.
    pub animation: String,
    pub duration_s: f64,
    /// Phase offset; negative values start mid-cycle.
    pub delay_s: f64,
    /// Resting opacity in `(0, 1]`.
    pub opacity: f64,
}

impl ParticleSpec {
    /// The particle's animation as a binding.
    pub fn binding(&self) -> AnimationBinding {
        AnimationBinding::new(self.animation.clone(), self.duration_s).delay(self.delay_s)
    }

    pub fn validate(&self) -> BackdropResult<()> {
        validate_id(&self.id, "particle")?;
        let what = format!("particle '{}'", self.id);
        for (name, v) in [("left_pct", self.left_pct), ("top_pct", self.top_pct)] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(BackdropError::validation(format!(
                    "{what} {name} must be within [0, 100]"
                )));
            }
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(BackdropError::validation(format!(
                "{what} size_px must be finite and > 0"
            )));
        }
        if !self.opacity.is_finite() || self.opacity <= 0.0 || self.opacity > 1.0 {
            return Err(BackdropError::validation(format!(
                "{what} opacity must be within (0, 1]"
            )));
        }
        self.color.validate(&what)?;
        self.binding().validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A container of generated particles.
pub struct ParticleField {
    pub id: String,
    pub z: i32,
    #[serde(default)]
    pub blend: BlendMode,
    pub particles: Vec<ParticleSpec>,
}

impl ParticleField {
    pub fn validate(&self) -> BackdropResult<()> {
        validate_id(&self.id, "particle field")?;
        for p in &self.particles {
            p.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The pointer-following light.
///
/// Its position is not keyframed. The runtime moves the primary and ambient containers with
/// transforms every frame, and the compiled stack carries `resting` as the static fallback.
pub struct LanternSpec {
    pub id: String,
    pub z: i32,
    /// Diameter of the fast follower in pixels.
    pub primary_size_px: f64,
    /// Diameter of the slow follower in pixels.
    pub ambient_size_px: f64,
    /// Children of the fast follower, placed inside its box.
    pub primary: Vec<LayerSpec>,
    /// Children of the slow follower.
    pub ambient: Vec<LayerSpec>,
    /// Static centered glow used when motion is reduced.
    pub resting: LayerSpec,
}

impl LanternSpec {
    pub fn validate(&self) -> BackdropResult<()> {
        validate_id(&self.id, "lantern")?;
        for (name, v) in [
            ("primary_size_px", self.primary_size_px),
            ("ambient_size_px", self.ambient_size_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BackdropError::validation(format!(
                    "lantern '{}' {name} must be finite and > 0",
                    self.id
                )));
            }
        }
        for l in self.primary.iter().chain(&self.ambient) {
            l.validate()?;
            if l.animation.is_some() {
                return Err(BackdropError::validation(format!(
                    "lantern '{}' child '{}' must not carry its own animation",
                    self.id, l.id
                )));
            }
        }
        self.resting.validate()
    }
}

impl Scene {
    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(s: &str) -> BackdropResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read, parse and validate a scene file.
    pub fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> BackdropResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn timeline(&self, name: &str) -> Option<&Timeline> {
        self.keyframes.get(name)
    }

    /// Structural validation: ids, geometry, values and timeline references.
    ///
    /// Compositor-safety rules are checked separately by [`crate::AnimationPolicy`].
    pub fn validate(&self) -> BackdropResult<()> {
        for (name, tl) in &self.keyframes {
            validate_timeline_name(name)?;
            tl.validate()?;
        }

        let mut ids = std::collections::BTreeSet::new();
        let mut claim = |id: &str| -> BackdropResult<()> {
            if !ids.insert(id.to_string()) {
                return Err(BackdropError::validation(format!("duplicate id '{id}'")));
            }
            Ok(())
        };

        for layer in &self.layers {
            claim(layer.id())?;
            match layer {
                SceneLayer::Layer(l) => l.validate()?,
                SceneLayer::Group(g) => {
                    g.validate()?;
                    for c in &g.children {
                        claim(&c.id)?;
                    }
                }
                SceneLayer::Particles(f) => {
                    f.validate()?;
                    for p in &f.particles {
                        claim(&p.id)?;
                    }
                }
                SceneLayer::Lantern(l) => {
                    l.validate()?;
                    for c in l.primary.iter().chain(&l.ambient) {
                        claim(&c.id)?;
                    }
                    claim(&l.resting.id)?;
                }
            }
        }

        for (owner, binding) in self.bindings() {
            if !self.keyframes.contains_key(&binding.name) {
                return Err(BackdropError::validation(format!(
                    "'{owner}' refers to unknown timeline '{}'",
                    binding.name
                )));
            }
        }
        Ok(())
    }

    /// Every animation binding in the scene with the id of its owner.
    pub fn bindings(&self) -> Vec<(String, AnimationBinding)> {
        let mut out = Vec::new();
        for layer in &self.layers {
            match layer {
                SceneLayer::Layer(l) => {
                    out.extend(l.animation.iter().map(|a| (l.id.clone(), a.clone())));
                }
                SceneLayer::Group(g) => {
                    out.extend(g.animation.iter().map(|a| (g.id.clone(), a.clone())));
                    for c in &g.children {
                        out.extend(c.animation.iter().map(|a| (c.id.clone(), a.clone())));
                    }
                }
                SceneLayer::Particles(f) => {
                    out.extend(f.particles.iter().map(|p| (p.id.clone(), p.binding())));
                }
                SceneLayer::Lantern(l) => {
                    out.extend(
                        l.resting
                            .animation
                            .iter()
                            .map(|a| (l.resting.id.clone(), a.clone())),
                    );
                }
            }
        }
        out
    }
}

fn validate_id(id: &str, kind: &str) -> BackdropResult<()> {
    if id.trim().is_empty() {
        return Err(BackdropError::validation(format!(
            "{kind} id must be non-empty"
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(BackdropError::validation(format!(
            "{kind} id '{id}' may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Words CSS reserves in the `animation` shorthand or as global values.
const RESERVED_TIMELINE_NAMES: [&str; 24] = [
    "none",
    "initial",
    "inherit",
    "unset",
    "revert",
    "revert-layer",
    "default",
    "infinite",
    "normal",
    "reverse",
    "alternate",
    "alternate-reverse",
    "forwards",
    "backwards",
    "both",
    "running",
    "paused",
    "linear",
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
];

/// Timeline names land verbatim in `@keyframes` and `animation`, so they must be a CSS
/// custom identifier.
fn validate_timeline_name(name: &str) -> BackdropResult<()> {
    validate_id(name, "timeline")?;
    let rest = name.strip_prefix('-').unwrap_or(name);
    if rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return Err(BackdropError::validation(format!(
            "timeline name '{name}' is not a CSS identifier"
        )));
    }
    if RESERVED_TIMELINE_NAMES
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(name))
    {
        return Err(BackdropError::validation(format!(
            "timeline name '{name}' is a reserved CSS keyword"
        )));
    }
    Ok(())
}

fn validate_opacity(v: f64, what: &str) -> BackdropResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(BackdropError::validation(format!(
            "{what} opacity must be within [0, 1]"
        )));
    }
    Ok(())
}

fn validate_transform(t: &Transform2D, what: &str) -> BackdropResult<()> {
    let vals = [
        t.translate.x,
        t.translate.y,
        t.rotate_deg,
        t.scale.x,
        t.scale.y,
    ];
    if !vals.iter().all(|v| v.is_finite()) {
        return Err(BackdropError::validation(format!(
            "{what} transform must be finite"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
