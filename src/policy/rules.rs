use std::fmt;

use crate::{
    composition::model::{Fill, LayerSpec, Scene, SceneLayer},
    foundation::error::{BackdropError, BackdropResult},
};

/// What to do with a static blur on a moving layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlurMode {
    /// Enlarge the shape and soften its gradient instead of blurring.
    #[default]
    Compensate,
    /// Report a violation.
    Reject,
    /// Keep the blur as declared.
    Allow,
}

impl std::str::FromStr for BlurMode {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compensate" => Ok(Self::Compensate),
            "reject" => Ok(Self::Reject),
            "allow" => Ok(Self::Allow),
            other => Err(BackdropError::validation(format!(
                "unknown blur mode '{other}' (expected compensate, reject or allow)"
            ))),
        }
    }
}

/// Compositor-safety limits applied when a scene is compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationPolicy {
    /// Independently animated layers allowed; a group counts once.
    pub max_animated_layers: usize,
    /// Particles allowed in one field.
    pub max_field_particles: usize,
    pub blur: BlurMode,
}

impl Default for AnimationPolicy {
    fn default() -> Self {
        Self {
            max_animated_layers: 32,
            max_field_particles: 64,
            blur: BlurMode::Compensate,
        }
    }
}

/// One broken rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Violation {
    /// A timeline animates something other than `transform` or `opacity`.
    UnsafeProperty {
        owner: String,
        timeline: String,
        property: String,
    },
    /// A binding names a timeline the scene does not define.
    UnknownTimeline { owner: String, timeline: String },
    /// Too many independently animated layers.
    LayerBudget { animated: usize, max: usize },
    /// A particle field holds too many particles.
    FieldBudget {
        field: String,
        particles: usize,
        max: usize,
    },
    /// A child of an animated group carries its own animation.
    NestedAnimation { group: String, child: String },
    /// A moving layer is blurred and blur compensation is off.
    MovingBlur { layer: String, blur_px: f64 },
    /// A moving layer is blurred but its fill cannot be softened.
    UncompensableBlur { layer: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafeProperty {
                owner,
                timeline,
                property,
            } => write!(
                f,
                "'{owner}' animates '{property}' through timeline '{timeline}'; only transform and opacity may be animated"
            ),
            Self::UnknownTimeline { owner, timeline } => {
                write!(f, "'{owner}' refers to unknown timeline '{timeline}'")
            }
            Self::LayerBudget { animated, max } => write!(
                f,
                "{animated} independently animated layers exceed the budget of {max}; group shapes under animated containers"
            ),
            Self::FieldBudget {
                field,
                particles,
                max,
            } => write!(
                f,
                "particle field '{field}' holds {particles} particles, more than {max}"
            ),
            Self::NestedAnimation { group, child } => write!(
                f,
                "child '{child}' of animated group '{group}' must be static"
            ),
            Self::MovingBlur { layer, blur_px } => write!(
                f,
                "moving layer '{layer}' has blur {blur_px}px; bake it into the gradient instead"
            ),
            Self::UncompensableBlur { layer } => write!(
                f,
                "moving layer '{layer}' has a blur that cannot be baked into its fill"
            ),
        }
    }
}

/// Outcome of checking a scene against an [`AnimationPolicy`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PolicyReport {
    /// Independently animated layers counted against the budget.
    pub animated_layers: usize,
    /// Moving layers whose blur will be compensated at compile time.
    pub compensated: Vec<String>,
    pub violations: Vec<Violation>,
}

impl PolicyReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok` when clean, otherwise a [`BackdropError::Policy`] listing every violation.
    pub fn into_result(self) -> BackdropResult<Self> {
        if self.is_clean() {
            return Ok(self);
        }
        let msg = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(BackdropError::policy(msg))
    }
}

impl AnimationPolicy {
    /// Check every rule and collect all violations.
    #[tracing::instrument(skip(self, scene), fields(layers = scene.layers.len()))]
    pub fn check(&self, scene: &Scene) -> PolicyReport {
        let mut report = PolicyReport::default();

        for (owner, binding) in scene.bindings() {
            let Some(tl) = scene.timeline(&binding.name) else {
                report.violations.push(Violation::UnknownTimeline {
                    owner,
                    timeline: binding.name,
                });
                continue;
            };
            for prop in tl.properties() {
                if !prop.is_compositor_safe() {
                    report.violations.push(Violation::UnsafeProperty {
                        owner: owner.clone(),
                        timeline: binding.name.clone(),
                        property: prop.css_name().to_string(),
                    });
                }
            }
        }

        for layer in &scene.layers {
            match layer {
                SceneLayer::Layer(l) => {
                    if l.animation.is_some() {
                        report.animated_layers += 1;
                        self.check_moving_blur(l, &mut report);
                    }
                }
                SceneLayer::Group(g) => {
                    let animated = g.animation.is_some();
                    if animated {
                        report.animated_layers += 1;
                    }
                    for c in &g.children {
                        if animated && c.animation.is_some() {
                            report.violations.push(Violation::NestedAnimation {
                                group: g.id.clone(),
                                child: c.id.clone(),
                            });
                        }
                        if c.animation.is_some() {
                            report.animated_layers += 1;
                        }
                        if animated || c.animation.is_some() {
                            self.check_moving_blur(c, &mut report);
                        }
                    }
                }
                SceneLayer::Particles(f) => {
                    if f.particles.len() > self.max_field_particles {
                        report.violations.push(Violation::FieldBudget {
                            field: f.id.clone(),
                            particles: f.particles.len(),
                            max: self.max_field_particles,
                        });
                    }
                }
                SceneLayer::Lantern(l) => {
                    // Primary and ambient followers.
                    report.animated_layers += 2;
                    for c in l.primary.iter().chain(&l.ambient) {
                        self.check_moving_blur(c, &mut report);
                    }
                }
            }
        }

        if report.animated_layers > self.max_animated_layers {
            report.violations.push(Violation::LayerBudget {
                animated: report.animated_layers,
                max: self.max_animated_layers,
            });
        }

        tracing::debug!(
            animated = report.animated_layers,
            violations = report.violations.len(),
            "policy check"
        );
        report
    }

    fn check_moving_blur(&self, layer: &LayerSpec, report: &mut PolicyReport) {
        if layer.blur_px <= 0.0 {
            return;
        }
        match self.blur {
            BlurMode::Allow => {}
            BlurMode::Reject => report.violations.push(Violation::MovingBlur {
                layer: layer.id.clone(),
                blur_px: layer.blur_px,
            }),
            BlurMode::Compensate => {
                if matches!(layer.fill, Fill::Image { .. } | Fill::Noise { .. }) {
                    report.violations.push(Violation::UncompensableBlur {
                        layer: layer.id.clone(),
                    });
                } else {
                    report.compensated.push(layer.id.clone());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/policy/rules.rs"]
mod tests;
