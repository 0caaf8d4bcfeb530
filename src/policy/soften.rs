//! Static replacements for effects that are expensive on moving layers.

use crate::{
    animation::{
        binding::AnimationBinding,
        keyframes::{AnimatedProperty, Lerp, Timeline},
    },
    composition::model::{Fill, GradientStop, LayerSpec, RadialShape, Shadow},
    foundation::core::{Color, Vec2},
    foundation::error::{BackdropError, BackdropResult},
};

/// Interpolated stops inserted per softened segment.
pub const SOFTEN_STEPS: usize = 3;

/// Replace `layer.blur_px` with a larger box and a softer gradient.
///
/// The box grows by the blur radius on every side. Radial stops are pulled inward so the
/// visible core keeps its size, and the outer falloff gains interpolated stops. Layers
/// without blur are returned unchanged.
pub fn compensate_blur(layer: &LayerSpec) -> BackdropResult<LayerSpec> {
    let blur = layer.blur_px;
    if blur <= 0.0 {
        return Ok(layer.clone());
    }

    let placement = layer.placement.grow_px(blur);
    let shrink = layer.placement.width.value() / placement.width.value();

    let fill = match &layer.fill {
        Fill::Radial {
            shape,
            center,
            stops,
        } => Fill::Radial {
            shape: *shape,
            center: *center,
            stops: soften_tail(stops, shrink),
        },
        Fill::Linear { angle_deg, stops } => Fill::Linear {
            angle_deg: *angle_deg,
            stops: soften_segments(stops),
        },
        Fill::Conic {
            from_deg,
            center,
            stops,
        } => Fill::Conic {
            from_deg: *from_deg,
            center: *center,
            stops: soften_segments(stops),
        },
        Fill::Solid(c) => Fill::Radial {
            shape: RadialShape::Ellipse,
            center: Vec2::new(50.0, 50.0),
            stops: soften_tail(
                &[GradientStop::new(*c, 0.0), GradientStop::new(*c, 100.0)],
                shrink,
            ),
        },
        Fill::None => Fill::None,
        Fill::Image { .. } | Fill::Noise { .. } => {
            return Err(BackdropError::policy(format!(
                "layer '{}' blur cannot be baked into an image or noise fill",
                layer.id
            )));
        }
    };

    let mut out = layer.clone();
    out.placement = placement;
    out.fill = fill;
    out.blur_px = 0.0;
    Ok(out)
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn interpolate(a: GradientStop, b: GradientStop, steps: usize, out: &mut Vec<GradientStop>) {
    // Fade in the neighbour's hue, not toward black.
    let from = if a.color.is_transparent() {
        b.color.with_alpha(0.0)
    } else {
        a.color
    };
    let to = if b.color.is_transparent() {
        a.color.with_alpha(0.0)
    } else {
        b.color
    };
    for j in 1..=steps {
        let f = j as f64 / (steps + 1) as f64;
        out.push(GradientStop {
            color: Color::lerp(&from, &to, smoothstep(f)),
            at_pct: a.at_pct + (b.at_pct - a.at_pct) * f,
        });
    }
}

/// Scale stop positions by `shrink`, fade to transparent at the rim, and smooth the fade.
fn soften_tail(stops: &[GradientStop], shrink: f64) -> Vec<GradientStop> {
    let mut scaled: Vec<GradientStop> = stops
        .iter()
        .map(|s| GradientStop::new(s.color, s.at_pct * shrink))
        .collect();
    let Some(last) = scaled.last().copied() else {
        return scaled;
    };
    if !last.color.is_transparent() {
        scaled.push(GradientStop::new(last.color.with_alpha(0.0), 100.0));
    }

    let n = scaled.len();
    if n < 2 {
        return scaled;
    }
    let mut out = Vec::with_capacity(n + SOFTEN_STEPS);
    out.extend_from_slice(&scaled[..n - 1]);
    interpolate(scaled[n - 2], scaled[n - 1], SOFTEN_STEPS, &mut out);
    out.push(scaled[n - 1]);
    out
}

/// Insert interpolated stops into every segment.
fn soften_segments(stops: &[GradientStop]) -> Vec<GradientStop> {
    let mut out = Vec::with_capacity(stops.len() * (SOFTEN_STEPS + 1));
    for w in stops.windows(2) {
        out.push(w[0]);
        interpolate(w[0], w[1], SOFTEN_STEPS, &mut out);
    }
    if let Some(last) = stops.last() {
        out.push(*last);
    }
    out
}

/// A glowing shape split into a static base and a pulsing overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowPair {
    /// The shape with its shadow baked in; never animated.
    pub base: LayerSpec,
    /// A transparent twin carrying a wider shadow; only its opacity animates.
    pub overlay: LayerSpec,
}

/// Build a pulsing glow without animating `box-shadow`.
///
/// `pulse` must point at `pulse_timeline`, and that timeline may only animate opacity.
pub fn glow_pair(
    base: LayerSpec,
    glow: Shadow,
    pulse: AnimationBinding,
    pulse_timeline: &Timeline,
) -> BackdropResult<GlowPair> {
    pulse_timeline.validate()?;
    if pulse_timeline
        .properties()
        .iter()
        .any(|p| *p != AnimatedProperty::Opacity)
    {
        return Err(BackdropError::policy(format!(
            "glow pulse '{}' for '{}' may only animate opacity",
            pulse.name, base.id
        )));
    }
    pulse.validate()?;

    let overlay = LayerSpec::new(
        format!("{}-glow", base.id),
        base.z,
        base.placement,
        Fill::None,
    )
    .shadow(Shadow {
        blur_px: glow.blur_px * 2.0,
        spread_px: glow.spread_px * 1.5,
        ..glow
    })
    .transform(base.transform)
    .blend(base.blend)
    .opacity(0.0)
    .animate(pulse);

    let mut base = base.shadow(glow);
    base.animation = None;

    Ok(GlowPair { base, overlay })
}

#[cfg(test)]
#[path = "../../tests/unit/policy/soften.rs"]
mod tests;
