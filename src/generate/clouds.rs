use std::collections::BTreeMap;

use crate::{
    animation::{
        binding::AnimationBinding,
        keyframes::{Keyframes, Timeline},
    },
    composition::model::{
        BlendMode, Fill, GradientStop, GroupSpec, LayerSpec, RadialShape, SceneLayer,
    },
    foundation::core::{Color, Length, Placement, Transform2D, Vec2},
};

/// Vertical edge a cloud hangs from.
#[derive(Clone, Copy, Debug)]
enum VEdge {
    Top(f64),
    Bottom(f64),
}

/// Horizontal edge a cloud hangs from.
#[derive(Clone, Copy, Debug)]
enum HEdge {
    Left(f64),
    Right(f64),
}

/// Which drifting container a cloud belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drift {
    Slow,
    Organic,
    Breathe,
}

impl Drift {
    const ALL: [Self; 3] = [Self::Slow, Self::Organic, Self::Breathe];

    fn name(self) -> &'static str {
        match self {
            Self::Slow => "cloud-drift-slow",
            Self::Organic => "cloud-float-organic",
            Self::Breathe => "cloud-breathe",
        }
    }

    fn binding(self) -> AnimationBinding {
        match self {
            Self::Slow => AnimationBinding::new(self.name(), 90.0).delay(-20.0),
            Self::Organic => AnimationBinding::new(self.name(), 80.0).delay(-35.0),
            Self::Breathe => AnimationBinding::new(self.name(), 70.0).delay(-10.0),
        }
    }
}

struct Cloud {
    v: VEdge,
    h: HEdge,
    width_pct: f64,
    height_pct: f64,
    colors: &'static [Color],
    blur_px: f64,
    opacity: f64,
    drift: Drift,
}

const fn c(r: u8, g: u8, b: u8, a: f64) -> Color {
    Color::rgba(r, g, b, a)
}

const T: Color = Color::TRANSPARENT;

/// Distant to near, then one accent glow.
const CLOUDS: [Cloud; 12] = [
    Cloud {
        v: VEdge::Top(-10.0),
        h: HEdge::Left(-5.0),
        width_pct: 80.0,
        height_pct: 50.0,
        colors: &[c(255, 255, 255, 0.4), c(251, 207, 232, 0.2), T],
        blur_px: 80.0,
        opacity: 0.6,
        drift: Drift::Slow,
    },
    Cloud {
        v: VEdge::Top(5.0),
        h: HEdge::Right(-10.0),
        width_pct: 70.0,
        height_pct: 45.0,
        colors: &[c(221, 214, 254, 0.35), c(196, 181, 253, 0.15), T],
        blur_px: 70.0,
        opacity: 0.55,
        drift: Drift::Organic,
    },
    Cloud {
        v: VEdge::Top(15.0),
        h: HEdge::Left(10.0),
        width_pct: 65.0,
        height_pct: 40.0,
        colors: &[c(255, 255, 255, 0.5), c(252, 231, 243, 0.25), T],
        blur_px: 60.0,
        opacity: 0.65,
        drift: Drift::Breathe,
    },
    Cloud {
        v: VEdge::Top(20.0),
        h: HEdge::Right(5.0),
        width_pct: 55.0,
        height_pct: 35.0,
        colors: &[c(251, 207, 232, 0.45), c(244, 114, 182, 0.2), T],
        blur_px: 55.0,
        opacity: 0.6,
        drift: Drift::Slow,
    },
    Cloud {
        v: VEdge::Top(30.0),
        h: HEdge::Left(-5.0),
        width_pct: 60.0,
        height_pct: 45.0,
        colors: &[c(255, 255, 255, 0.6), c(255, 255, 255, 0.3), T],
        blur_px: 45.0,
        opacity: 0.75,
        drift: Drift::Organic,
    },
    Cloud {
        v: VEdge::Top(35.0),
        h: HEdge::Right(-10.0),
        width_pct: 70.0,
        height_pct: 50.0,
        colors: &[c(252, 231, 243, 0.55), c(251, 207, 232, 0.25), T],
        blur_px: 50.0,
        opacity: 0.7,
        drift: Drift::Breathe,
    },
    Cloud {
        v: VEdge::Top(25.0),
        h: HEdge::Left(30.0),
        width_pct: 50.0,
        height_pct: 35.0,
        colors: &[c(221, 214, 254, 0.5), c(196, 181, 253, 0.2), T],
        blur_px: 40.0,
        opacity: 0.65,
        drift: Drift::Slow,
    },
    Cloud {
        v: VEdge::Bottom(10.0),
        h: HEdge::Left(-15.0),
        width_pct: 80.0,
        height_pct: 55.0,
        colors: &[
            c(255, 255, 255, 0.7),
            c(252, 231, 243, 0.4),
            c(251, 207, 232, 0.15),
            T,
        ],
        blur_px: 35.0,
        opacity: 0.85,
        drift: Drift::Organic,
    },
    Cloud {
        v: VEdge::Bottom(15.0),
        h: HEdge::Right(-10.0),
        width_pct: 75.0,
        height_pct: 50.0,
        colors: &[c(251, 207, 232, 0.65), c(244, 114, 182, 0.3), T],
        blur_px: 40.0,
        opacity: 0.8,
        drift: Drift::Breathe,
    },
    Cloud {
        v: VEdge::Bottom(5.0),
        h: HEdge::Left(20.0),
        width_pct: 60.0,
        height_pct: 40.0,
        colors: &[c(255, 255, 255, 0.55), c(255, 255, 255, 0.2), T],
        blur_px: 30.0,
        opacity: 0.75,
        drift: Drift::Slow,
    },
    Cloud {
        v: VEdge::Bottom(0.0),
        h: HEdge::Right(15.0),
        width_pct: 50.0,
        height_pct: 35.0,
        colors: &[c(252, 231, 243, 0.5), c(251, 207, 232, 0.2), T],
        blur_px: 25.0,
        opacity: 0.7,
        drift: Drift::Organic,
    },
    Cloud {
        v: VEdge::Top(40.0),
        h: HEdge::Left(35.0),
        width_pct: 40.0,
        height_pct: 30.0,
        colors: &[c(56, 189, 248, 0.25), c(139, 92, 246, 0.1), T],
        blur_px: 50.0,
        opacity: 0.5,
        drift: Drift::Breathe,
    },
];

/// Clouds in the field.
pub const CLOUD_COUNT: usize = CLOUDS.len();

impl Cloud {
    fn layer(&self, id: String) -> LayerSpec {
        let mut placement = Placement::at(
            Length::ZERO,
            Length::ZERO,
            Length::Percent(self.width_pct),
            Length::Percent(self.height_pct),
        );
        placement = match self.v {
            VEdge::Top(v) => Placement {
                top: Some(Length::Percent(v)),
                ..placement
            },
            VEdge::Bottom(v) => placement.from_bottom(Length::Percent(v)),
        };
        placement = match self.h {
            HEdge::Left(v) => Placement {
                left: Some(Length::Percent(v)),
                ..placement
            },
            HEdge::Right(v) => placement.from_right(Length::Percent(v)),
        };

        // Evenly spread stops, as a `[a, b, c]` gradient list.
        let n = self.colors.len().max(2) - 1;
        let stops = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| GradientStop::new(*c, i as f64 / n as f64 * 100.0))
            .collect();

        LayerSpec::new(
            id,
            0,
            placement,
            Fill::Radial {
                shape: RadialShape::Ellipse,
                center: Vec2::new(50.0, 50.0),
                stops,
            },
        )
        .blur(self.blur_px)
        .opacity(self.opacity)
    }
}

/// The cloud field: twelve soft radial clouds under three drifting containers, plus a
/// static soft-light glow.
///
/// Containers sit at `z_base`, `z_base + 1` and `z_base + 2`; the glow at `z_base + 4`.
/// Each cloud keeps its declared blur; compilation bakes it into the gradient because the
/// clouds move with their container.
pub fn cloud_field(z_base: i32) -> Vec<SceneLayer> {
    let mut out: Vec<SceneLayer> = Drift::ALL
        .iter()
        .zip(0..)
        .map(|(drift, dz)| {
            let mut g = GroupSpec::new(drift.name(), z_base + dz).animate(drift.binding());
            for (i, cloud) in CLOUDS.iter().enumerate() {
                if cloud.drift == *drift {
                    g = g.child(cloud.layer(format!("cloud-{i}")));
                }
            }
            SceneLayer::Group(g)
        })
        .collect();

    out.push(SceneLayer::Layer(
        LayerSpec::new(
            "cloud-glow",
            z_base + 4,
            Placement::fill(),
            Fill::Radial {
                shape: RadialShape::Sized {
                    rx_pct: 120.0,
                    ry_pct: 80.0,
                },
                center: Vec2::new(50.0, 60.0),
                stops: vec![
                    GradientStop::new(c(255, 255, 255, 0.2), 0.0),
                    GradientStop::new(c(251, 207, 232, 0.15), 30.0),
                    GradientStop::new(T, 60.0),
                ],
            },
        )
        .blend(BlendMode::SoftLight),
    ));

    tracing::debug!(clouds = CLOUD_COUNT, containers = Drift::ALL.len(), "built cloud field");
    out
}

/// Timelines driving the cloud containers.
pub fn cloud_timelines() -> BTreeMap<String, Timeline> {
    let mut out = BTreeMap::new();
    out.insert(
        Drift::Slow.name().to_string(),
        Timeline::transform(Keyframes::evenly([
            Transform2D::translate(0.0, 0.0),
            Transform2D::translate(40.0, -6.0),
            Transform2D::translate(0.0, 0.0),
        ])),
    );
    out.insert(
        Drift::Organic.name().to_string(),
        Timeline::transform(Keyframes::evenly([
            Transform2D::translate_scale(0.0, 0.0, 1.0),
            Transform2D::translate_scale(-25.0, 12.0, 1.03),
            Transform2D::translate_scale(15.0, -8.0, 0.98),
            Transform2D::translate_scale(0.0, 0.0, 1.0),
        ])),
    );
    out.insert(
        Drift::Breathe.name().to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                Transform2D::scale(1.0),
                Transform2D::scale(1.05),
                Transform2D::scale(1.0),
            ]),
            Keyframes::evenly([0.85, 1.0, 0.85]),
        ),
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/generate/clouds.rs"]
mod tests;
