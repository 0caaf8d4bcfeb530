use std::collections::BTreeMap;

use crate::{
    animation::{
        binding::AnimationBinding,
        keyframes::{Keyframes, Timeline},
    },
    composition::model::{Fill, GradientStop, GroupSpec, LayerSpec, RadialShape, SceneLayer},
    foundation::core::{Color, Length, Placement, Transform2D, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    Float,
    Pulse,
}

impl Motion {
    fn name(self) -> &'static str {
        match self {
            Self::Float => "bokeh-float",
            Self::Pulse => "bokeh-pulse",
        }
    }
}

struct Bokeh {
    left_pct: f64,
    top_pct: f64,
    size_px: f64,
    color: Color,
    opacity: f64,
    blur_px: f64,
    motion: Motion,
}

const fn b(
    left_pct: f64,
    top_pct: f64,
    size_px: f64,
    color: Color,
    opacity: f64,
    blur_px: f64,
    motion: Motion,
) -> Bokeh {
    Bokeh {
        left_pct,
        top_pct,
        size_px,
        color,
        opacity,
        blur_px,
        motion,
    }
}

const BOKEH: [Bokeh; 12] = [
    b(15.0, 20.0, 180.0, Color::rgba(255, 255, 255, 0.18), 0.8, 60.0, Motion::Float),
    b(78.0, 35.0, 200.0, Color::rgba(251, 207, 232, 0.22), 0.75, 70.0, Motion::Pulse),
    b(45.0, 65.0, 160.0, Color::rgba(221, 214, 254, 0.2), 0.7, 55.0, Motion::Float),
    b(8.0, 55.0, 120.0, Color::rgba(196, 181, 253, 0.18), 0.65, 45.0, Motion::Pulse),
    b(88.0, 15.0, 140.0, Color::rgba(255, 255, 255, 0.16), 0.7, 50.0, Motion::Float),
    b(55.0, 25.0, 130.0, Color::rgba(252, 231, 243, 0.18), 0.68, 48.0, Motion::Pulse),
    b(25.0, 75.0, 150.0, Color::rgba(167, 139, 250, 0.15), 0.62, 52.0, Motion::Float),
    b(70.0, 80.0, 110.0, Color::rgba(255, 255, 255, 0.2), 0.72, 42.0, Motion::Pulse),
    b(35.0, 40.0, 80.0, Color::rgba(56, 189, 248, 0.15), 0.55, 35.0, Motion::Float),
    b(5.0, 30.0, 100.0, Color::rgba(221, 214, 254, 0.16), 0.6, 40.0, Motion::Float),
    b(62.0, 50.0, 85.0, Color::rgba(255, 255, 255, 0.17), 0.56, 36.0, Motion::Pulse),
    b(50.0, 92.0, 105.0, Color::rgba(255, 255, 255, 0.18), 0.62, 42.0, Motion::Pulse),
];

/// Lights in the bokeh field.
pub const BOKEH_COUNT: usize = BOKEH.len();

impl Bokeh {
    fn layer(&self, id: String) -> LayerSpec {
        let c = self.color;
        LayerSpec::new(
            id,
            0,
            Placement::centered(
                self.left_pct,
                self.top_pct,
                Length::Px(self.size_px),
                Length::Px(self.size_px),
            ),
            Fill::Radial {
                shape: RadialShape::Circle,
                center: Vec2::new(50.0, 50.0),
                stops: vec![
                    GradientStop::new(c, 0.0),
                    GradientStop::new(c.with_alpha(0.12), 25.0),
                    GradientStop::new(c.with_alpha(0.05), 50.0),
                    GradientStop::new(c.with_alpha(0.02), 70.0),
                    GradientStop::new(Color::TRANSPARENT, 85.0),
                ],
            },
        )
        .blur(self.blur_px)
        .opacity(self.opacity)
    }
}

/// Out-of-focus lights: two animated containers, one floating and one pulsing, sharing `z`.
///
/// The lights are static children; their blur is baked in at compile time.
pub fn bokeh_field(z: i32) -> Vec<SceneLayer> {
    [
        (Motion::Float, AnimationBinding::new(Motion::Float.name(), 26.0)),
        (
            Motion::Pulse,
            AnimationBinding::new(Motion::Pulse.name(), 20.0).delay(-7.0),
        ),
    ]
    .into_iter()
    .map(|(motion, binding)| {
        let mut g = GroupSpec::new(motion.name(), z).animate(binding);
        for (i, light) in BOKEH.iter().enumerate() {
            if light.motion == motion {
                g = g.child(light.layer(format!("bokeh-{}", i + 1)));
            }
        }
        SceneLayer::Group(g)
    })
    .collect()
}

pub fn bokeh_timelines() -> BTreeMap<String, Timeline> {
    let mut out = BTreeMap::new();
    out.insert(
        Motion::Float.name().to_string(),
        Timeline::transform(Keyframes::evenly([
            Transform2D::translate(0.0, 0.0),
            Transform2D::translate(15.0, -20.0),
            Transform2D::translate(-10.0, 10.0),
            Transform2D::translate(0.0, 0.0),
        ])),
    );
    out.insert(
        Motion::Pulse.name().to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                Transform2D::scale(1.0),
                Transform2D::scale(1.08),
                Transform2D::scale(1.0),
            ]),
            Keyframes::evenly([0.8, 1.0, 0.8]),
        ),
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/generate/bokeh.rs"]
mod tests;
