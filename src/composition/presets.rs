//! Built-in scenes.

use crate::{
    animation::{
        binding::AnimationBinding,
        ease::Ease,
        keyframes::{Keyframes, Timeline},
    },
    composition::{
        dsl::SceneBuilder,
        model::{
            BlendMode, Fill, GradientStop, LanternSpec, LayerSpec, RadialShape, Scene,
        },
    },
    foundation::{
        core::{Color, Length, Placement, Transform2D, Vec2},
        error::BackdropResult,
    },
    generate::{
        bokeh::{bokeh_field, bokeh_timelines},
        clouds::{cloud_field, cloud_timelines},
        particles::{
            PARTICLE_COUNT, SPARKLE_COUNT, SeededIndex, particle_field, particle_timelines,
            sparkle_field, sparkle_timelines,
        },
    },
};

const T: Color = Color::TRANSPARENT;
const WHITE: (u8, u8, u8) = (255, 255, 255);
const PINK: (u8, u8, u8) = (251, 207, 232);
const LAVENDER: (u8, u8, u8) = (221, 214, 254);
const VIOLET: (u8, u8, u8) = (167, 139, 250);
const SKY: (u8, u8, u8) = (147, 197, 253);

fn tint((r, g, b): (u8, u8, u8), a: f64) -> Color {
    Color::rgba(r, g, b, a)
}

fn stops(list: &[(Color, f64)]) -> Vec<GradientStop> {
    list.iter().map(|&(c, at)| GradientStop::new(c, at)).collect()
}

/// Conic stops given in degrees.
fn conic_stops(list: &[(Color, f64)]) -> Vec<GradientStop> {
    list.iter()
        .map(|&(c, deg)| GradientStop::new(c, deg / 360.0 * 100.0))
        .collect()
}

fn radial(shape: RadialShape, center: Vec2, list: &[(Color, f64)]) -> Fill {
    Fill::Radial {
        shape,
        center,
        stops: stops(list),
    }
}

fn pct(v: f64) -> Length {
    Length::Percent(v)
}

fn sky() -> LayerSpec {
    LayerSpec::new(
        "sky",
        0,
        Placement::fill(),
        Fill::Linear {
            angle_deg: 165.0,
            stops: stops(&[
                (Color::hex(0x7c3aed), 0.0),
                (Color::hex(0x8b5cf6), 5.0),
                (Color::hex(0xa78bfa), 12.0),
                (Color::hex(0xc4b5fd), 22.0),
                (Color::hex(0xddd6fe), 35.0),
                (Color::hex(0xede9fe), 48.0),
                (Color::hex(0xf5f3ff), 58.0),
                (Color::hex(0xfdf4ff), 68.0),
                (Color::hex(0xfdf2f8), 78.0),
                (Color::hex(0xfce7f3), 88.0),
                (Color::hex(0xfbcfe8), 100.0),
            ]),
        },
    )
}

fn light_rays() -> (LayerSpec, Timeline) {
    let w = |a| tint(WHITE, a);
    let layer = LayerSpec::new(
        "light-rays",
        1,
        Placement::at(pct(-20.0), pct(10.0), pct(80.0), pct(100.0)),
        Fill::Conic {
            from_deg: 180.0,
            center: Vec2::new(50.0, 0.0),
            stops: conic_stops(&[
                (T, 0.0),
                (w(0.04), 15.0),
                (T, 30.0),
                (T, 60.0),
                (w(0.03), 75.0),
                (T, 90.0),
                (T, 120.0),
                (w(0.035), 135.0),
                (T, 150.0),
                (T, 180.0),
                (w(0.03), 195.0),
                (T, 210.0),
                (T, 240.0),
                (w(0.04), 255.0),
                (T, 270.0),
                (T, 300.0),
                (w(0.03), 315.0),
                (T, 330.0),
                (T, 360.0),
            ]),
        },
    )
    .blur(2.0)
    .opacity(0.5)
    .animate(AnimationBinding::new("light-rays-sway", 30.0));

    let timeline = Timeline::transform_opacity(
        Keyframes::evenly([0.0, 5.0, -3.0, 0.0].map(Transform2D::rotate)),
        Keyframes::evenly([0.5, 0.8, 0.6, 0.5]),
    );
    (layer, timeline)
}

struct Blob {
    id: &'static str,
    placement: Placement,
    fill: Fill,
    blur_px: f64,
    binding: AnimationBinding,
    timeline: Timeline,
}

fn drift(xs: [f64; 5], ys: [f64; 5], ss: [f64; 5]) -> Keyframes<Transform2D> {
    Keyframes::evenly((0..5).map(|i| Transform2D::translate_scale(xs[i], ys[i], ss[i])))
}

fn aurora() -> Vec<Blob> {
    let center = Vec2::new(50.0, 50.0);
    vec![
        Blob {
            id: "aurora-violet",
            placement: Placement::at(pct(-20.0), pct(-10.0), pct(70.0), pct(60.0)),
            fill: radial(
                RadialShape::Ellipse,
                center,
                &[
                    (Color::rgba(139, 92, 246, 0.4), 0.0),
                    (Color::rgba(139, 92, 246, 0.1), 40.0),
                    (T, 70.0),
                ],
            ),
            blur_px: 100.0,
            binding: AnimationBinding::new("aurora-violet", 25.0),
            timeline: Timeline::transform(drift(
                [0.0, 50.0, -30.0, 20.0, 0.0],
                [0.0, 30.0, -20.0, 10.0, 0.0],
                [1.0, 1.1, 0.95, 1.05, 1.0],
            )),
        },
        Blob {
            id: "aurora-rose",
            placement: Placement::at(pct(0.0), pct(0.0), pct(60.0), pct(50.0))
                .from_bottom(pct(-10.0))
                .from_right(pct(-15.0)),
            fill: radial(
                RadialShape::Ellipse,
                center,
                &[
                    (Color::rgba(236, 72, 153, 0.35), 0.0),
                    (Color::rgba(244, 114, 182, 0.15), 40.0),
                    (T, 70.0),
                ],
            ),
            blur_px: 120.0,
            binding: AnimationBinding::new("aurora-rose", 30.0).delay(5.0),
            timeline: Timeline::transform(drift(
                [0.0, -40.0, 30.0, -20.0, 0.0],
                [0.0, -30.0, 20.0, -10.0, 0.0],
                [1.0, 1.15, 0.9, 1.08, 1.0],
            )),
        },
        Blob {
            id: "aurora-cyan",
            placement: Placement::at(pct(30.0), pct(-5.0), pct(40.0), pct(40.0)),
            fill: radial(
                RadialShape::Ellipse,
                center,
                &[(Color::rgba(56, 189, 248, 0.2), 0.0), (T, 60.0)],
            ),
            blur_px: 80.0,
            binding: AnimationBinding::new("aurora-cyan", 20.0).delay(10.0),
            timeline: Timeline::transform_opacity(
                Keyframes::evenly([1.0, 1.2, 1.0].map(Transform2D::scale)),
                Keyframes::evenly([0.6, 0.9, 0.6]),
            ),
        },
        Blob {
            id: "aurora-lavender",
            placement: Placement::at(pct(40.0), pct(30.0), pct(50.0), pct(40.0)),
            fill: radial(
                RadialShape::Ellipse,
                center,
                &[
                    (Color::rgba(196, 181, 253, 0.25), 0.0),
                    (tint(LAVENDER, 0.1), 50.0),
                    (T, 70.0),
                ],
            ),
            blur_px: 100.0,
            binding: AnimationBinding::new("aurora-lavender", 18.0).delay(8.0),
            timeline: Timeline::transform(Keyframes::evenly([
                Transform2D::translate_scale(0.0, 0.0, 1.0),
                Transform2D::translate_scale(20.0, 0.0, 1.05),
                Transform2D::translate_scale(-15.0, 0.0, 0.98),
                Transform2D::translate_scale(0.0, 0.0, 1.0),
            ])),
        },
        Blob {
            id: "aurora-peach",
            placement: Placement::at(pct(0.0), pct(20.0), pct(60.0), pct(35.0))
                .from_bottom(pct(0.0)),
            fill: radial(
                RadialShape::Ellipse,
                Vec2::new(50.0, 100.0),
                &[
                    (tint(PINK, 0.4), 0.0),
                    (Color::rgba(252, 231, 243, 0.2), 40.0),
                    (T, 70.0),
                ],
            ),
            blur_px: 80.0,
            binding: AnimationBinding::new("aurora-peach", 15.0),
            timeline: Timeline::opacity(Keyframes::evenly([0.7, 1.0, 0.7])),
        },
    ]
}

fn lantern() -> LanternSpec {
    let center = Vec2::new(50.0, 50.0);
    let outer = LayerSpec::new(
        "lantern-halo",
        0,
        Placement::fill(),
        radial(
            RadialShape::Circle,
            center,
            &[
                (tint(SKY, 0.25), 0.0),
                (tint(SKY, 0.2), 10.0),
                (tint(VIOLET, 0.15), 20.0),
                (tint(VIOLET, 0.1), 30.0),
                (Color::rgba(236, 72, 153, 0.08), 40.0),
                (Color::rgba(236, 72, 153, 0.04), 50.0),
                (Color::rgba(236, 72, 153, 0.02), 60.0),
                (T, 70.0),
            ],
        ),
    )
    .blend(BlendMode::Screen);
    let core = LayerSpec::new(
        "lantern-core",
        0,
        Placement::at(pct(20.0), pct(20.0), pct(60.0), pct(60.0)),
        radial(
            RadialShape::Circle,
            center,
            &[
                (tint(WHITE, 0.2), 0.0),
                (tint(WHITE, 0.12), 20.0),
                (tint(PINK, 0.1), 40.0),
                (tint(PINK, 0.05), 55.0),
                (T, 70.0),
            ],
        ),
    )
    .blend(BlendMode::Screen);
    let ambient = LayerSpec::new(
        "lantern-ambient-wash",
        0,
        Placement::fill(),
        radial(
            RadialShape::Sized {
                rx_pct: 60.0,
                ry_pct: 50.0,
            },
            center,
            &[
                (Color::rgba(139, 92, 246, 0.12), 0.0),
                (Color::rgba(139, 92, 246, 0.08), 15.0),
                (Color::rgba(168, 85, 247, 0.05), 30.0),
                (Color::rgba(168, 85, 247, 0.02), 45.0),
                (T, 60.0),
            ],
        ),
    )
    .blend(BlendMode::SoftLight);
    let resting = LayerSpec::new(
        "lantern-resting",
        0,
        Placement::fill(),
        radial(
            RadialShape::Sized {
                rx_pct: 80.0,
                ry_pct: 60.0,
            },
            Vec2::new(50.0, 40.0),
            &[(tint(SKY, 0.25), 0.0), (tint(VIOLET, 0.15), 30.0), (T, 70.0)],
        ),
    )
    .blend(BlendMode::Screen);

    LanternSpec {
        id: "lantern".to_string(),
        z: 2,
        primary_size_px: 900.0,
        ambient_size_px: 1200.0,
        primary: vec![outer, core],
        ambient: vec![ambient],
        resting,
    }
}

fn god_rays() -> Vec<(LayerSpec, Timeline)> {
    let w = |a| tint(WHITE, a);
    let primary = LayerSpec::new(
        "god-rays-primary",
        8,
        Placement::at(pct(-80.0), pct(-80.0), pct(260.0), pct(260.0)),
        Fill::Conic {
            from_deg: 0.0,
            center: Vec2::new(50.0, 50.0),
            stops: conic_stops(&[
                (T, 0.0),
                (w(0.04), 8.0),
                (T, 16.0),
                (tint(PINK, 0.03), 32.0),
                (T, 48.0),
                (w(0.035), 64.0),
                (T, 80.0),
                (tint(LAVENDER, 0.03), 96.0),
                (T, 112.0),
                (w(0.04), 128.0),
                (T, 144.0),
                (tint(VIOLET, 0.025), 160.0),
                (T, 176.0),
                (w(0.03), 192.0),
                (T, 208.0),
                (tint(PINK, 0.035), 224.0),
                (T, 240.0),
                (w(0.04), 256.0),
                (T, 272.0),
                (tint(LAVENDER, 0.03), 288.0),
                (T, 304.0),
                (w(0.03), 320.0),
                (T, 336.0),
                (tint(SKY, 0.025), 352.0),
                (T, 360.0),
            ]),
        },
    )
    .blend(BlendMode::Overlay)
    .animate(AnimationBinding::new("god-rays-turn", 180.0).ease(Ease::Linear));

    let secondary = LayerSpec::new(
        "god-rays-secondary",
        8,
        Placement::at(pct(-60.0), pct(-60.0), pct(220.0), pct(220.0)),
        Fill::Conic {
            from_deg: 45.0,
            center: Vec2::new(50.0, 50.0),
            stops: conic_stops(&[
                (T, 0.0),
                (w(0.02), 15.0),
                (T, 30.0),
                (tint(PINK, 0.018), 60.0),
                (T, 90.0),
                (w(0.022), 120.0),
                (T, 150.0),
                (tint(LAVENDER, 0.018), 180.0),
                (T, 210.0),
                (w(0.02), 240.0),
                (T, 270.0),
                (tint(VIOLET, 0.015), 300.0),
                (T, 330.0),
                (w(0.018), 360.0),
            ]),
        },
    )
    .blend(BlendMode::Overlay)
    .animate(AnimationBinding::new("god-rays-counter", 240.0).ease(Ease::Linear));

    let turn =
        |deg: f64| Timeline::transform(Keyframes::evenly([0.0, deg].map(Transform2D::rotate)));
    vec![(primary, turn(360.0)), (secondary, turn(-360.0))]
}

fn god_ray_mask() -> LayerSpec {
    LayerSpec::new(
        "god-rays-mask",
        8,
        Placement::fill(),
        radial(
            RadialShape::Sized {
                rx_pct: 100.0,
                ry_pct: 80.0,
            },
            Vec2::new(50.0, 30.0),
            &[
                (T, 0.0),
                (T, 30.0),
                (Color::rgba(10, 10, 30, 0.5), 70.0),
                (Color::rgba(10, 10, 30, 0.9), 100.0),
            ],
        ),
    )
    .blend(BlendMode::Overlay)
}

fn overlays() -> [LayerSpec; 3] {
    let fog = LayerSpec::new(
        "fog",
        12,
        Placement::fill(),
        Fill::Linear {
            angle_deg: 180.0,
            stops: stops(&[
                (tint(WHITE, 0.12), 0.0),
                (T, 20.0),
                (T, 60.0),
                (tint(PINK, 0.08), 80.0),
                (tint(LAVENDER, 0.1), 100.0),
            ]),
        },
    );
    let vignette = LayerSpec::new(
        "vignette",
        13,
        Placement::fill(),
        radial(
            RadialShape::Sized {
                rx_pct: 80.0,
                ry_pct: 80.0,
            },
            Vec2::new(50.0, 50.0),
            &[
                (T, 0.0),
                (T, 50.0),
                (Color::rgba(124, 58, 237, 0.08), 80.0),
                (Color::rgba(91, 33, 182, 0.15), 100.0),
            ],
        ),
    );
    let grain = LayerSpec::new(
        "grain",
        14,
        Placement::fill(),
        Fill::Noise {
            base_frequency: 0.85,
            octaves: 4,
        },
    )
    .opacity(0.06)
    .blend(BlendMode::Overlay);
    [fog, vignette, grain]
}

/// The full dreamy landing-page background.
///
/// `seed` drives the generated particle and sparkle fields; everything else is fixed. The
/// result passes the default [`crate::AnimationPolicy`].
pub fn dreamscape(seed: u64) -> BackdropResult<Scene> {
    let (rays, rays_tl) = light_rays();

    let mut b = SceneBuilder::new()
        .seed(seed)
        .timeline("light-rays-sway", rays_tl)?
        .layer(sky())
        .layer(rays);

    for blob in aurora() {
        b = b.timeline(blob.binding.name.clone(), blob.timeline)?.layer(
            LayerSpec::new(blob.id, 2, blob.placement, blob.fill)
                .blur(blob.blur_px)
                .animate(blob.binding),
        );
    }

    b = b
        .lantern(lantern())
        .timelines(cloud_timelines())?
        .extend(cloud_field(3));

    for (layer, tl) in god_rays() {
        let name = layer.animation.as_ref().map(|a| a.name.clone()).unwrap_or_default();
        b = b.timeline(name, tl)?.layer(layer);
    }
    b = b.layer(god_ray_mask());

    let particles = particle_field(PARTICLE_COUNT, &mut SeededIndex::new(seed.wrapping_add(1)))?;
    let sparkles = sparkle_field(SPARKLE_COUNT, &mut SeededIndex::new(seed))?;

    b = b
        .timelines(particle_timelines())?
        .particles("particles", 9, BlendMode::Normal, particles)
        .timelines(sparkle_timelines())?
        .particles("sparkles", 10, BlendMode::Screen, sparkles)
        .timelines(bokeh_timelines())?
        .extend(bokeh_field(11));

    let [fog, vignette, grain] = overlays();
    b.layer(fog).layer(vignette).layer(grain).build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/presets.rs"]
mod tests;
