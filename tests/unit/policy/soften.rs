use super::*;
use crate::{
    animation::keyframes::{Keyframes, Timeline},
    foundation::core::{Length, Placement, Transform2D},
};

fn bokeh(size: f64, blur: f64) -> LayerSpec {
    LayerSpec::new(
        "bokeh-0",
        11,
        Placement::centered(20.0, 30.0, Length::Px(size), Length::Px(size)),
        Fill::Radial {
            shape: RadialShape::Circle,
            center: Vec2::new(50.0, 50.0),
            stops: vec![
                GradientStop::new(Color::rgba(255, 255, 255, 0.3), 0.0),
                GradientStop::new(Color::rgba(251, 207, 232, 0.12), 40.0),
                GradientStop::new(Color::TRANSPARENT, 70.0),
            ],
        },
    )
    .blur(blur)
}

#[test]
fn compensation_grows_box_and_removes_blur() {
    let out = compensate_blur(&bokeh(100.0, 20.0)).unwrap();
    assert_eq!(out.blur_px, 0.0);
    assert_eq!(out.placement.width, Length::Px(140.0));
    assert_eq!(out.placement.height, Length::Px(140.0));
    // Centered boxes keep their anchor point.
    assert_eq!(out.placement.left, Some(Length::Percent(20.0)));
}

#[test]
fn compensation_adds_interpolated_tail_stops() {
    let src = bokeh(100.0, 20.0);
    let out = compensate_blur(&src).unwrap();
    let stops = out.fill.stops().unwrap();
    assert_eq!(stops.len(), 3 + SOFTEN_STEPS);

    let shrink = 100.0 / 140.0;
    assert!((stops[1].at_pct - 40.0 * shrink).abs() < 1e-9);
    assert!((stops.last().unwrap().at_pct - 70.0 * shrink).abs() < 1e-9);

    assert!(stops.windows(2).all(|w| w[0].at_pct <= w[1].at_pct));
    assert!(stops.windows(2).skip(1).all(|w| w[0].color.a >= w[1].color.a));
}

#[test]
fn solid_fill_becomes_soft_radial() {
    let mut layer = bokeh(200.0, 10.0);
    layer.fill = Fill::Solid(Color::rgba(255, 255, 255, 0.5));
    let out = compensate_blur(&layer).unwrap();
    let stops = out.fill.stops().unwrap();
    assert!(matches!(out.fill, Fill::Radial { .. }));
    assert!(stops.last().unwrap().color.is_transparent());
    assert_eq!(stops.last().unwrap().at_pct, 100.0);
}

#[test]
fn unblurred_layer_is_unchanged() {
    let layer = bokeh(100.0, 0.0);
    assert_eq!(compensate_blur(&layer).unwrap(), layer);
}

#[test]
fn image_blur_cannot_be_compensated() {
    let mut layer = bokeh(100.0, 5.0);
    layer.fill = Fill::Image {
        source: "img/cloud.png".to_string(),
    };
    assert!(compensate_blur(&layer).is_err());
}

#[test]
fn glow_pair_pulses_opacity_only() {
    let pulse = Timeline::opacity(Keyframes::evenly([0.0, 1.0, 0.0]));
    let pair = glow_pair(
        bokeh(60.0, 0.0),
        Shadow::glow(20.0, 4.0, Color::rgba(236, 72, 153, 0.5)),
        AnimationBinding::new("glow-pulse", 3.0),
        &pulse,
    )
    .unwrap();

    assert!(pair.base.animation.is_none());
    assert_eq!(pair.base.shadow.map(|s| s.blur_px), Some(20.0));
    assert_eq!(pair.overlay.id, "bokeh-0-glow");
    assert_eq!(pair.overlay.shadow.map(|s| s.blur_px), Some(40.0));
    assert_eq!(pair.overlay.animation.as_ref().map(|a| a.name.as_str()), Some("glow-pulse"));
}

#[test]
fn glow_pair_refuses_transform_pulse() {
    let wobble = Timeline::transform(Keyframes::evenly([
        Transform2D::default(),
        Transform2D::scale(1.2),
    ]));
    let err = glow_pair(
        bokeh(60.0, 0.0),
        Shadow::glow(20.0, 4.0, Color::rgba(236, 72, 153, 0.5)),
        AnimationBinding::new("wobble", 3.0),
        &wobble,
    )
    .unwrap_err();
    assert!(err.to_string().contains("may only animate opacity"));
}
