use super::*;
use crate::input::context::{EventKind, InputEvent};

#[test]
fn trajectory_is_monotone_without_overshoot() {
    let ctx = InputContext::new();
    let mut lantern = Lantern::mount(&ctx, Point::new(100.0, 100.0));
    ctx.dispatch(&InputEvent::pointer(900.0, 900.0, 0.0));

    let mut prev = lantern.tick(1.0 / 60.0);
    for _ in 0..(60 * 20) {
        let f = lantern.tick(1.0 / 60.0);
        for (a, b) in [
            (prev.primary.x, f.primary.x),
            (prev.primary.y, f.primary.y),
            (prev.ambient.x, f.ambient.x),
            (prev.ambient.y, f.ambient.y),
        ] {
            assert!(b >= a - 1e-9, "moved backwards: {a} -> {b}");
            assert!(b <= 900.0 + 1e-9, "overshot: {b}");
        }
        prev = f;
    }
    assert!((prev.primary.x - 900.0).abs() < 1.0);
    assert!(prev.ambient.x > 100.0);
}

#[test]
fn glow_stays_in_band() {
    for v in [0.0, 500.0, 785.0, 2000.0, -3000.0] {
        let g = glow_intensity(Point::new(v, v));
        assert!((0.3..=0.5).contains(&g), "{g}");
    }
    assert!((glow_intensity(Point::new(0.0, 0.0)) - 0.4).abs() < 1e-12);
}

#[test]
fn frame_maps_to_follower_styles() {
    let f = LanternFrame {
        primary: Point::new(10.0, 20.0),
        ambient: Point::new(5.0, 6.0),
        glow: 0.45,
    };
    assert_eq!(f.transform(Follower::Primary), Transform2D::translate(10.0, 20.0));
    assert_eq!(f.transform(Follower::Ambient), Transform2D::translate(5.0, 6.0));
    assert_eq!(f.opacity(Follower::Primary), 0.45);
    assert_eq!(f.opacity(Follower::Ambient), 1.0);
}

#[test]
fn unmount_returns_listener_count_to_baseline() {
    let ctx = InputContext::new();
    let baseline = ctx.listener_count(EventKind::PointerMove);
    {
        let mut a = Lantern::mount(&ctx, Point::new(0.0, 0.0));
        let _b = Lantern::mount(&ctx, Point::new(0.0, 0.0));
        assert_eq!(ctx.listener_count(EventKind::PointerMove), baseline + 2);
        a.tick(0.016);
    }
    assert_eq!(ctx.listener_count(EventKind::PointerMove), baseline);
}
