use super::*;

fn settle(m: &mut MagneticOffset) -> Vec2 {
    let mut v = Vec2::ZERO;
    for _ in 0..600 {
        v = m.tick(1.0 / 60.0);
    }
    v
}

#[test]
fn pulls_toward_pointer_inside_radius() {
    let ctx = InputContext::new();
    let mut m = MagneticOffset::mount(&ctx, Point::new(100.0, 100.0), MagneticConfig::default());
    ctx.dispatch(&InputEvent::pointer(150.0, 80.0, 0.0));
    assert!(m.is_engaged());
    let v = settle(&mut m);
    assert!((v.x - 15.0).abs() < 1e-3);
    assert!((v.y + 6.0).abs() < 1e-3);
}

#[test]
fn resets_when_leaving_radius_or_document() {
    let ctx = InputContext::new();
    let mut m = MagneticOffset::mount(&ctx, Point::new(0.0, 0.0), MagneticConfig::default());

    ctx.dispatch(&InputEvent::pointer(50.0, 0.0, 0.0));
    settle(&mut m);
    ctx.dispatch(&InputEvent::pointer(500.0, 0.0, 16.0));
    assert!(!m.is_engaged());
    assert!(settle(&mut m).hypot() < 1e-3);

    ctx.dispatch(&InputEvent::pointer(10.0, 10.0, 32.0));
    ctx.dispatch(&InputEvent::PointerLeave);
    assert!(!m.is_engaged());
    assert!(settle(&mut m).hypot() < 1e-3);
}

#[test]
fn far_pointer_never_engages() {
    let ctx = InputContext::new();
    let mut m = MagneticOffset::mount(&ctx, Point::new(0.0, 0.0), MagneticConfig::default());
    ctx.dispatch(&InputEvent::pointer(100.0, 0.0, 0.0));
    assert!(!m.is_engaged());
    assert_eq!(m.tick(0.1), Vec2::ZERO);
}

#[test]
fn unmount_removes_both_listeners() {
    let ctx = InputContext::new();
    let m = MagneticOffset::mount(&ctx, Point::ORIGIN, MagneticConfig::default());
    assert_eq!(ctx.total_listeners(), 2);
    drop(m);
    assert_eq!(ctx.total_listeners(), 0);
}

#[test]
fn non_finite_pointer_is_ignored() {
    let ctx = InputContext::new();
    let mut m = MagneticOffset::mount(&ctx, Point::new(100.0, 100.0), MagneticConfig::default());
    ctx.dispatch(&InputEvent::pointer(f64::NAN, 100.0, 0.0));
    assert!(!m.is_engaged());
    assert_eq!(m.tick(0.1), Vec2::ZERO);

    ctx.dispatch(&InputEvent::pointer(150.0, 80.0, 16.0));
    ctx.dispatch(&InputEvent::pointer(120.0, f64::NAN, 32.0));
    assert!(m.is_engaged());
    let v = settle(&mut m);
    assert!(v.x.is_finite() && v.y.is_finite());
    assert!((v.x - 15.0).abs() < 1e-3);
}
