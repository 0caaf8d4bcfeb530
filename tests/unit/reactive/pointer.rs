use super::*;

#[test]
fn ambient_lags_behind_primary() {
    let ctx = InputContext::new();
    let mut t = PointerTracker::mount(&ctx, Point::new(0.0, 0.0));
    ctx.dispatch(&InputEvent::pointer(500.0, 0.0, 0.0));

    let mut s = t.tick(1.0 / 60.0);
    for _ in 0..30 {
        s = t.tick(1.0 / 60.0);
    }
    assert_eq!(s.raw, Point::new(500.0, 0.0));
    assert!(s.primary.x > s.ambient.x);
    assert!(s.ambient.x > 0.0);
}

#[test]
fn newest_sample_wins() {
    let ctx = InputContext::new();
    let mut t = PointerTracker::mount(&ctx, Point::new(0.0, 0.0));
    ctx.dispatch_all([
        InputEvent::pointer(10.0, 10.0, 0.0),
        InputEvent::pointer(20.0, 20.0, 1.0),
        InputEvent::pointer(30.0, 40.0, 2.0),
    ]);
    assert_eq!(t.tick(0.0).raw, Point::new(30.0, 40.0));
}

#[test]
fn without_input_followers_rest() {
    let ctx = InputContext::new();
    let mut t = PointerTracker::mount(&ctx, Point::new(7.0, 9.0));
    let s = t.tick(1.0);
    assert_eq!(s.primary, Point::new(7.0, 9.0));
    assert_eq!(s.ambient, Point::new(7.0, 9.0));
    assert_eq!(t.state(), s);
}

#[test]
fn non_finite_samples_are_dropped() {
    let ctx = InputContext::new();
    let mut t = PointerTracker::mount(&ctx, Point::new(0.0, 0.0));
    ctx.dispatch(&InputEvent::pointer(f64::NAN, 100.0, 0.0));
    assert_eq!(t.tick(1.0 / 60.0).raw, Point::new(0.0, 0.0));

    ctx.dispatch(&InputEvent::pointer(500.0, 500.0, 16.0));
    ctx.dispatch(&InputEvent::pointer(f64::INFINITY, 0.0, 32.0));
    let mut s = t.tick(1.0 / 60.0);
    for _ in 0..600 {
        s = t.tick(1.0 / 60.0);
    }
    assert_eq!(s.raw, Point::new(500.0, 500.0));
    assert!(s.primary.is_finite() && s.ambient.is_finite());
    assert!((s.primary - s.raw).hypot() < 1.0);
}
