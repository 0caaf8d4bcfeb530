use super::*;

fn sweep(ctx: &InputContext, moves: usize, px_per_ms: f64) {
    for i in 0..=moves {
        let t = i as f64 * 16.0;
        ctx.dispatch(&InputEvent::pointer(t * px_per_ms, 0.0, t));
    }
}

#[test]
fn fast_moves_spawn_every_second_event() {
    let ctx = InputContext::new();
    let trail = CursorTrail::mount(&ctx, MotionPreference::Full, 1);
    sweep(&ctx, 10, 1.0);
    assert_eq!(trail.particles().len(), 5);
}

#[test]
fn slow_moves_spawn_every_third_event() {
    let ctx = InputContext::new();
    let trail = CursorTrail::mount(&ctx, MotionPreference::Full, 1);
    sweep(&ctx, 9, 0.3);
    assert_eq!(trail.particles().len(), 3);
}

#[test]
fn idle_pointer_spawns_nothing() {
    let ctx = InputContext::new();
    let trail = CursorTrail::mount(&ctx, MotionPreference::Full, 1);
    sweep(&ctx, 20, 0.05);
    assert!(trail.particles().is_empty());
}

#[test]
fn capacity_is_bounded() {
    let ctx = InputContext::new();
    let trail = CursorTrail::mount(&ctx, MotionPreference::Full, 2);
    sweep(&ctx, 200, 2.0);
    let ps = trail.particles();
    assert_eq!(ps.len(), TRAIL_CAPACITY);
    assert_eq!(ps.last().unwrap().id, 99);
}

#[test]
fn particles_expire_and_stay_in_ranges() {
    let ctx = InputContext::new();
    let mut trail = CursorTrail::mount(&ctx, MotionPreference::Full, 3);
    sweep(&ctx, 20, 1.0);
    for p in trail.particles() {
        assert!((4.0..12.0).contains(&p.size_px));
        assert!((0.8..1.2).contains(&p.lifetime_s));
        assert_eq!(p.life(), 1.0);
    }

    trail.tick(0.5);
    assert!(!trail.particles().is_empty());
    trail.tick(0.75);
    assert!(trail.particles().is_empty());
}

#[test]
fn click_bursts_eight_staggered_particles() {
    let ctx = InputContext::new();
    let mut trail = CursorTrail::mount(&ctx, MotionPreference::Full, 4);
    ctx.dispatch(&InputEvent::click(200.0, 200.0));

    trail.tick(0.001);
    assert_eq!(trail.particles().len(), 1);
    trail.tick(0.25);
    assert_eq!(trail.particles().len(), 8);
}

#[test]
fn particles_drift_upward() {
    let ctx = InputContext::new();
    let mut trail = CursorTrail::mount(&ctx, MotionPreference::Full, 5);
    sweep(&ctx, 2, 1.0);
    let before = trail.particles()[0].position.y;
    for _ in 0..30 {
        trail.tick(1.0 / 60.0);
    }
    assert!(trail.particles()[0].position.y < before);
}

#[test]
fn reduced_motion_mounts_nothing() {
    let ctx = InputContext::new();
    let mut trail = CursorTrail::mount(&ctx, MotionPreference::Reduced, 1);
    assert!(!trail.is_enabled());
    assert_eq!(ctx.total_listeners(), 0);
    sweep(&ctx, 10, 1.0);
    ctx.dispatch(&InputEvent::click(0.0, 0.0));
    trail.tick(1.0);
    assert!(trail.particles().is_empty());
}

#[test]
fn unmount_removes_listeners() {
    let ctx = InputContext::new();
    let trail = CursorTrail::mount(&ctx, MotionPreference::Full, 1);
    assert_eq!(ctx.listener_count(EventKind::PointerMove), 1);
    assert_eq!(ctx.listener_count(EventKind::Click), 1);
    drop(trail);
    assert_eq!(ctx.total_listeners(), 0);
}

#[test]
fn non_finite_events_leave_trail_intact() {
    let ctx = InputContext::new();
    let mut trail = CursorTrail::mount(&ctx, MotionPreference::Full, 6);
    ctx.dispatch(&InputEvent::pointer(f64::NAN, 0.0, 0.0));
    ctx.dispatch(&InputEvent::pointer(0.0, 0.0, f64::INFINITY));
    ctx.dispatch(&InputEvent::click(f64::NAN, 10.0));
    trail.tick(0.5);
    assert!(trail.particles().is_empty());

    sweep(&ctx, 10, 1.0);
    let ps = trail.particles();
    assert_eq!(ps.len(), 5);
    assert!(ps.iter().all(|p| p.position.is_finite() && p.velocity.is_finite()));
}
