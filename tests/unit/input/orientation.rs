use super::*;

struct Refuse(PermissionError);

impl OrientationPermission for Refuse {
    fn request(&mut self) -> Result<(), PermissionError> {
        Err(self.0.clone())
    }
}

#[test]
fn samples_are_low_passed_and_normalized() {
    let ctx = InputContext::new();
    let tracker = OrientationTracker::mount(&ctx, &mut AlwaysGranted);
    assert_eq!(tracker.tilt(), Tilt::default());

    ctx.dispatch(&InputEvent::orientation(90.0, 30.0));
    let t = tracker.tilt();
    assert!((t.beta - 0.15).abs() < 1e-12);
    assert!((t.gamma - 0.15).abs() < 1e-12);

    for _ in 0..200 {
        ctx.dispatch(&InputEvent::orientation(180.0, -90.0));
    }
    let t = tracker.tilt();
    assert_eq!(t.beta, 1.0);
    assert_eq!(t.gamma, -1.0);
}

#[test]
fn missing_angles_read_as_zero() {
    let ctx = InputContext::new();
    let tracker = OrientationTracker::mount(&ctx, &mut AlwaysGranted);
    ctx.dispatch(&InputEvent::Orientation {
        beta: None,
        gamma: Some(30.0),
    });
    let t = tracker.tilt();
    assert!(t.beta < 0.0);
    assert!(t.gamma > 0.0);
}

#[test]
fn refused_permission_leaves_tracker_inert() {
    let ctx = InputContext::new();
    for err in [PermissionError::Denied, PermissionError::Failed("boom".into())] {
        let tracker = OrientationTracker::mount(&ctx, &mut Refuse(err));
        assert!(!tracker.is_active());
        assert_eq!(ctx.listener_count(EventKind::Orientation), 0);
        ctx.dispatch(&InputEvent::orientation(90.0, 30.0));
        assert_eq!(tracker.tilt(), Tilt::default());
    }
}

#[test]
fn unmount_removes_listener() {
    let ctx = InputContext::new();
    let tracker = OrientationTracker::mount(&ctx, &mut AlwaysGranted);
    assert_eq!(ctx.listener_count(EventKind::Orientation), 1);
    drop(tracker);
    assert_eq!(ctx.listener_count(EventKind::Orientation), 0);
}

#[test]
fn non_finite_angles_keep_previous_reading() {
    let ctx = InputContext::new();
    let tracker = OrientationTracker::mount(&ctx, &mut AlwaysGranted);
    ctx.dispatch(&InputEvent::Orientation {
        beta: Some(f64::NAN),
        gamma: Some(f64::INFINITY),
    });
    assert_eq!(tracker.tilt(), Tilt::default());

    ctx.dispatch(&InputEvent::orientation(90.0, 30.0));
    let t = tracker.tilt();
    assert!((t.beta - 0.15).abs() < 1e-12);
    assert!((t.gamma - 0.15).abs() < 1e-12);

    ctx.dispatch(&InputEvent::Orientation {
        beta: Some(f64::NAN),
        gamma: Some(30.0),
    });
    let after = tracker.tilt();
    assert_eq!(after.beta, t.beta);
    assert!(after.gamma > t.gamma);
}
