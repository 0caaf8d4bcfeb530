use super::*;
use crate::{
    compile::plan::{CompileOptions, MotionPreference, compile_scene},
    composition::presets::dreamscape,
};

fn plan(motion: MotionPreference) -> RenderPlan {
    compile_scene(
        &dreamscape(21).unwrap(),
        &CompileOptions {
            motion,
            ..CompileOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn reduced_motion_frames_are_static() {
    let plan = plan(MotionPreference::Reduced);
    let a = Evaluator::eval_at(&plan, 0.0).unwrap();
    let b = Evaluator::eval_at(&plan, 37.5).unwrap();
    for (x, y) in a.layers.iter().zip(&b.layers) {
        assert_eq!(x.opacity, y.opacity, "{}", x.id);
        assert_eq!(x.transform, y.transform, "{}", x.id);
        assert!(x.progress.is_none());
    }
    let planned = plan.find("light-rays").unwrap();
    assert_eq!(a.get("light-rays").unwrap().opacity, planned.opacity);
}

#[test]
fn light_rays_follow_their_keyframes() {
    let plan = plan(MotionPreference::Full);
    let start = Evaluator::eval_at(&plan, 0.0).unwrap();
    let rays = start.get("light-rays").unwrap();
    assert!((rays.opacity - 0.5).abs() < 1e-9);
    assert!(rays.transform.rotate_deg.abs() < 1e-9);

    let third = Evaluator::eval_at(&plan, 10.0).unwrap();
    let rays = third.get("light-rays").unwrap();
    assert!((rays.transform.rotate_deg - 5.0).abs() < 1e-6);
    assert!((rays.opacity - 0.8).abs() < 1e-6);
}

#[test]
fn linear_rotation_is_proportional() {
    let plan = plan(MotionPreference::Full);
    let f = Evaluator::eval_at(&plan, 90.0).unwrap();
    let primary = f.get("god-rays-primary").unwrap();
    assert!((primary.transform.rotate_deg - 180.0).abs() < 1e-9);
    let secondary = f.get("god-rays-secondary").unwrap();
    assert!((secondary.transform.rotate_deg + 135.0).abs() < 1e-9);
}

#[test]
fn positive_delay_holds_the_first_frame() {
    let plan = plan(MotionPreference::Full);
    let f = Evaluator::eval_at(&plan, 2.0).unwrap();
    let rose = f.get("aurora-rose").unwrap();
    assert_eq!(rose.progress, Some(0.0));
    assert_eq!(rose.transform.translate.x, 0.0);
}

#[test]
fn children_inherit_container_opacity() {
    let plan = plan(MotionPreference::Full);
    for t in [0.0, 12.0, 33.3] {
        let f = Evaluator::eval_at(&plan, t).unwrap();
        for l in f.layers.iter().filter(|l| l.parent.is_some()) {
            let parent = &f.layers[l.parent.unwrap()];
            let want = l.opacity * parent.composited_opacity;
            assert!((l.composited_opacity - want).abs() < 1e-12, "{}", l.id);
            assert!((0.0..=1.0).contains(&l.composited_opacity));
        }
    }
}

#[test]
fn followers_report_resting_state() {
    let plan = plan(MotionPreference::Full);
    let f = Evaluator::eval_at(&plan, 5.0).unwrap();
    let primary = f.get("lantern-primary").unwrap();
    assert!((primary.opacity - 0.4).abs() < 1e-12);
    assert!(primary.transform.is_identity());
}

#[test]
fn non_finite_time_is_rejected() {
    let plan = plan(MotionPreference::Full);
    assert!(Evaluator::eval_at(&plan, f64::NAN).is_err());
}
