use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::EaseInOut,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::CubicBezier(0.19, 1.0, 0.22, 1.0),
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    let a = Ease::EaseInOut.apply(0.3);
    let b = Ease::EaseInOut.apply(0.7);
    assert!((a + b - 1.0).abs() < 1e-6);
    assert!((Ease::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn css_names() {
    assert_eq!(Ease::Linear.to_css(), "linear");
    assert_eq!(Ease::EaseInOut.to_css(), "ease-in-out");
    assert_eq!(
        Ease::CubicBezier(0.19, 1.0, 0.22, 1.0).to_css(),
        "cubic-bezier(0.19, 1, 0.22, 1)"
    );
}

#[test]
fn bezier_control_points_are_checked() {
    assert!(Ease::CubicBezier(0.2, 2.0, 0.8, -1.0).is_valid());
    assert!(!Ease::CubicBezier(1.2, 0.0, 0.5, 1.0).is_valid());
}
