use super::*;

fn linear_keys() -> Keyframes<f64> {
    Keyframes {
        keys: vec![
            Keyframe {
                at: 0.0,
                value: 0.0,
                ease: None,
            },
            Keyframe {
                at: 1.0,
                value: 10.0,
                ease: None,
            },
        ],
    }
}

#[test]
fn keyframes_linear_interpolates() {
    let k = linear_keys();
    assert_eq!(k.sample(0.5, Ease::Linear).unwrap(), 5.0);
    assert_eq!(k.sample(-1.0, Ease::Linear).unwrap(), 0.0);
    assert_eq!(k.sample(2.0, Ease::Linear).unwrap(), 10.0);
}

#[test]
fn key_ease_overrides_default() {
    let mut k = linear_keys();
    k.keys[0].ease = Some(Ease::InQuad);
    assert_eq!(k.sample(0.5, Ease::Linear).unwrap(), 2.5);
}

#[test]
fn evenly_spreads_offsets() {
    let k = Keyframes::evenly([0.0, 50.0, -30.0, 20.0, 0.0]);
    let offsets: Vec<f64> = k.keys.iter().map(|k| k.at).collect();
    assert_eq!(offsets, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(k.sample(0.25, Ease::Linear).unwrap(), 50.0);
}

#[test]
fn validate_rejects_unsorted_and_out_of_range() {
    let mut k = linear_keys();
    k.keys.swap(0, 1);
    assert!(k.validate().is_err());

    let mut k = linear_keys();
    k.keys[1].at = 1.5;
    assert!(k.validate().is_err());

    assert!(Keyframes::<f64> { keys: vec![] }.validate().is_err());
}

#[test]
fn property_names_round_trip_through_css() {
    for name in ["transform", "opacity", "filter", "box-shadow", "background-position"] {
        assert_eq!(AnimatedProperty::from_css_name(name).css_name(), name);
    }
    assert!(AnimatedProperty::Transform.is_compositor_safe());
    assert!(AnimatedProperty::Opacity.is_compositor_safe());
    assert!(!AnimatedProperty::from_css_name("filter").is_compositor_safe());
    assert!(!AnimatedProperty::from_css_name("left").is_compositor_safe());
}

#[test]
fn timeline_rejects_duplicate_properties() {
    let tl = Timeline {
        channels: vec![
            Channel::Opacity(Keyframes::evenly([0.2, 0.8])),
            Channel::Opacity(Keyframes::evenly([0.4, 0.6])),
        ],
    };
    assert!(tl.validate().is_err());
}

#[test]
fn timeline_sample_clamps_opacity_and_skips_raw() {
    let tl = Timeline {
        channels: vec![
            Channel::Opacity(Keyframes::evenly([0.5, 1.5])),
            Channel::Raw {
                property: "filter".to_string(),
                keys: vec![Keyframe {
                    at: 0.0,
                    value: "blur(4px)".to_string(),
                    ease: None,
                }],
            },
        ],
    };
    tl.validate().unwrap();
    let s = tl.sample(1.0, Ease::Linear).unwrap();
    assert_eq!(s.opacity, Some(1.0));
    assert_eq!(s.transform, None);
    assert_eq!(
        tl.properties(),
        vec![AnimatedProperty::Opacity, AnimatedProperty::Filter]
    );
}
