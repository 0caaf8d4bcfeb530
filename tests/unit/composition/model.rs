use super::*;
use crate::foundation::core::Length;

fn sky() -> LayerSpec {
    LayerSpec::new(
        "sky",
        0,
        Placement::fill(),
        Fill::Linear {
            angle_deg: 180.0,
            stops: vec![
                GradientStop::new(Color::hex(0x1e1b4b), 0.0),
                GradientStop::new(Color::hex(0xfbcfe8), 100.0),
            ],
        },
    )
}

fn sparkle(id: &str, left: f64, top: f64) -> ParticleSpec {
    ParticleSpec {
        id: id.to_string(),
        left_pct: left,
        top_pct: top,
        size_px: 8.0,
        color: Color::rgba(255, 255, 255, 0.9),
        shape: ShapeKind::Star,
        animation: "twinkle".to_string(),
        duration_s: 3.0,
        delay_s: -1.0,
        opacity: 0.7,
    }
}

fn twinkle() -> Timeline {
    Timeline::opacity(crate::animation::keyframes::Keyframes::evenly([0.4, 1.0, 0.4]))
}

#[test]
fn scene_json_round_trip_validates() {
    let mut keyframes = BTreeMap::new();
    keyframes.insert("twinkle".to_string(), twinkle());
    let scene = Scene {
        seed: 7,
        keyframes,
        layers: vec![
            SceneLayer::Layer(sky()),
            SceneLayer::Particles(ParticleField {
                id: "sparkles".to_string(),
                z: 10,
                blend: BlendMode::Normal,
                particles: vec![sparkle("s0", 10.0, 20.0)],
            }),
        ],
    };
    let json = scene.to_json_pretty().unwrap();
    let back = Scene::from_json_str(&json).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn unknown_timeline_is_rejected() {
    let scene = Scene {
        seed: 0,
        keyframes: BTreeMap::new(),
        layers: vec![SceneLayer::Layer(
            sky().animate(AnimationBinding::new("missing", 4.0)),
        )],
    };
    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("unknown timeline 'missing'"), "{err}");
}

#[test]
fn timeline_names_must_be_css_identifiers() {
    let with_timeline = |name: &str| {
        let mut keyframes = BTreeMap::new();
        keyframes.insert(name.to_string(), twinkle());
        Scene {
            seed: 0,
            keyframes,
            layers: vec![SceneLayer::Layer(
                sky().animate(AnimationBinding::new(name, 4.0)),
            )],
        }
    };

    for bad in ["3d-spin", "-1x", "--var", "-", "none", "Infinite", "ease-in-out", "revert-layer"] {
        assert!(with_timeline(bad).validate().is_err(), "{bad} was accepted");
    }
    let err = with_timeline("paused").validate().unwrap_err().to_string();
    assert!(err.contains("reserved CSS keyword"), "{err}");

    for good in ["twinkle", "-drift", "_glow", "fade-2", "none-ish"] {
        with_timeline(good).validate().unwrap();
    }
}

#[test]
fn duplicate_ids_are_rejected_across_nesting() {
    let group = GroupSpec::new("clouds", 3).child(sky());
    let scene = Scene {
        seed: 0,
        keyframes: BTreeMap::new(),
        layers: vec![SceneLayer::Layer(sky()), SceneLayer::Group(group)],
    };
    assert!(scene.validate().unwrap_err().to_string().contains("duplicate id 'sky'"));
}

#[test]
fn particle_opacity_must_be_positive() {
    let mut p = sparkle("s0", 10.0, 10.0);
    p.opacity = 0.0;
    assert!(p.validate().is_err());
    p.opacity = 1.0;
    p.validate().unwrap();
    p.left_pct = 101.0;
    assert!(p.validate().is_err());
}

#[test]
fn gradient_needs_sorted_stops() {
    let mut layer = sky();
    if let Some(stops) = layer.fill.stops_mut() {
        stops.reverse();
    }
    assert!(layer.validate().is_err());
}

#[test]
fn empty_group_is_rejected() {
    assert!(GroupSpec::new("empty", 1).validate().is_err());
}

#[test]
fn layer_values_are_checked() {
    assert!(sky().blur(-1.0).validate().is_err());
    assert!(sky().opacity(1.5).validate().is_err());
    assert!(
        LayerSpec::new(
            "bad id!",
            0,
            Placement::at(Length::ZERO, Length::ZERO, Length::Px(10.0), Length::Px(10.0)),
            Fill::None
        )
        .validate()
        .is_err()
    );
}

#[test]
fn shapes_have_outlines() {
    for shape in ShapeKind::ALL {
        assert!(!shape.name().is_empty());
        assert_eq!(shape.clip_path().is_none(), shape == ShapeKind::Circle);
    }
    assert!(ShapeKind::Diamond.aspect() < 1.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = Scene::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read scene"), "{err}");
}
