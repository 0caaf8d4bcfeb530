use super::*;
use crate::composition::model::Scene;

#[test]
fn field_has_three_containers_and_a_glow() {
    let layers = cloud_field(3);
    assert_eq!(layers.len(), 4);

    let groups: Vec<_> = layers
        .iter()
        .filter_map(|l| match l {
            SceneLayer::Group(g) => Some(g),
            _ => None,
        })
        .collect();
    assert_eq!(groups.len(), 3);
    assert_eq!(
        groups.iter().map(|g| g.z).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
    let clouds: usize = groups.iter().map(|g| g.children.len()).sum();
    assert_eq!(clouds, CLOUD_COUNT);

    for g in &groups {
        assert!(g.animation.is_some());
        for c in &g.children {
            assert!(c.animation.is_none(), "{} must stay static", c.id);
            assert!(c.blur_px > 0.0);
            c.validate().unwrap();
        }
    }

    let SceneLayer::Layer(glow) = &layers[3] else {
        panic!("expected glow layer");
    };
    assert_eq!(glow.z, 7);
    assert_eq!(glow.blend, BlendMode::SoftLight);
    assert!(glow.animation.is_none());
}

#[test]
fn cloud_stops_are_spread_evenly() {
    for layer in cloud_field(0) {
        let SceneLayer::Group(g) = layer else { continue };
        for c in &g.children {
            let stops = c.fill.stops().unwrap();
            assert_eq!(stops.first().unwrap().at_pct, 0.0);
            assert_eq!(stops.last().unwrap().at_pct, 100.0);
            assert!(stops.last().unwrap().color.is_transparent());
        }
    }
}

#[test]
fn cloud_scene_validates() {
    let scene = Scene {
        seed: 0,
        keyframes: cloud_timelines(),
        layers: cloud_field(3),
    };
    scene.validate().unwrap();
    for (_, b) in scene.bindings() {
        assert!(b.name.starts_with("cloud-"));
    }
}
