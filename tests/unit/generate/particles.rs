use std::collections::HashSet;

use super::*;

fn cell(p: &ParticleSpec) -> (i64, i64) {
    (p.left_pct.round() as i64, p.top_pct.round() as i64)
}

fn dust_palette() -> Palette {
    Palette {
        colors: vec![Color::rgba(255, 255, 255, 0.6), Color::hex(0xfbcfe8)],
        shapes: vec![ShapeKind::Circle, ShapeKind::Star],
        animations: vec!["drift".to_string()],
        size_px: Span::new(2.0, 5.0),
        duration_s: Span::new(12.0, 30.0),
        delay_s: Span::new(-10.0, 0.0),
        opacity: Span::new(0.3, 0.8),
    }
}

#[test]
fn thirty_six_sparkles_are_well_formed() {
    let sparkles = sparkle_field(SPARKLE_COUNT, &mut SeededIndex::new(2024)).unwrap();
    assert_eq!(sparkles.len(), 36);

    let mut cells = HashSet::new();
    for s in &sparkles {
        assert!(s.opacity > 0.0 && s.opacity <= 1.0, "{}: {}", s.id, s.opacity);
        assert!(
            SPARKLE_SIZE_PX.contains(s.size_px),
            "{}: {}",
            s.id,
            s.size_px
        );
        assert!(ShapeKind::ALL.contains(&s.shape));
        assert!(!s.shape.name().is_empty());
        assert!(s.delay_s <= 0.0);
        assert!(SPARKLE_ANIMATIONS.contains(&s.animation.as_str()));
        assert!(cells.insert(cell(s)), "duplicate cell for {}", s.id);
        s.validate().unwrap();
    }
}

#[test]
fn sparkle_categories_cycle_by_index() {
    assert_eq!(SparkleCategory::for_index(0), SparkleCategory::Micro);
    assert_eq!(SparkleCategory::for_index(4), SparkleCategory::Small);
    assert_eq!(SparkleCategory::for_index(19), SparkleCategory::Statement);
    assert_eq!(SparkleCategory::for_index(20), SparkleCategory::Micro);
}

#[test]
fn sparkle_field_covers_every_animation() {
    let sparkles = sparkle_field(SPARKLE_COUNT, &mut SeededIndex::new(1)).unwrap();
    let timelines = sparkle_timelines();
    for s in &sparkles {
        assert!(timelines.contains_key(&s.animation), "{}", s.animation);
    }
    for tl in timelines.values() {
        tl.validate().unwrap();
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_particles(50, &dust_palette(), &mut SeededIndex::new(9), "dust").unwrap();
    let b = generate_particles(50, &dust_palette(), &mut SeededIndex::new(9), "dust").unwrap();
    assert_eq!(a, b);

    let c = generate_particles(50, &dust_palette(), &mut Rng64::new(9), "dust").unwrap();
    let d = generate_particles(50, &dust_palette(), &mut Rng64::new(9), "dust").unwrap();
    assert_eq!(c, d);

    let e = generate_particles(50, &dust_palette(), &mut SeededIndex::new(10), "dust").unwrap();
    assert_ne!(a, e);
}

#[test]
fn dense_fields_still_get_unique_cells() {
    let ps = generate_particles(3000, &dust_palette(), &mut SeededIndex::new(3), "p").unwrap();
    let cells: HashSet<_> = ps.iter().map(cell).collect();
    assert_eq!(cells.len(), ps.len());
    for p in &ps {
        assert!((0.0..=100.0).contains(&p.left_pct));
        assert!((0.0..=100.0).contains(&p.top_pct));
    }
}

#[test]
fn generated_values_respect_palette() {
    let palette = dust_palette();
    for p in generate_particles(100, &palette, &mut Rng64::new(77), "dust").unwrap() {
        assert!(palette.size_px.contains(p.size_px));
        assert!(palette.duration_s.contains(p.duration_s));
        assert!(palette.delay_s.contains(p.delay_s));
        assert!(palette.opacity.contains(p.opacity));
        assert!(palette.colors.contains(&p.color));
        assert!(palette.shapes.contains(&p.shape));
    }
}

#[test]
fn grid_capacity_is_enforced() {
    assert!(
        generate_particles(101 * 101 + 1, &dust_palette(), &mut SeededIndex::new(0), "x").is_err()
    );
    assert!(
        generate_particles(0, &dust_palette(), &mut SeededIndex::new(0), "x")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn invalid_palette_is_rejected() {
    let mut p = dust_palette();
    p.colors.clear();
    assert!(p.validate().is_err());

    let mut p = dust_palette();
    p.opacity = Span::new(0.0, 0.5);
    assert!(p.validate().is_err());
}

#[test]
fn particle_field_uses_known_styles() {
    let ps = particle_field(PARTICLE_COUNT, &mut SeededIndex::new(5)).unwrap();
    let timelines = particle_timelines();
    assert_eq!(ps.len(), PARTICLE_COUNT);
    for p in &ps {
        assert!(matches!(
            p.shape,
            ShapeKind::Heart | ShapeKind::Sparkle | ShapeKind::Star | ShapeKind::Circle
        ));
        assert!(timelines.contains_key(&p.animation));
        p.validate().unwrap();
    }
}
