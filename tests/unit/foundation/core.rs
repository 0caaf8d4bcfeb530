use super::*;

#[test]
fn color_css_forms() {
    assert_eq!(Color::hex(0x7C3AED).to_css(), "#7c3aed");
    assert_eq!(
        Color::rgba(255, 255, 255, 0.04).to_css(),
        "rgba(255, 255, 255, 0.04)"
    );
    assert_eq!(Color::TRANSPARENT.to_css(), "transparent");
}

#[test]
fn scale_alpha_clamps() {
    let c = Color::rgba(10, 20, 30, 0.9).scale_alpha(1.3);
    assert_eq!(c.a, 1.0);
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
}

#[test]
fn css_num_trims() {
    assert_eq!(css_num(1.0), "1");
    assert_eq!(css_num(0.25), "0.25");
    assert_eq!(css_num(-0.00001), "0");
    assert_eq!(css_num(12.123456), "12.1235");
}

#[test]
fn transform_css_and_identity() {
    assert_eq!(Transform2D::default().to_css(), "none");
    assert_eq!(
        Transform2D::translate_scale(10.0, -2.5, 1.1).to_css(),
        "translate(10px, -2.5px) scale(1.1)"
    );
    assert_eq!(Transform2D::rotate(5.0).to_css(), "rotate(5deg)");
}

#[test]
fn transform_to_affine_identity_and_translation() {
    assert_eq!(Transform2D::default().to_affine(), kurbo::Affine::IDENTITY);
    assert_eq!(
        Transform2D::translate(10.0, -2.5).to_affine(),
        kurbo::Affine::translate(Vec2::new(10.0, -2.5))
    );
}

#[test]
fn placement_grow_keeps_center_for_top_left_anchor() {
    let p = Placement::at(
        Length::Px(100.0),
        Length::Px(50.0),
        Length::Px(200.0),
        Length::Px(100.0),
    );
    let g = p.grow_px(10.0);
    assert_eq!(g.top, Some(Length::Px(90.0)));
    assert_eq!(g.left, Some(Length::Px(40.0)));
    assert_eq!(g.width, Length::Px(220.0));
    assert_eq!(g.height, Length::Px(120.0));
}

#[test]
fn placement_grow_centered_only_resizes() {
    let p = Placement::centered(15.0, 20.0, Length::Px(180.0), Length::Px(180.0));
    let g = p.grow_px(60.0);
    assert_eq!(g.left, p.left);
    assert_eq!(g.top, p.top);
    assert_eq!(g.width, Length::Px(300.0));
}

#[test]
fn placement_validation_requires_edges_and_positive_size() {
    assert!(Placement::fill().validate("layer").is_ok());

    let mut p = Placement::fill();
    p.width = Length::Px(0.0);
    assert!(p.validate("layer").is_err());

    let mut p = Placement::fill();
    p.top = None;
    assert!(p.validate("layer").is_err());
}
