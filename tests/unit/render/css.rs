use super::*;
use crate::{
    compile::plan::{CompileOptions, MotionPreference, compile_scene},
    composition::presets::dreamscape,
};

fn css(motion: MotionPreference) -> String {
    let plan = compile_scene(
        &dreamscape(4).unwrap(),
        &CompileOptions {
            motion,
            ..CompileOptions::default()
        },
    )
    .unwrap();
    render_css(&plan)
}

#[test]
fn full_motion_emits_keyframes_and_bindings() {
    let css = css(MotionPreference::Full);
    assert!(css.contains("@keyframes light-rays-sway {"));
    assert!(css.contains("@keyframes cloud-drift-slow {"));
    assert!(css.contains("animation: god-rays-turn 180s linear"));
    assert!(css.contains("will-change: transform, opacity"));
    assert!(css.contains(".bd-sky {"));
    assert!(css.contains("linear-gradient(165deg, #7c3aed 0%"));
}

#[test]
fn keyframes_only_touch_transform_and_opacity() {
    let css = css(MotionPreference::Full);
    let mut in_block = false;
    for line in css.lines() {
        if line.starts_with("@keyframes") {
            in_block = true;
            continue;
        }
        if line == "}" {
            in_block = false;
            continue;
        }
        if in_block {
            assert!(
                line.contains("transform:") || line.contains("opacity:"),
                "{line}"
            );
            assert!(!line.contains("filter"));
            assert!(!line.contains("box-shadow"));
        }
    }
}

#[test]
fn moving_layers_carry_no_filter() {
    let css = css(MotionPreference::Full);
    for line in css.lines().filter(|l| l.contains("animation:")) {
        assert!(!line.contains("filter: blur"), "{line}");
    }
}

#[test]
fn reduced_motion_css_has_no_animation() {
    let css = css(MotionPreference::Reduced);
    assert!(!css.contains("@keyframes"));
    assert!(!css.contains("animation:"));
    assert!(!css.contains("will-change"));
    assert!(!css.contains(".bd-sparkle-"));
    assert!(css.contains(".bd-lantern-resting {"));
}

#[test]
fn particles_use_clip_paths() {
    let css = css(MotionPreference::Full);
    let sparkle = css
        .lines()
        .find(|l| l.starts_with(".bd-sparkle-0 {"))
        .unwrap();
    assert!(sparkle.contains("clip-path: polygon(") || sparkle.contains("border-radius: 50%"));
    assert!(sparkle.contains("translate: -50% -50%"));
}

#[test]
fn noise_uri_is_escaped() {
    let uri = noise_data_uri(0.85, 4);
    assert!(uri.starts_with("data:image/svg+xml,%3Csvg"));
    assert!(uri.contains("baseFrequency='0.85'"));
    assert!(uri.contains("numOctaves='4'"));
    assert!(!uri.contains('<'));
    assert!(!uri.contains('#'));
}

#[test]
fn noise_uri_percent_escapes_decode() {
    let uri = noise_data_uri(0.85, 4);
    assert!(uri.contains("width='100%25' height='100%25'"));
    assert!(uri.contains("filter='url(%23n)'"));

    let bytes = uri.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let hex = &bytes[i + 1..i + 3];
            assert!(hex.iter().all(u8::is_ascii_hexdigit), "bad escape at {i} in {uri}");
        }
    }
}
