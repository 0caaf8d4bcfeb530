//! Stylesheet emission.
//!
//! Every planned layer becomes one class rule named `bd-<id>`. Animated layers reference a
//! `@keyframes` block per used timeline. Reduced-motion plans carry no bindings, so their
//! stylesheet contains neither keyframes nor `animation` declarations.

use std::fmt::Write as _;

use crate::{
    animation::keyframes::{Channel, Keyframe, Timeline},
    compile::plan::{NodeKind, PlannedLayer, RenderPlan},
    composition::model::{Fill, GradientStop, RadialShape},
    foundation::core::{Anchor, css_num},
};

/// Class of the outermost container.
pub const ROOT_CLASS: &str = "bd-root";

/// Class name of a planned layer.
pub fn layer_class(id: &str) -> String {
    format!("bd-{id}")
}

pub fn render_css(plan: &RenderPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/* backdrop {} */", plan.fingerprint.to_hex());
    let _ = writeln!(
        out,
        ".{ROOT_CLASS} {{ position: fixed; inset: 0; overflow: hidden; pointer-events: none; z-index: 0; }}"
    );

    for (name, tl) in &plan.timelines {
        write_keyframes(&mut out, name, tl);
    }
    for layer in &plan.layers {
        write_rule(&mut out, layer);
    }
    tracing::debug!(bytes = out.len(), rules = plan.layers.len(), "rendered css");
    out
}

fn write_keyframes(out: &mut String, name: &str, tl: &Timeline) {
    let _ = writeln!(out, "@keyframes {name} {{");
    for ch in &tl.channels {
        match ch {
            Channel::Transform(k) => {
                for key in &k.keys {
                    write_step(out, key, "transform", &key.value.to_css());
                }
            }
            Channel::Opacity(k) => {
                for key in &k.keys {
                    write_step(out, key, "opacity", &css_num(key.value));
                }
            }
            // Raw channels never survive the policy check.
            Channel::Raw { .. } => {}
        }
    }
    out.push_str("}\n");
}

fn write_step<T>(out: &mut String, key: &Keyframe<T>, property: &str, value: &str) {
    let _ = write!(out, "  {}% {{ {property}: {value};", css_num(key.at * 100.0));
    if let Some(ease) = key.ease {
        let _ = write!(out, " animation-timing-function: {};", ease.to_css());
    }
    out.push_str(" }\n");
}

fn write_rule(out: &mut String, l: &PlannedLayer) {
    let mut decls: Vec<String> = vec!["position: absolute".to_string()];

    let p = &l.placement;
    for (name, edge) in [
        ("top", p.top),
        ("left", p.left),
        ("right", p.right),
        ("bottom", p.bottom),
    ] {
        if let Some(len) = edge {
            decls.push(format!("{name}: {}", len.to_css()));
        }
    }
    decls.push(format!("width: {}", p.width.to_css()));
    decls.push(format!("height: {}", p.height.to_css()));
    if p.anchor == Anchor::Center {
        // Independent of `transform`, so animations keep the centering.
        decls.push("translate: -50% -50%".to_string());
    }
    if l.parent.is_none() {
        decls.push(format!("z-index: {}", l.z));
    }

    decls.extend(fill_decls(&l.fill));
    if let NodeKind::Particle { shape } = l.kind {
        match shape.clip_path() {
            Some(path) => decls.push(format!("clip-path: {path}")),
            None => decls.push("border-radius: 50%".to_string()),
        }
    }

    if l.blur_px > 0.0 {
        decls.push(format!("filter: blur({}px)", css_num(l.blur_px)));
    }
    if let Some(s) = &l.shadow {
        decls.push(format!(
            "box-shadow: {}px {}px {}px {}px {}",
            css_num(s.offset.x),
            css_num(s.offset.y),
            css_num(s.blur_px),
            css_num(s.spread_px),
            s.color.to_css()
        ));
    }
    if l.opacity < 1.0 {
        decls.push(format!("opacity: {}", css_num(l.opacity)));
    }
    if !l.transform.is_identity() {
        decls.push(format!("transform: {}", l.transform.to_css()));
    }
    if l.blend.css_name() != "normal" {
        decls.push(format!("mix-blend-mode: {}", l.blend.css_name()));
    }

    let follower = matches!(l.kind, NodeKind::Follower(_));
    if let Some(a) = &l.animation {
        decls.push(format!("animation: {}", a.to_css()));
    }
    if l.is_animated() || follower {
        decls.push("will-change: transform, opacity".to_string());
        decls.push("backface-visibility: hidden".to_string());
    }

    let _ = writeln!(out, ".{} {{ {}; }}", layer_class(&l.id), decls.join("; "));
}

fn stops_css(stops: &[GradientStop]) -> String {
    stops
        .iter()
        .map(|s| s.to_css())
        .collect::<Vec<_>>()
        .join(", ")
}

fn fill_decls(fill: &Fill) -> Vec<String> {
    match fill {
        Fill::None => Vec::new(),
        Fill::Solid(c) => vec![format!("background: {}", c.to_css())],
        Fill::Linear { angle_deg, stops } => vec![format!(
            "background: linear-gradient({}deg, {})",
            css_num(*angle_deg),
            stops_css(stops)
        )],
        Fill::Radial {
            shape,
            center,
            stops,
        } => {
            let shape = match shape {
                RadialShape::Circle => "circle".to_string(),
                RadialShape::Ellipse => "ellipse".to_string(),
                RadialShape::Sized { rx_pct, ry_pct } => {
                    format!("ellipse {}% {}%", css_num(*rx_pct), css_num(*ry_pct))
                }
            };
            vec![format!(
                "background: radial-gradient({shape} at {}% {}%, {})",
                css_num(center.x),
                css_num(center.y),
                stops_css(stops)
            )]
        }
        Fill::Conic {
            from_deg,
            center,
            stops,
        } => vec![format!(
            "background: conic-gradient(from {}deg at {}% {}%, {})",
            css_num(*from_deg),
            css_num(center.x),
            css_num(center.y),
            stops_css(stops)
        )],
        Fill::Image { source } => vec![
            format!("background-image: url(\"{}\")", source.replace('"', "%22")),
            "background-size: cover".to_string(),
            "background-position: center".to_string(),
        ],
        Fill::Noise {
            base_frequency,
            octaves,
        } => vec![
            format!(
                "background-image: url(\"{}\")",
                noise_data_uri(*base_frequency, *octaves)
            ),
            "background-repeat: repeat".to_string(),
        ],
    }
}

/// Fractal-noise grain as an inline SVG data URI.
pub fn noise_data_uri(base_frequency: f64, octaves: u32) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='256' height='256'>\
         <filter id='n'><feTurbulence type='fractalNoise' baseFrequency='{}' numOctaves='{octaves}' stitchTiles='stitch'/></filter>\
         <rect width='100%' height='100%' filter='url(#n)'/></svg>",
        css_num(base_frequency)
    );
    let mut uri = String::from("data:image/svg+xml,");
    for ch in svg.chars() {
        match ch {
            '%' => uri.push_str("%25"),
            '<' => uri.push_str("%3C"),
            '>' => uri.push_str("%3E"),
            '#' => uri.push_str("%23"),
            '"' => uri.push_str("%22"),
            c => uri.push(c),
        }
    }
    uri
}

#[cfg(test)]
#[path = "../../tests/unit/render/css.rs"]
mod tests;
