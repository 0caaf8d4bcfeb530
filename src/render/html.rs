use std::fmt::Write as _;

use crate::{
    compile::plan::{NodeKind, RenderPlan},
    render::css::{ROOT_CLASS, layer_class},
};

/// Container markup for `plan`: one `div` per planned layer, nested by parent.
///
/// Pointer followers carry `data-follower` so the runtime can find them.
pub fn render_html(plan: &RenderPlan) -> String {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); plan.layers.len()];
    let mut roots = Vec::new();
    for (i, l) in plan.layers.iter().enumerate() {
        match l.parent {
            Some(p) if p < plan.layers.len() => children[p].push(i),
            _ => roots.push(i),
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "<div class=\"{ROOT_CLASS}\" aria-hidden=\"true\">");
    for &r in &roots {
        write_node(&mut out, plan, &children, r, 1);
    }
    out.push_str("</div>\n");
    out
}

fn write_node(
    out: &mut String,
    plan: &RenderPlan,
    children: &[Vec<usize>],
    index: usize,
    depth: usize,
) {
    let l = &plan.layers[index];
    let indent = "  ".repeat(depth);
    let attr = match l.kind {
        NodeKind::Follower(f) => format!(" data-follower=\"{}\"", format!("{f:?}").to_lowercase()),
        _ => String::new(),
    };
    let kids = &children[index];
    if kids.is_empty() {
        let _ = writeln!(out, "{indent}<div class=\"{}\"{attr}></div>", layer_class(&l.id));
        return;
    }
    let _ = writeln!(out, "{indent}<div class=\"{}\"{attr}>", layer_class(&l.id));
    for &k in kids {
        write_node(out, plan, children, k, depth + 1);
    }
    let _ = writeln!(out, "{indent}</div>");
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
