use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{binding::AnimationBinding, keyframes::Timeline},
    compile::fingerprint::{PlanFingerprint, fingerprint_plan},
    composition::model::{
        BlendMode, Fill, GroupSpec, LanternSpec, LayerSpec, ParticleField, Scene, SceneLayer,
        Shadow, ShapeKind,
    },
    foundation::{
        core::{Length, Placement, Transform2D},
        error::BackdropResult,
    },
    policy::{
        rules::{AnimationPolicy, PolicyReport},
        soften::compensate_blur,
    },
};

/// The viewer's motion preference, read once when a scene is compiled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MotionPreference {
    #[default]
    Full,
    /// No animation is scheduled; every layer shows one static frame.
    Reduced,
}

impl MotionPreference {
    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub motion: MotionPreference,
    pub policy: AnimationPolicy,
}

/// Which pointer follower a lantern node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Follower {
    Primary,
    Ambient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NodeKind {
    Layer,
    /// Animated container; its children are static.
    Group,
    /// Particle container; never animated itself.
    Field,
    Particle { shape: ShapeKind },
    /// Moved by the runtime every frame, not by keyframes.
    Follower(Follower),
}

#[derive(Clone, Debug, PartialEq)]
/// One element of the compiled stack.
pub struct PlannedLayer {
    pub id: String,
    /// Index of the containing node in [`RenderPlan::layers`].
    pub parent: Option<usize>,
    pub kind: NodeKind,
    pub z: i32,
    pub placement: Placement,
    pub fill: Fill,
    pub blur_px: f64,
    pub opacity: f64,
    pub transform: Transform2D,
    pub blend: BlendMode,
    pub shadow: Option<Shadow>,
    pub animation: Option<AnimationBinding>,
}

impl PlannedLayer {
    fn from_spec(l: LayerSpec, parent: Option<usize>) -> Self {
        Self {
            id: l.id,
            parent,
            kind: NodeKind::Layer,
            z: l.z,
            placement: l.placement,
            fill: l.fill,
            blur_px: l.blur_px,
            opacity: l.opacity,
            transform: l.transform,
            blend: l.blend,
            shadow: l.shadow,
            animation: l.animation,
        }
    }

    fn container(id: &str, kind: NodeKind, z: i32, placement: Placement) -> Self {
        Self {
            id: id.to_string(),
            parent: None,
            kind,
            z,
            placement,
            fill: Fill::None,
            blur_px: 0.0,
            opacity: 1.0,
            transform: Transform2D::default(),
            blend: BlendMode::Normal,
            shadow: None,
            animation: None,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }
}

#[derive(Clone, Debug)]
/// A compiled scene, ready to render or evaluate.
///
/// `layers` is in paint order: top-level entries sorted by `z` (ties keep authoring order),
/// each followed by its children. A parent always precedes its children.
pub struct RenderPlan {
    pub seed: u64,
    pub motion: MotionPreference,
    pub layers: Vec<PlannedLayer>,
    /// Timelines referenced by at least one planned layer.
    pub timelines: BTreeMap<String, Timeline>,
    pub report: PolicyReport,
    pub fingerprint: PlanFingerprint,
}

impl RenderPlan {
    pub fn find(&self, id: &str) -> Option<&PlannedLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn children(&self, parent: usize) -> impl Iterator<Item = (usize, &PlannedLayer)> {
        self.layers
            .iter()
            .enumerate()
            .filter(move |(_, l)| l.parent == Some(parent))
    }

    /// Layers carrying a keyframe animation.
    pub fn animated(&self) -> impl Iterator<Item = &PlannedLayer> {
        self.layers.iter().filter(|l| l.is_animated())
    }
}

/// Validate `scene`, enforce the animation policy and flatten it into a [`RenderPlan`].
///
/// With [`MotionPreference::Reduced`] every binding is dropped, particle fields are left out
/// and a lantern is replaced by its resting glow.
#[tracing::instrument(skip(scene, opts), fields(motion = ?opts.motion, layers = scene.layers.len()))]
pub fn compile_scene(scene: &Scene, opts: &CompileOptions) -> BackdropResult<RenderPlan> {
    scene.validate()?;
    let report = opts.policy.check(scene).into_result()?;

    let reduced = opts.motion.is_reduced();
    let soften: BTreeSet<&str> = if reduced {
        BTreeSet::new()
    } else {
        report.compensated.iter().map(String::as_str).collect()
    };

    let mut order: Vec<&SceneLayer> = scene.layers.iter().collect();
    order.sort_by_key(|l| l.z());

    let mut layers = Vec::new();
    for entry in order {
        match entry {
            SceneLayer::Layer(l) => {
                layers.push(PlannedLayer::from_spec(settle(l, &soften)?, None));
            }
            SceneLayer::Group(g) => plan_group(g, &soften, &mut layers)?,
            SceneLayer::Particles(f) => {
                if !reduced {
                    plan_field(f, &mut layers);
                }
            }
            SceneLayer::Lantern(l) => plan_lantern(l, reduced, &soften, &mut layers)?,
        }
    }

    if reduced {
        for l in &mut layers {
            l.animation = None;
        }
    }

    let used: BTreeSet<&str> = layers
        .iter()
        .filter_map(|l| l.animation.as_ref().map(|a| a.name.as_str()))
        .collect();
    let timelines: BTreeMap<String, Timeline> = scene
        .keyframes
        .iter()
        .filter(|(name, _)| used.contains(name.as_str()))
        .map(|(name, tl)| (name.clone(), tl.clone()))
        .collect();

    tracing::debug!(
        planned = layers.len(),
        timelines = timelines.len(),
        compensated = soften.len(),
        "compiled scene"
    );

    let mut plan = RenderPlan {
        seed: scene.seed,
        motion: opts.motion,
        layers,
        timelines,
        report,
        fingerprint: PlanFingerprint::default(),
    };
    plan.fingerprint = fingerprint_plan(&plan);
    Ok(plan)
}

/// Bake blur into the layer when the policy asked for it.
fn settle(l: &LayerSpec, soften: &BTreeSet<&str>) -> BackdropResult<LayerSpec> {
    if soften.contains(l.id.as_str()) {
        compensate_blur(l)
    } else {
        Ok(l.clone())
    }
}

fn plan_group(
    g: &GroupSpec,
    soften: &BTreeSet<&str>,
    out: &mut Vec<PlannedLayer>,
) -> BackdropResult<()> {
    let parent = out.len();
    let mut node = PlannedLayer::container(&g.id, NodeKind::Group, g.z, g.placement);
    node.opacity = g.opacity;
    node.animation = g.animation.clone();
    out.push(node);
    for c in &g.children {
        out.push(PlannedLayer::from_spec(settle(c, soften)?, Some(parent)));
    }
    Ok(())
}

fn plan_field(f: &ParticleField, out: &mut Vec<PlannedLayer>) {
    let parent = out.len();
    let mut node = PlannedLayer::container(&f.id, NodeKind::Field, f.z, Placement::fill());
    node.blend = f.blend;
    out.push(node);

    for p in &f.particles {
        let width = p.size_px * p.shape.aspect();
        out.push(PlannedLayer {
            id: p.id.clone(),
            parent: Some(parent),
            kind: NodeKind::Particle { shape: p.shape },
            z: f.z,
            placement: Placement::centered(
                p.left_pct,
                p.top_pct,
                Length::Px(width),
                Length::Px(p.size_px),
            ),
            fill: Fill::Solid(p.color),
            blur_px: 0.0,
            opacity: p.opacity,
            transform: Transform2D::default(),
            blend: BlendMode::Normal,
            shadow: None,
            animation: Some(p.binding()),
        });
    }
}

fn plan_lantern(
    l: &LanternSpec,
    reduced: bool,
    soften: &BTreeSet<&str>,
    out: &mut Vec<PlannedLayer>,
) -> BackdropResult<()> {
    if reduced {
        let mut resting = PlannedLayer::from_spec(l.resting.clone(), None);
        resting.z = l.z;
        out.push(resting);
        return Ok(());
    }

    for (follower, size, children) in [
        (Follower::Primary, l.primary_size_px, &l.primary),
        (Follower::Ambient, l.ambient_size_px, &l.ambient),
    ] {
        let parent = out.len();
        let suffix = match follower {
            Follower::Primary => "primary",
            Follower::Ambient => "ambient",
        };
        // Centered on the container origin; the runtime translates it to the pointer.
        let mut node = PlannedLayer::container(
            &format!("{}-{suffix}", l.id),
            NodeKind::Follower(follower),
            l.z,
            Placement::centered(0.0, 0.0, Length::Px(size), Length::Px(size)),
        );
        node.opacity = match follower {
            Follower::Primary => 0.4,
            Follower::Ambient => 1.0,
        };
        out.push(node);
        for c in children {
            out.push(PlannedLayer::from_spec(settle(c, soften)?, Some(parent)));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
