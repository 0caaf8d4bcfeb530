use crate::{
    compile::plan::{NodeKind, PlannedLayer, RenderPlan},
    foundation::{
        core::Transform2D,
        error::{BackdropError, BackdropResult},
    },
};

/// State of every planned layer at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSample {
    pub t_s: f64,
    pub layers: Vec<LayerState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerState {
    pub id: String,
    pub z: i32,
    pub parent: Option<usize>,
    /// Own opacity: the animated value when an opacity channel runs, else the resting one.
    pub opacity: f64,
    pub transform: Transform2D,
    /// Opacity after multiplying in every ancestor.
    pub composited_opacity: f64,
    /// Animation progress in `[0, 1]`, when animated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl FrameSample {
    pub fn get(&self, id: &str) -> Option<&LayerState> {
        self.layers.iter().find(|l| l.id == id)
    }
}

pub struct Evaluator;

impl Evaluator {
    /// Sample every layer of `plan` at `t_s` seconds after mount.
    ///
    /// Pointer followers report their resting state; the runtime owns their position.
    #[tracing::instrument(skip(plan), fields(layers = plan.layers.len()))]
    pub fn eval_at(plan: &RenderPlan, t_s: f64) -> BackdropResult<FrameSample> {
        if !t_s.is_finite() {
            return Err(BackdropError::evaluation("sample time must be finite"));
        }

        let mut layers: Vec<LayerState> = Vec::with_capacity(plan.layers.len());
        for l in &plan.layers {
            let mut state = eval_layer(plan, l, t_s)?;
            if let Some(p) = l.parent {
                let parent = layers.get(p).ok_or_else(|| {
                    BackdropError::evaluation(format!("layer '{}' has no planned parent", l.id))
                })?;
                state.composited_opacity *= parent.composited_opacity;
            }
            layers.push(state);
        }

        Ok(FrameSample { t_s, layers })
    }
}

fn eval_layer(plan: &RenderPlan, l: &PlannedLayer, t_s: f64) -> BackdropResult<LayerState> {
    let mut opacity = l.opacity;
    let mut transform = l.transform;
    let mut progress = None;

    let follower = matches!(l.kind, NodeKind::Follower(_));
    if let Some(binding) = l.animation.as_ref().filter(|_| !follower) {
        let tl = plan.timelines.get(&binding.name).ok_or_else(|| {
            BackdropError::evaluation(format!(
                "layer '{}' refers to timeline '{}' missing from the plan",
                l.id, binding.name
            ))
        })?;
        let p = binding.progress_at(t_s);
        let sample = tl.sample(p, binding.ease)?;
        if let Some(o) = sample.opacity {
            opacity = o;
        }
        if let Some(t) = sample.transform {
            transform = t;
        }
        progress = Some(p);
    }

    let opacity = opacity.clamp(0.0, 1.0);
    Ok(LayerState {
        id: l.id.clone(),
        z: l.z,
        parent: l.parent,
        opacity,
        transform,
        composited_opacity: opacity,
        progress,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
