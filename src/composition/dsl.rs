use std::collections::BTreeMap;

use crate::{
    animation::keyframes::Timeline,
    composition::model::{
        BlendMode, GroupSpec, LanternSpec, LayerSpec, ParticleField, ParticleSpec, Scene,
        SceneLayer,
    },
    foundation::error::{BackdropError, BackdropResult},
};

pub struct SceneBuilder {
    seed: u64,
    keyframes: BTreeMap<String, Timeline>,
    layers: Vec<SceneLayer>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            seed: 0,
            keyframes: BTreeMap::new(),
            layers: Vec::new(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn timeline(mut self, name: impl Into<String>, timeline: Timeline) -> BackdropResult<Self> {
        let name = name.into();
        if self.keyframes.contains_key(&name) {
            return Err(BackdropError::validation(format!(
                "duplicate timeline '{name}'"
            )));
        }
        self.keyframes.insert(name, timeline);
        Ok(self)
    }

    /// Register a batch of timelines, failing on the first duplicate.
    pub fn timelines(
        self,
        timelines: impl IntoIterator<Item = (String, Timeline)>,
    ) -> BackdropResult<Self> {
        timelines
            .into_iter()
            .try_fold(self, |b, (name, tl)| b.timeline(name, tl))
    }

    pub fn layer(mut self, layer: LayerSpec) -> Self {
        self.layers.push(SceneLayer::Layer(layer));
        self
    }

    pub fn group(mut self, group: GroupSpec) -> Self {
        self.layers.push(SceneLayer::Group(group));
        self
    }

    pub fn particles(
        mut self,
        id: impl Into<String>,
        z: i32,
        blend: BlendMode,
        particles: Vec<ParticleSpec>,
    ) -> Self {
        self.layers.push(SceneLayer::Particles(ParticleField {
            id: id.into(),
            z,
            blend,
            particles,
        }));
        self
    }

    pub fn lantern(mut self, lantern: LanternSpec) -> Self {
        self.layers.push(SceneLayer::Lantern(lantern));
        self
    }

    /// Append already-built stack entries, e.g. from a field generator.
    pub fn extend(mut self, layers: impl IntoIterator<Item = SceneLayer>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn build(self) -> BackdropResult<Scene> {
        let scene = Scene {
            seed: self.seed,
            keyframes: self.keyframes,
            layers: self.layers,
        };
        scene.validate()?;
        Ok(scene)
    }
}
