use std::{cell::Cell, rc::Rc};

use crate::{
    animation::spring::{Spring, Spring2, SpringState},
    compile::plan::MotionPreference,
    foundation::core::{Point, Vec2},
    input::{
        context::{EventKind, InputContext, InputEvent, Subscription},
        orientation::Tilt,
    },
};

/// Tilt offset in pixels at full tilt on the nearest band.
pub const TILT_MAX_OFFSET_PX: f64 = 25.0;

/// Scroll depth band. Nearer bands travel further over the full scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ParallaxDepth {
    Far,
    Mid,
    Near,
}

impl ParallaxDepth {
    pub const ALL: [Self; 3] = [Self::Far, Self::Mid, Self::Near];

    /// Upward travel in pixels at scroll progress 1.
    pub fn travel_px(self) -> f64 {
        match self {
            Self::Far => 80.0,
            Self::Mid => 160.0,
            Self::Near => 280.0,
        }
    }

    /// Share of the tilt offset this band follows.
    pub fn tilt_gain(self) -> f64 {
        match self {
            Self::Far => 0.3,
            Self::Mid => 0.6,
            Self::Near => 1.0,
        }
    }
}

/// Vertical scroll offsets of the three depth bands, in pixels (negative is up), plus
/// the smoothed tilt offset before per-band gain.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ParallaxFrame {
    pub far: f64,
    pub mid: f64,
    pub near: f64,
    pub tilt: Vec2,
}

impl ParallaxFrame {
    pub fn get(&self, depth: ParallaxDepth) -> f64 {
        match depth {
            ParallaxDepth::Far => self.far,
            ParallaxDepth::Mid => self.mid,
            ParallaxDepth::Near => self.near,
        }
    }

    /// Full translate of one band: scaled tilt on both axes plus its scroll offset.
    pub fn offset(&self, depth: ParallaxDepth) -> Vec2 {
        let tilt = self.tilt * depth.tilt_gain();
        Vec2::new(tilt.x, self.get(depth) + tilt.y)
    }
}

/// Scroll and tilt linked offsets, spring-smoothed per band. Static under reduced motion.
pub struct ScrollParallax {
    progress: Rc<Cell<f64>>,
    bands: [SpringState; 3],
    tilt: Spring2,
    motion: MotionPreference,
    _sub: Option<Subscription>,
}

impl ScrollParallax {
    pub fn mount(ctx: &InputContext, motion: MotionPreference) -> Self {
        let progress = Rc::new(Cell::new(0.0));
        let sub = (!motion.is_reduced()).then(|| {
            let p = Rc::clone(&progress);
            ctx.subscribe(EventKind::Scroll, move |ev| {
                if let InputEvent::Scroll { progress, .. } = *ev
                    && progress.is_finite()
                {
                    p.set(progress.clamp(0.0, 1.0));
                }
            })
        });
        Self {
            progress,
            bands: [SpringState::default(); 3],
            tilt: Spring2::new(Spring::TILT, Point::ORIGIN),
            motion,
            _sub: sub,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// Feed the latest device tilt. Gamma drives x and beta drives y.
    pub fn set_tilt(&mut self, tilt: Tilt) {
        if self.motion.is_reduced() || !(tilt.beta.is_finite() && tilt.gamma.is_finite()) {
            return;
        }
        self.tilt.set_target(Point::new(
            tilt.gamma.clamp(-1.0, 1.0) * TILT_MAX_OFFSET_PX,
            tilt.beta.clamp(-1.0, 1.0) * TILT_MAX_OFFSET_PX,
        ));
    }

    pub fn tick(&mut self, dt: f64) -> ParallaxFrame {
        let p = self.progress.get();
        for (state, depth) in self.bands.iter_mut().zip(ParallaxDepth::ALL) {
            *state = Spring::PARALLAX.step(*state, -p * depth.travel_px(), dt);
        }
        ParallaxFrame {
            far: self.bands[0].position,
            mid: self.bands[1].position,
            near: self.bands[2].position,
            tilt: self.tilt.tick(dt).to_vec2(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/parallax.rs"]
mod tests;
