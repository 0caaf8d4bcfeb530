//! Pointer-following light.

use crate::{
    compile::plan::Follower,
    foundation::core::{Point, Transform2D},
    input::context::InputContext,
    reactive::pointer::PointerTracker,
};

/// Follower positions and glow after one tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LanternFrame {
    pub primary: Point,
    pub ambient: Point,
    /// Opacity of the primary follower.
    pub glow: f64,
}

impl LanternFrame {
    /// Compositor transform for one follower node.
    pub fn transform(&self, follower: Follower) -> Transform2D {
        let p = match follower {
            Follower::Primary => self.primary,
            Follower::Ambient => self.ambient,
        };
        Transform2D::translate(p.x, p.y)
    }

    /// Opacity for one follower node; the ambient wash stays fully opaque.
    pub fn opacity(&self, follower: Follower) -> f64 {
        match follower {
            Follower::Primary => self.glow,
            Follower::Ambient => 1.0,
        }
    }
}

/// Slow shimmer keyed on the light's position.
pub fn glow_intensity(p: Point) -> f64 {
    0.4 + 0.1 * ((p.x + p.y) * 0.001).sin()
}

/// Mounted lantern. Dropping it removes its pointer listener.
pub struct Lantern {
    tracker: PointerTracker,
}

impl Lantern {
    pub fn mount(ctx: &InputContext, start: Point) -> Self {
        Self {
            tracker: PointerTracker::mount(ctx, start),
        }
    }

    pub fn tick(&mut self, dt: f64) -> LanternFrame {
        let s = self.tracker.tick(dt);
        LanternFrame {
            primary: s.primary,
            ambient: s.ambient,
            glow: glow_intensity(s.primary),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/lantern.rs"]
mod tests;
