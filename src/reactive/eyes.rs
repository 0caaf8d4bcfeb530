//! Pupils that follow the pointer, with an idle blink.

use crate::{
    animation::spring::{Spring, Spring2},
    foundation::{
        core::{Point, Vec2},
        rng::Rng64,
    },
    input::context::{InputContext, Subscription},
    reactive::pointer::LatestPointer,
};

/// Eye sockets as fractions of the character box, relative to its center.
const LEFT_EYE: Vec2 = Vec2::new(-0.12, -0.15);
const RIGHT_EYE: Vec2 = Vec2::new(0.12, -0.15);
/// Pointer distance at which the pupil reaches full deflection.
const FULL_REACH_PX: f64 = 300.0;
const VERTICAL_SCALE: f64 = 0.7;
const BLINK_MIN_S: f64 = 4.0;
const BLINK_SPREAD_S: f64 = 3.0;
const BLINK_LEN_S: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeConfig {
    /// Character box center in viewport pixels.
    pub center: Point,
    /// Character box size in pixels.
    pub size: Vec2,
    /// Largest pupil displacement in pixels.
    pub max_offset_px: f64,
}

impl EyeConfig {
    pub fn new(center: Point, size: Vec2) -> Self {
        Self {
            center,
            size,
            max_offset_px: 12.0,
        }
    }

    fn socket(&self, frac: Vec2) -> Point {
        self.center + Vec2::new(frac.x * self.size.x, frac.y * self.size.y)
    }
}

/// Pupil offset for one socket.
pub fn pupil_offset(socket: Point, pointer: Point, max_offset_px: f64) -> Vec2 {
    let d = pointer - socket;
    let dist = d.hypot();
    if dist == 0.0 {
        return Vec2::ZERO;
    }
    let intensity = (dist / FULL_REACH_PX).min(1.0);
    let (sin, cos) = d.y.atan2(d.x).sin_cos();
    Vec2::new(
        cos * max_offset_px * intensity,
        sin * max_offset_px * intensity * VERTICAL_SCALE,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EyeFrame {
    pub left: Vec2,
    pub right: Vec2,
    pub blinking: bool,
}

pub struct EyeTracker {
    config: EyeConfig,
    latest: LatestPointer,
    left: Spring2,
    right: Spring2,
    rng: Rng64,
    next_blink_s: f64,
    blink_left_s: f64,
    _sub: Subscription,
}

impl EyeTracker {
    pub fn mount(ctx: &InputContext, config: EyeConfig, seed: u64) -> Self {
        let latest = LatestPointer::default();
        let sub = latest.listen(ctx);
        let mut rng = Rng64::new(seed);
        let next_blink_s = blink_interval(&mut rng);
        Self {
            config,
            latest,
            left: Spring2::new(Spring::EYE, Point::ORIGIN),
            right: Spring2::new(Spring::EYE, Point::ORIGIN),
            rng,
            next_blink_s,
            blink_left_s: 0.0,
            _sub: sub,
        }
    }

    /// Move the character box, e.g. after a resize.
    pub fn set_config(&mut self, config: EyeConfig) {
        self.config = config;
    }

    pub fn tick(&mut self, dt: f64) -> EyeFrame {
        if let Some(p) = self.latest.get() {
            let c = self.config;
            let l = pupil_offset(c.socket(LEFT_EYE), p, c.max_offset_px);
            let r = pupil_offset(c.socket(RIGHT_EYE), p, c.max_offset_px);
            self.left.set_target(l.to_point());
            self.right.set_target(r.to_point());
        }
        let left = self.left.tick(dt).to_vec2();
        let right = self.right.tick(dt).to_vec2();

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.blink_left_s > 0.0 {
            self.blink_left_s = (self.blink_left_s - dt).max(0.0);
        } else {
            self.next_blink_s -= dt;
            if self.next_blink_s <= 0.0 {
                self.blink_left_s = BLINK_LEN_S;
                self.next_blink_s = blink_interval(&mut self.rng);
            }
        }

        EyeFrame {
            left,
            right,
            blinking: self.blink_left_s > 0.0,
        }
    }
}

fn blink_interval(rng: &mut Rng64) -> f64 {
    BLINK_MIN_S + rng.next_f64_01() * BLINK_SPREAD_S
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/eyes.rs"]
mod tests;
