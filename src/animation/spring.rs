//! Damped springs for pointer-reactive motion.
//!
//! Steps are integrated in closed form, so arbitrarily large frame deltas stay stable.

use crate::foundation::{
    core::Point,
    error::{BackdropError, BackdropResult},
};

/// Damping regime of a spring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Underdamped,
    Critical,
    Overdamped,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Mass-spring-damper parameters.
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default = "unit_mass")]
    pub mass: f64,
}

fn unit_mass() -> f64 {
    1.0
}

impl Spring {
    pub const SNAPPY: Self = Self::preset(400.0, 30.0, 1.0);
    pub const SMOOTH: Self = Self::preset(200.0, 25.0, 0.8);
    pub const BOUNCY: Self = Self::preset(300.0, 12.0, 0.5);
    pub const GENTLE: Self = Self::preset(100.0, 20.0, 1.2);
    pub const CLOUDY: Self = Self::preset(50.0, 25.0, 1.5);
    pub const MAGNETIC: Self = Self::preset(150.0, 15.0, 0.1);
    pub const QUICK: Self = Self::preset(500.0, 35.0, 0.8);
    pub const HEAVY: Self = Self::preset(80.0, 30.0, 2.0);
    /// Primary lantern follower.
    pub const LANTERN: Self = Self::preset(30.0, 25.0, 1.5);
    /// Slow ambient follower layered behind the lantern.
    pub const AMBIENT: Self = Self::preset(15.0, 30.0, 1.0);
    /// Pupil smoothing.
    pub const EYE: Self = Self::preset(200.0, 30.0, 1.0);
    /// Scroll parallax bands.
    pub const PARALLAX: Self = Self::preset(50.0, 20.0, 1.0);
    /// Device tilt offset.
    pub const TILT: Self = Self::preset(100.0, 30.0, 1.0);

    const fn preset(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Validated constructor.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> BackdropResult<Self> {
        let s = Self::preset(stiffness, damping, mass);
        s.validate()?;
        Ok(s)
    }

    /// Look a preset up by name.
    pub fn named(name: &str) -> Option<Self> {
        Some(match name {
            "snappy" => Self::SNAPPY,
            "smooth" => Self::SMOOTH,
            "bouncy" => Self::BOUNCY,
            "gentle" => Self::GENTLE,
            "cloudy" => Self::CLOUDY,
            "magnetic" => Self::MAGNETIC,
            "quick" => Self::QUICK,
            "heavy" => Self::HEAVY,
            "lantern" => Self::LANTERN,
            "ambient" => Self::AMBIENT,
            "eye" => Self::EYE,
            "parallax" => Self::PARALLAX,
            "tilt" => Self::TILT,
            _ => return None,
        })
    }

    pub fn validate(&self) -> BackdropResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(BackdropError::validation("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(BackdropError::validation("spring damping must be >= 0"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(BackdropError::validation("spring mass must be > 0"));
        }
        Ok(())
    }

    fn discriminant(&self) -> f64 {
        self.damping * self.damping - 4.0 * self.stiffness * self.mass
    }

    pub fn regime(&self) -> Regime {
        let disc = self.discriminant();
        let scale = (self.damping * self.damping).max(4.0 * self.stiffness * self.mass);
        if disc.abs() <= 1e-9 * scale {
            Regime::Critical
        } else if disc > 0.0 {
            Regime::Overdamped
        } else {
            Regime::Underdamped
        }
    }

    /// Advance `state` toward `target` by `dt` seconds.
    pub fn step(&self, state: SpringState, target: f64, dt: f64) -> SpringState {
        if !(dt.is_finite() && dt > 0.0) {
            return state;
        }
        let x0 = state.position - target;
        let v0 = state.velocity;
        let m2 = 2.0 * self.mass;

        let (x, v) = match self.regime() {
            Regime::Overdamped => {
                let root = self.discriminant().sqrt();
                let r1 = (-self.damping + root) / m2;
                let r2 = (-self.damping - root) / m2;
                let a = (v0 - r2 * x0) / (r1 - r2);
                let b = x0 - a;
                let e1 = (r1 * dt).exp();
                let e2 = (r2 * dt).exp();
                (a * e1 + b * e2, a * r1 * e1 + b * r2 * e2)
            }
            Regime::Critical => {
                let r = -self.damping / m2;
                let c = v0 - r * x0;
                let e = (r * dt).exp();
                let x = (x0 + c * dt) * e;
                (x, c * e + r * x)
            }
            Regime::Underdamped => {
                let alpha = -self.damping / m2;
                let wd = (-self.discriminant()).sqrt() / m2;
                let c = (v0 - alpha * x0) / wd;
                let e = (alpha * dt).exp();
                let (sin, cos) = (wd * dt).sin_cos();
                (
                    e * (x0 * cos + c * sin),
                    e * ((alpha * x0 + c * wd) * cos + (alpha * c - x0 * wd) * sin),
                )
            }
        };

        SpringState {
            position: target + x,
            velocity: v,
        }
    }
}

/// Position and velocity of a one-dimensional spring.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }
}

/// Two independent springs sharing parameters, tracking a 2D target.
#[derive(Clone, Copy, Debug)]
pub struct Spring2 {
    spring: Spring,
    x: SpringState,
    y: SpringState,
    target: Point,
}

impl Spring2 {
    /// Spring at rest on `start`, targeting `start`.
    pub fn new(spring: Spring, start: Point) -> Self {
        Self {
            spring,
            x: SpringState::at_rest(start.x),
            y: SpringState::at_rest(start.y),
            target: start,
        }
    }

    pub fn spring(&self) -> Spring {
        self.spring
    }

    /// Replace the target; the newest sample always wins.
    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn position(&self) -> Point {
        Point::new(self.x.position, self.y.position)
    }

    /// Jump to `p` with zero velocity.
    pub fn snap_to(&mut self, p: Point) {
        self.x = SpringState::at_rest(p.x);
        self.y = SpringState::at_rest(p.y);
        self.target = p;
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn tick(&mut self, dt: f64) -> Point {
        self.x = self.spring.step(self.x, self.target.x, dt);
        self.y = self.spring.step(self.y, self.target.y, dt);
        self.position()
    }

    /// `true` once both axes are within `eps` of the target and nearly still.
    pub fn is_settled(&self, eps: f64) -> bool {
        (self.x.position - self.target.x).abs() <= eps
            && (self.y.position - self.target.y).abs() <= eps
            && self.x.velocity.abs() <= eps
            && self.y.velocity.abs() <= eps
    }
}

/// Exponential low-pass step: move `prev` toward `next` by `factor`.
pub fn low_pass(prev: f64, next: f64, factor: f64) -> f64 {
    prev + (next - prev) * factor.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
