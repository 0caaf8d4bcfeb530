//! Cursor sparkle trail.
//!
//! Fast pointer movement sheds short-lived particles that inherit part of the pointer
//! velocity, drift upward and fade. A click fires a radial burst. The trail does not mount
//! any listener under reduced motion.

use std::{cell::RefCell, rc::Rc};

use crate::{
    compile::plan::MotionPreference,
    composition::model::ShapeKind,
    foundation::{
        core::{Color, Point, Vec2},
        rng::Rng64,
    },
    generate::particles::RandomSource,
    input::context::{EventKind, InputContext, InputEvent, Subscription},
};

pub const TRAIL_CAPACITY: usize = 30;
pub const TRAIL_COLORS: [Color; 8] = [
    Color::hex(0xffffff),
    Color::hex(0xfef3c7),
    Color::hex(0xfbcfe8),
    Color::hex(0xc4b5fd),
    Color::hex(0xec4899),
    Color::hex(0xa78bfa),
    Color::hex(0x00f5ff),
    Color::hex(0xf472b6),
];
const TRAIL_SHAPES: [ShapeKind; 4] = [
    ShapeKind::Sparkle,
    ShapeKind::Star,
    ShapeKind::Circle,
    ShapeKind::Heart,
];

/// Pointer speed (px/ms) below which nothing spawns.
const MIN_SPEED: f64 = 0.1;
/// Above this speed every second move spawns, otherwise every third.
const FAST_SPEED: f64 = 0.5;
const BURST: usize = 8;
const BURST_STAGGER_S: f64 = 0.03;
/// Physics constants are per 60 Hz frame.
const FRAME_HZ: f64 = 60.0;
const FRICTION: f64 = 0.98;
const LIFT: f64 = 0.1;
const SPIN_DEG: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrailParticle {
    pub id: u64,
    pub position: Point,
    /// Pixels per frame.
    pub velocity: Vec2,
    pub size_px: f64,
    pub color: Color,
    pub shape: ShapeKind,
    pub rotation_deg: f64,
    pub age_s: f64,
    pub lifetime_s: f64,
}

impl TrailParticle {
    /// Remaining life in `[0, 1]`, usable as opacity.
    pub fn life(&self) -> f64 {
        (1.0 - self.age_s / self.lifetime_s).clamp(0.0, 1.0)
    }
}

struct Pending {
    due_s: f64,
    at: Point,
    velocity: Vec2,
}

struct TrailState {
    rng: Rng64,
    now_s: f64,
    next_id: u64,
    last: Option<(Point, f64)>,
    moves: u64,
    pending: Vec<Pending>,
    particles: Vec<TrailParticle>,
}

impl TrailState {
    fn on_move(&mut self, at: Point, t_ms: f64) {
        if !(at.is_finite() && t_ms.is_finite()) {
            return;
        }
        if let Some((prev, prev_t)) = self.last {
            let dt_ms = (t_ms - prev_t).max(1.0);
            let v = (at - prev) / dt_ms;
            let speed = v.hypot();
            if speed > MIN_SPEED {
                self.moves += 1;
                let every = if speed > FAST_SPEED { 2 } else { 3 };
                if self.moves % every == 0 {
                    self.spawn(at, v);
                }
            }
        }
        self.last = Some((at, t_ms));
    }

    fn on_click(&mut self, at: Point) {
        if !at.is_finite() {
            return;
        }
        for i in 0..BURST {
            let angle = i as f64 / BURST as f64 * std::f64::consts::TAU;
            let speed = 3.0 + self.rng.unit(i as u64, 0) * 2.0;
            self.pending.push(Pending {
                due_s: self.now_s + i as f64 * BURST_STAGGER_S,
                at,
                velocity: Vec2::from_angle(angle) * speed,
            });
        }
    }

    fn spawn(&mut self, at: Point, v: Vec2) {
        let id = self.next_id;
        self.next_id += 1;
        let mut r = || self.rng.unit(id, 0);
        let velocity = Vec2::new(
            v.x * 0.3 + (r() - 0.5) * 2.0,
            v.y * 0.3 + (r() - 0.5) * 2.0 - 1.0,
        );
        let size_px = 4.0 + r() * 8.0;
        let color = TRAIL_COLORS[pick(r(), TRAIL_COLORS.len())];
        let rotation_deg = r() * 360.0;
        let shape = TRAIL_SHAPES[pick(r(), TRAIL_SHAPES.len())];
        let lifetime_s = 0.8 + r() * 0.4;

        if self.particles.len() >= TRAIL_CAPACITY {
            self.particles.remove(0);
        }
        self.particles.push(TrailParticle {
            id,
            position: at,
            velocity,
            size_px,
            color,
            shape,
            rotation_deg,
            age_s: 0.0,
            lifetime_s,
        });
    }

    fn advance(&mut self, dt: f64) {
        self.now_s += dt;
        let now = self.now_s;

        let (due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due_s <= now);
        self.pending = rest;
        for p in due {
            self.spawn(p.at, p.velocity);
        }

        let frames = dt * FRAME_HZ;
        let decay = FRICTION.powf(frames);
        for p in &mut self.particles {
            p.position += p.velocity * frames;
            let spin = if p.velocity.x > 0.0 { SPIN_DEG } else { -SPIN_DEG };
            p.rotation_deg += spin * frames;
            p.velocity = Vec2::new(p.velocity.x * decay, p.velocity.y * decay - LIFT * frames);
            p.age_s += dt;
        }
        self.particles.retain(|p| p.age_s < p.lifetime_s);
    }
}

fn pick(u: f64, len: usize) -> usize {
    ((u * len as f64) as usize).min(len - 1)
}

pub struct CursorTrail {
    state: Option<Rc<RefCell<TrailState>>>,
    _subs: Vec<Subscription>,
}

impl CursorTrail {
    pub fn mount(ctx: &InputContext, motion: MotionPreference, seed: u64) -> Self {
        if motion.is_reduced() {
            return Self {
                state: None,
                _subs: Vec::new(),
            };
        }

        let state = Rc::new(RefCell::new(TrailState {
            rng: Rng64::new(seed),
            now_s: 0.0,
            next_id: 0,
            last: None,
            moves: 0,
            pending: Vec::new(),
            particles: Vec::with_capacity(TRAIL_CAPACITY),
        }));

        let s = Rc::clone(&state);
        let on_move = ctx.subscribe(EventKind::PointerMove, move |ev| {
            if let InputEvent::PointerMove { x, y, t_ms } = *ev {
                s.borrow_mut().on_move(Point::new(x, y), t_ms);
            }
        });
        let s = Rc::clone(&state);
        let on_click = ctx.subscribe(EventKind::Click, move |ev| {
            if let InputEvent::Click { x, y } = *ev {
                s.borrow_mut().on_click(Point::new(x, y));
            }
        });

        Self {
            state: Some(state),
            _subs: vec![on_move, on_click],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    /// Advance physics by `dt` seconds and release due burst particles.
    pub fn tick(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        if let Some(s) = &self.state {
            s.borrow_mut().advance(dt);
        }
    }

    pub fn particles(&self) -> Vec<TrailParticle> {
        self.state
            .as_ref()
            .map(|s| s.borrow().particles.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/trail.rs"]
mod tests;
