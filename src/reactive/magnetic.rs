use std::{cell::Cell, rc::Rc};

use crate::{
    animation::spring::{Spring, Spring2},
    foundation::core::{Point, Vec2},
    input::context::{EventKind, InputContext, InputEvent, Subscription},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticConfig {
    /// Fraction of the pointer offset the element follows.
    pub strength: f64,
    /// Pointer distance from the center that engages the pull.
    pub radius_px: f64,
    pub spring: Spring,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            radius_px: 100.0,
            spring: Spring {
                stiffness: 300.0,
                damping: 20.0,
                mass: 1.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Pull {
    target: Vec2,
    engaged: bool,
}

/// Element nudged toward a nearby pointer.
pub struct MagneticOffset {
    pull: Rc<Cell<Pull>>,
    center: Rc<Cell<Point>>,
    spring: Spring2,
    _subs: [Subscription; 2],
}

impl MagneticOffset {
    pub fn mount(ctx: &InputContext, center: Point, config: MagneticConfig) -> Self {
        let pull: Rc<Cell<Pull>> = Rc::default();
        let center = Rc::new(Cell::new(center));

        let (p, c) = (Rc::clone(&pull), Rc::clone(&center));
        let on_move = ctx.subscribe(EventKind::PointerMove, move |ev| {
            let InputEvent::PointerMove { x, y, .. } = *ev else {
                return;
            };
            if !(x.is_finite() && y.is_finite()) {
                return;
            }
            let d = Point::new(x, y) - c.get();
            if d.hypot() < config.radius_px {
                p.set(Pull {
                    target: d * config.strength,
                    engaged: true,
                });
            } else if p.get().engaged {
                p.set(Pull::default());
            }
        });
        let p = Rc::clone(&pull);
        let on_leave = ctx.subscribe(EventKind::PointerLeave, move |_| p.set(Pull::default()));

        Self {
            pull,
            center,
            spring: Spring2::new(config.spring, Point::ORIGIN),
            _subs: [on_move, on_leave],
        }
    }

    /// Update the element center after layout changes.
    pub fn set_center(&self, center: Point) {
        self.center.set(center);
    }

    pub fn is_engaged(&self) -> bool {
        self.pull.get().engaged
    }

    /// Advance the spring; the result is the element's translate.
    pub fn tick(&mut self, dt: f64) -> Vec2 {
        self.spring.set_target(self.pull.get().target.to_point());
        self.spring.tick(dt).to_vec2()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/magnetic.rs"]
mod tests;
