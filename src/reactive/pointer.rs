use std::{cell::Cell, rc::Rc};

use crate::{
    animation::spring::{Spring, Spring2},
    foundation::core::Point,
    input::context::{EventKind, InputContext, InputEvent, Subscription},
};

/// Raw pointer plus both smoothed followers after one tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PointerState {
    pub raw: Point,
    pub primary: Point,
    pub ambient: Point,
}

/// Latest pointer sample shared with an input listener. Newer samples overwrite older ones.
#[derive(Clone, Debug, Default)]
pub(crate) struct LatestPointer(Rc<Cell<Option<Point>>>);

impl LatestPointer {
    pub(crate) fn listen(&self, ctx: &InputContext) -> Subscription {
        let slot = Rc::clone(&self.0);
        ctx.subscribe(EventKind::PointerMove, move |ev| {
            if let InputEvent::PointerMove { x, y, .. } = *ev
                && x.is_finite()
                && y.is_finite()
            {
                slot.set(Some(Point::new(x, y)));
            }
        })
    }

    pub(crate) fn get(&self) -> Option<Point> {
        self.0.get()
    }
}

/// Fast primary and slow ambient springs chasing the pointer.
pub struct PointerTracker {
    latest: LatestPointer,
    raw: Point,
    primary: Spring2,
    ambient: Spring2,
    _sub: Subscription,
}

impl PointerTracker {
    pub fn mount(ctx: &InputContext, start: Point) -> Self {
        Self::with_springs(ctx, start, Spring::LANTERN, Spring::AMBIENT)
    }

    pub fn with_springs(
        ctx: &InputContext,
        start: Point,
        primary: Spring,
        ambient: Spring,
    ) -> Self {
        let latest = LatestPointer::default();
        let sub = latest.listen(ctx);
        Self {
            latest,
            raw: start,
            primary: Spring2::new(primary, start),
            ambient: Spring2::new(ambient, start),
            _sub: sub,
        }
    }

    pub fn tick(&mut self, dt: f64) -> PointerState {
        if let Some(p) = self.latest.get() {
            self.raw = p;
            self.primary.set_target(p);
            self.ambient.set_target(p);
        }
        PointerState {
            raw: self.raw,
            primary: self.primary.tick(dt),
            ambient: self.ambient.tick(dt),
        }
    }

    pub fn state(&self) -> PointerState {
        PointerState {
            raw: self.raw,
            primary: self.primary.position(),
            ambient: self.ambient.position(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/pointer.rs"]
mod tests;
