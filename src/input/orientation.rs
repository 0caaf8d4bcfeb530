//! Device tilt as a smoothed, normalized signal.

use std::{cell::Cell, rc::Rc};

use crate::{
    animation::spring::low_pass,
    input::context::{EventKind, InputContext, InputEvent, Subscription},
};

/// Low-pass factor applied to each raw sample.
pub const TILT_SMOOTHING: f64 = 0.15;
/// Resting forward tilt of a hand-held device.
const BETA_REST_DEG: f64 = 45.0;
const BETA_RANGE_DEG: f64 = 45.0;
const GAMMA_RANGE_DEG: f64 = 30.0;

/// Outcome of asking the host for motion-sensor access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PermissionError {
    Denied,
    Failed(String),
}

/// Host capability gate for orientation events.
pub trait OrientationPermission {
    fn request(&mut self) -> Result<(), PermissionError>;
}

/// Platforms that deliver orientation events without asking.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysGranted;

impl OrientationPermission for AlwaysGranted {
    fn request(&mut self) -> Result<(), PermissionError> {
        Ok(())
    }
}

/// Normalized tilt: both axes in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Tilt {
    pub beta: f64,
    pub gamma: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct Smoothed {
    beta: f64,
    gamma: f64,
}

/// Smoothed device orientation. Stays inert when permission is refused.
pub struct OrientationTracker {
    state: Rc<Cell<Smoothed>>,
    sub: Option<Subscription>,
}

impl OrientationTracker {
    pub fn mount(ctx: &InputContext, permission: &mut impl OrientationPermission) -> Self {
        let state: Rc<Cell<Smoothed>> = Rc::new(Cell::new(Smoothed {
            beta: BETA_REST_DEG,
            gamma: 0.0,
        }));

        let sub = match permission.request() {
            Ok(()) => {
                let s = Rc::clone(&state);
                Some(ctx.subscribe(EventKind::Orientation, move |ev| {
                    if let InputEvent::Orientation { beta, gamma } = *ev {
                        let prev = s.get();
                        s.set(Smoothed {
                            beta: smooth_axis(prev.beta, beta),
                            gamma: smooth_axis(prev.gamma, gamma),
                        });
                    }
                }))
            }
            Err(err) => {
                tracing::warn!(?err, "orientation permission unavailable; tilt disabled");
                None
            }
        };

        Self { state, sub }
    }

    pub fn is_active(&self) -> bool {
        self.sub.is_some()
    }

    pub fn tilt(&self) -> Tilt {
        if !self.is_active() {
            return Tilt::default();
        }
        let s = self.state.get();
        Tilt {
            beta: ((s.beta - BETA_REST_DEG) / BETA_RANGE_DEG).clamp(-1.0, 1.0),
            gamma: (s.gamma / GAMMA_RANGE_DEG).clamp(-1.0, 1.0),
        }
    }
}

/// Missing angles read as zero; non-finite readings are dropped.
fn smooth_axis(prev: f64, sample: Option<f64>) -> f64 {
    match sample.unwrap_or(0.0) {
        v if v.is_finite() => low_pass(prev, v, TILT_SMOOTHING),
        _ => prev,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/orientation.rs"]
mod tests;
