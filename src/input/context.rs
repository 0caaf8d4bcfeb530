//! Injected input plumbing.
//!
//! The host page owns the real event sources and forwards them as [`InputEvent`]s into an
//! [`InputContext`]. Consumers subscribe on mount and hold the returned [`Subscription`];
//! dropping it unregisters the listener. Tests drive the same context with a scripted
//! stream.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Listener registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
    Orientation,
    Scroll,
    Click,
}

/// One event forwarded from the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InputEvent {
    /// Pointer position in viewport pixels at host time `t_ms`.
    PointerMove { x: f64, y: f64, t_ms: f64 },
    /// The pointer left the document.
    PointerLeave,
    /// Device tilt in degrees; either angle may be unavailable.
    Orientation {
        beta: Option<f64>,
        gamma: Option<f64>,
    },
    /// Document scroll: progress in `[0, 1]` and speed in pixels per frame.
    Scroll { progress: f64, velocity: f64 },
    Click { x: f64, y: f64 },
}

impl InputEvent {
    pub fn pointer(x: f64, y: f64, t_ms: f64) -> Self {
        Self::PointerMove { x, y, t_ms }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::Click { x, y }
    }

    pub fn scroll(progress: f64, velocity: f64) -> Self {
        Self::Scroll { progress, velocity }
    }

    pub fn orientation(beta: f64, gamma: f64) -> Self {
        Self::Orientation {
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Orientation { .. } => EventKind::Orientation,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Click { .. } => EventKind::Click,
        }
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut(&InputEvent)>>>;

struct Entry {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared, single-threaded event hub. Cloning is cheap and shares the registry.
#[derive(Clone, Default)]
pub struct InputContext {
    inner: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for InputContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputContext")
            .field("listeners", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` for events of `kind`. The listener lives as long as the guard.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(
        &self,
        kind: EventKind,
        f: impl FnMut(&InputEvent) + 'static,
    ) -> Subscription {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push(Entry {
            id,
            kind,
            listener: Rc::new(RefCell::new(Box::new(f))),
        });
        Subscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every listener of its kind, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being called. A listener that
    /// re-enters `dispatch` does not receive the nested event.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.listener))
            .collect();

        let mut delivered = 0;
        for l in targets {
            match l.try_borrow_mut() {
                Ok(mut f) => {
                    f(event);
                    delivered += 1;
                }
                Err(_) => tracing::warn!(?kind, "skipped re-entrant input listener"),
            }
        }
        delivered
    }

    /// Replay a scripted stream.
    pub fn dispatch_all(&self, events: impl IntoIterator<Item = InputEvent>) {
        for e in events {
            self.dispatch(&e);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Guard for a registered listener.
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(reg) = self.registry.upgrade() else {
            return;
        };
        // The listener itself may be running; only the registry entry is removed here.
        if let Ok(mut reg) = reg.try_borrow_mut() {
            reg.entries.retain(|e| e.id != self.id);
        } else {
            tracing::warn!(id = self.id, "input registry busy; listener not removed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/context.rs"]
mod tests;
