use crate::{
    animation::ease::Ease,
    foundation::core::css_num,
    foundation::error::{BackdropError, BackdropResult},
};

/// How many cycles a binding runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// Loop forever.
    #[default]
    Infinite,
    /// Run a fixed number of cycles, then hold the final frame.
    Count(u32),
}

/// Playback direction across cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Every cycle runs 0 -> 1.
    #[default]
    Normal,
    /// Odd cycles run 1 -> 0.
    Alternate,
}

fn default_ease() -> Ease {
    Ease::EaseInOut
}

/// Attaches a named timeline to a layer, particle or group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationBinding {
    /// Name of the timeline in the scene's keyframes table.
    pub name: String,
    /// Length of one cycle in seconds.
    pub duration_s: f64,
    /// Start offset in seconds. Negative values start mid-cycle.
    #[serde(default)]
    pub delay_s: f64,
    /// Default per-segment ease.
    #[serde(default = "default_ease")]
    pub ease: Ease,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub direction: Direction,
}

impl AnimationBinding {
    /// Infinite, normal-direction binding with the default ease.
    pub fn new(name: impl Into<String>, duration_s: f64) -> Self {
        Self {
            name: name.into(),
            duration_s,
            delay_s: 0.0,
            ease: default_ease(),
            repeat: Repeat::Infinite,
            direction: Direction::Normal,
        }
    }

    pub fn delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn alternate(mut self) -> Self {
        self.direction = Direction::Alternate;
        self
    }

    pub fn validate(&self) -> BackdropResult<()> {
        if self.name.trim().is_empty() {
            return Err(BackdropError::animation("animation name must be non-empty"));
        }
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(BackdropError::animation(format!(
                "animation '{}' duration must be finite and > 0",
                self.name
            )));
        }
        if !self.delay_s.is_finite() {
            return Err(BackdropError::animation(format!(
                "animation '{}' delay must be finite",
                self.name
            )));
        }
        if matches!(self.repeat, Repeat::Count(0)) {
            return Err(BackdropError::animation(format!(
                "animation '{}' repeat count must be > 0",
                self.name
            )));
        }
        if !self.ease.is_valid() {
            return Err(BackdropError::animation(format!(
                "animation '{}' ease is invalid",
                self.name
            )));
        }
        Ok(())
    }

    /// Cycle progress in `[0, 1]` at page time `t_s`, with CSS `fill-mode: both` semantics.
    pub fn progress_at(&self, t_s: f64) -> f64 {
        let elapsed = t_s - self.delay_s;
        if elapsed <= 0.0 || self.duration_s <= 0.0 {
            return 0.0;
        }

        let cycles = elapsed / self.duration_s;
        let (iteration, frac) = match self.repeat {
            Repeat::Count(n) if cycles >= f64::from(n) => (u64::from(n.max(1)) - 1, 1.0),
            _ => (cycles.floor() as u64, cycles.fract()),
        };

        match self.direction {
            Direction::Alternate if iteration % 2 == 1 => 1.0 - frac,
            _ => frac,
        }
    }

    /// CSS `animation` shorthand value.
    pub fn to_css(&self) -> String {
        let count = match self.repeat {
            Repeat::Infinite => "infinite".to_string(),
            Repeat::Count(n) => n.to_string(),
        };
        let direction = match self.direction {
            Direction::Normal => "normal",
            Direction::Alternate => "alternate",
        };
        format!(
            "{} {}s {} {}s {} {} both",
            self.name,
            css_num(self.duration_s),
            self.ease.to_css(),
            css_num(self.delay_s),
            count,
            direction
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/binding.rs"]
mod tests;
