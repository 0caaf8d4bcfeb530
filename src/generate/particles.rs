use std::collections::{BTreeMap, HashSet};

use crate::{
    animation::keyframes::{Keyframes, Timeline},
    composition::model::{ParticleSpec, ShapeKind},
    foundation::core::{Color, Transform2D, Vec2},
    foundation::error::{BackdropError, BackdropResult},
    foundation::rng::{Rng64, unit_hash},
};

/// Source of uniform values in `[0, 1)` for particle generation.
///
/// `index` is the particle index and `channel` names the attribute being drawn, so that a
/// pure source can give every attribute an independent value.
pub trait RandomSource {
    fn unit(&mut self, index: u64, channel: u64) -> f64;
}

/// Pure function of `(seed, index, channel)`; order of draws does not matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededIndex {
    pub seed: u64,
}

impl SeededIndex {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RandomSource for SeededIndex {
    fn unit(&mut self, index: u64, channel: u64) -> f64 {
        unit_hash(self.seed, index, channel)
    }
}

/// Streaming source; draws depend on call order.
impl RandomSource for Rng64 {
    fn unit(&mut self, _index: u64, _channel: u64) -> f64 {
        self.next_f64_01()
    }
}

const CH_LEFT: u64 = 0;
const CH_TOP: u64 = 1;
const CH_SIZE: u64 = 2;
const CH_COLOR: u64 = 3;
const CH_SHAPE: u64 = 4;
const CH_ANIMATION: u64 = 5;
const CH_DURATION: u64 = 6;
const CH_DELAY: u64 = 7;
const CH_OPACITY: u64 = 8;
const CH_RESAMPLE: u64 = 16;

/// Position resamples tried before probing for a free grid cell.
const RESAMPLE_ATTEMPTS: u64 = 8;
/// Cells per axis of the integer percent grid.
const GRID: i32 = 101;

/// Closed numeric range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn at(self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// What a generated field may draw from.
pub struct Palette {
    pub colors: Vec<Color>,
    pub shapes: Vec<ShapeKind>,
    /// Timeline names.
    pub animations: Vec<String>,
    pub size_px: Span,
    pub duration_s: Span,
    /// Phase offsets; keep them negative to start mid-cycle.
    pub delay_s: Span,
    pub opacity: Span,
}

impl Palette {
    pub fn validate(&self) -> BackdropResult<()> {
        if self.colors.is_empty() || self.shapes.is_empty() || self.animations.is_empty() {
            return Err(BackdropError::validation(
                "palette needs at least one color, shape and animation",
            ));
        }
        for (name, span) in [
            ("size_px", self.size_px),
            ("duration_s", self.duration_s),
            ("delay_s", self.delay_s),
            ("opacity", self.opacity),
        ] {
            if !span.is_valid() {
                return Err(BackdropError::validation(format!(
                    "palette {name} must be a finite range with min <= max"
                )));
            }
        }
        if self.size_px.min <= 0.0 || self.duration_s.min <= 0.0 {
            return Err(BackdropError::validation(
                "palette sizes and durations must be > 0",
            ));
        }
        if self.opacity.min <= 0.0 || self.opacity.max > 1.0 {
            return Err(BackdropError::validation(
                "palette opacity must lie within (0, 1]",
            ));
        }
        Ok(())
    }
}

fn pick<T: Clone>(items: &[T], t: f64) -> T {
    let i = ((t * items.len() as f64) as usize).min(items.len() - 1);
    items[i].clone()
}

/// Integer percent cells already taken by a field.
#[derive(Debug, Default)]
struct GridClaims {
    taken: HashSet<(i32, i32)>,
}

impl GridClaims {
    fn cell(left: f64, top: f64) -> (i32, i32) {
        (
            left.round().clamp(0.0, 100.0) as i32,
            top.round().clamp(0.0, 100.0) as i32,
        )
    }

    /// Claim a cell near `(left, top)`: resample first, then walk the grid.
    fn place(
        &mut self,
        index: u64,
        left: f64,
        top: f64,
        src: &mut impl RandomSource,
    ) -> (f64, f64) {
        let cell = Self::cell(left, top);
        if self.taken.insert(cell) {
            return (left, top);
        }
        for k in 0..RESAMPLE_ATTEMPTS {
            let l = src.unit(index, CH_RESAMPLE + 2 * k) * 100.0;
            let t = src.unit(index, CH_RESAMPLE + 2 * k + 1) * 100.0;
            if self.taken.insert(Self::cell(l, t)) {
                return (l, t);
            }
        }
        let start = cell.1 * GRID + cell.0;
        for step in 1..(GRID * GRID) {
            let idx = (start + step) % (GRID * GRID);
            let c = (idx % GRID, idx / GRID);
            if self.taken.insert(c) {
                return (f64::from(c.0), f64::from(c.1));
            }
        }
        // Unreachable while callers respect the grid capacity.
        (left, top)
    }
}

fn check_capacity(count: usize) -> BackdropResult<()> {
    if count > (GRID * GRID) as usize {
        return Err(BackdropError::validation(format!(
            "cannot place {count} particles on a {GRID}x{GRID} grid"
        )));
    }
    Ok(())
}

fn sample_particle(
    id: String,
    index: u64,
    palette: &Palette,
    src: &mut impl RandomSource,
) -> ParticleSpec {
    ParticleSpec {
        id,
        left_pct: src.unit(index, CH_LEFT) * 100.0,
        top_pct: src.unit(index, CH_TOP) * 100.0,
        size_px: palette.size_px.at(src.unit(index, CH_SIZE)),
        color: pick(&palette.colors, src.unit(index, CH_COLOR)),
        shape: pick(&palette.shapes, src.unit(index, CH_SHAPE)),
        animation: pick(&palette.animations, src.unit(index, CH_ANIMATION)),
        duration_s: palette.duration_s.at(src.unit(index, CH_DURATION)),
        delay_s: palette.delay_s.at(src.unit(index, CH_DELAY)),
        opacity: palette.opacity.at(src.unit(index, CH_OPACITY)),
    }
}

/// Generate `count` particles from `palette`, ids `{prefix}-{i}`.
///
/// Equal inputs give equal output. No two particles share a cell of the integer percent
/// grid.
pub fn generate_particles(
    count: usize,
    palette: &Palette,
    src: &mut impl RandomSource,
    prefix: &str,
) -> BackdropResult<Vec<ParticleSpec>> {
    palette.validate()?;
    check_capacity(count)?;

    let mut grid = GridClaims::default();
    let mut out = Vec::with_capacity(count);
    for i in 0..count as u64 {
        let mut p = sample_particle(format!("{prefix}-{i}"), i, palette, src);
        (p.left_pct, p.top_pct) = grid.place(i, p.left_pct, p.top_pct, src);
        out.push(p);
    }

    tracing::debug!(count = out.len(), prefix, "generated particles");
    Ok(out)
}

/// Size class of a sparkle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SparkleCategory {
    Micro,
    Small,
    Medium,
    Large,
    Statement,
}

impl SparkleCategory {
    /// 20% micro, 35% small, 25% medium, 15% large, 5% statement, cycled by index.
    const CYCLE: [Self; 20] = [
        Self::Micro,
        Self::Micro,
        Self::Micro,
        Self::Micro,
        Self::Small,
        Self::Small,
        Self::Small,
        Self::Small,
        Self::Small,
        Self::Small,
        Self::Small,
        Self::Medium,
        Self::Medium,
        Self::Medium,
        Self::Medium,
        Self::Medium,
        Self::Large,
        Self::Large,
        Self::Large,
        Self::Statement,
    ];

    pub fn for_index(i: usize) -> Self {
        Self::CYCLE[i % Self::CYCLE.len()]
    }

    pub fn size_px(self) -> Span {
        match self {
            Self::Micro => Span::new(3.0, 6.0),
            Self::Small => Span::new(6.0, 10.0),
            Self::Medium => Span::new(10.0, 16.0),
            Self::Large => Span::new(16.0, 24.0),
            Self::Statement => Span::new(24.0, 36.0),
        }
    }

    fn base_duration_s(self) -> f64 {
        match self {
            Self::Statement => 8.0,
            Self::Large => 6.0,
            _ => 3.0,
        }
    }

    fn base_opacity(self) -> f64 {
        match self {
            Self::Micro => 0.5,
            Self::Statement => 0.9,
            _ => 0.7,
        }
    }
}

/// Sparkle count of the dreamscape field.
pub const SPARKLE_COUNT: usize = 36;
/// Sparkle sizes never leave this range.
pub const SPARKLE_SIZE_PX: Span = Span::new(3.0, 36.0);

const SPARKLE_SHAPES: [ShapeKind; 11] = [
    ShapeKind::Star,
    ShapeKind::Star,
    ShapeKind::Star,
    ShapeKind::Star,
    ShapeKind::Sparkle,
    ShapeKind::Sparkle,
    ShapeKind::Sparkle,
    ShapeKind::Heart,
    ShapeKind::Heart,
    ShapeKind::Diamond,
    ShapeKind::Starburst,
];

const SPARKLE_COLORS: [Color; 10] = [
    Color::rgba(255, 255, 255, 0.95),
    Color::rgba(255, 255, 255, 0.9),
    Color::rgba(251, 207, 232, 0.92),
    Color::rgba(252, 231, 243, 0.9),
    Color::rgba(221, 214, 254, 0.9),
    Color::rgba(196, 181, 253, 0.88),
    Color::rgba(167, 139, 250, 0.85),
    Color::rgba(139, 92, 246, 0.82),
    Color::rgba(56, 189, 248, 0.88),
    Color::rgba(147, 197, 253, 0.85),
];

pub const SPARKLE_ANIMATIONS: [&str; 5] = [
    "sparkle-twinkle",
    "sparkle-pulse",
    "star-spin",
    "sparkle-float-up",
    "sparkle-shimmer",
];

/// The sparkle field: shape, size class and animation cycle by index, position and color
/// come from `src`.
///
/// Every fifth sparkle is pushed toward the left or right edge and every seventh toward
/// the top or bottom, which gives the field depth at the corners.
pub fn sparkle_field(
    count: usize,
    src: &mut impl RandomSource,
) -> BackdropResult<Vec<ParticleSpec>> {
    check_capacity(count)?;
    let mut grid = GridClaims::default();
    let mut out = Vec::with_capacity(count);

    for i in 0..count {
        let idx = i as u64;
        let r1 = src.unit(idx, CH_LEFT);
        let r2 = src.unit(idx, CH_TOP);
        let r3 = src.unit(idx, CH_COLOR);

        let mut left = r1 * 100.0;
        let mut top = r2 * 100.0;
        if i % 5 == 0 {
            left = if r1 < 0.5 { r1 * 30.0 } else { 70.0 + r1 * 30.0 };
        }
        if i % 7 == 0 {
            top = if r2 < 0.5 { r2 * 25.0 } else { 75.0 + r2 * 25.0 };
        }
        let (left, top) = grid.place(idx, left.min(100.0), top.min(100.0), src);

        let shape = SPARKLE_SHAPES[i % SPARKLE_SHAPES.len()];
        let category = SparkleCategory::for_index(i);
        let mut size = category.size_px().at(r1);
        match shape {
            ShapeKind::Heart => size *= 0.8,
            ShapeKind::Starburst => size *= 1.2,
            _ => {}
        }

        out.push(ParticleSpec {
            id: format!("sparkle-{i}"),
            left_pct: left,
            top_pct: top,
            size_px: size.clamp(SPARKLE_SIZE_PX.min, SPARKLE_SIZE_PX.max),
            color: pick(&SPARKLE_COLORS, r3),
            shape,
            animation: SPARKLE_ANIMATIONS[i % SPARKLE_ANIMATIONS.len()].to_string(),
            duration_s: category.base_duration_s() + r2 * 3.0,
            delay_s: -(r1 * 10.0),
            opacity: (category.base_opacity() + r3 * 0.2).min(1.0),
        });
    }

    tracing::debug!(count = out.len(), "generated sparkle field");
    Ok(out)
}

/// Timelines used by [`sparkle_field`].
pub fn sparkle_timelines() -> BTreeMap<String, Timeline> {
    let s = Transform2D::scale;
    let mut out = BTreeMap::new();
    out.insert(
        "sparkle-twinkle".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([s(0.8), s(1.2), s(0.8)]),
            Keyframes::evenly([0.3, 1.0, 0.3]),
        ),
    );
    out.insert(
        "sparkle-pulse".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([s(1.0), s(1.3), s(1.0)]),
            Keyframes::evenly([0.6, 1.0, 0.6]),
        ),
    );
    out.insert(
        "star-spin".to_string(),
        Timeline::transform(Keyframes::evenly([
            Transform2D::rotate(0.0),
            Transform2D::rotate(180.0),
            Transform2D::rotate(360.0),
        ])),
    );
    out.insert(
        "sparkle-float-up".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                Transform2D::translate(0.0, 0.0),
                Transform2D::translate(0.0, -20.0),
                Transform2D::translate(0.0, 0.0),
            ]),
            Keyframes::evenly([0.5, 1.0, 0.5]),
        ),
    );
    out.insert(
        "sparkle-shimmer".to_string(),
        Timeline::opacity(Keyframes::evenly([0.4, 1.0, 0.6, 1.0, 0.4])),
    );
    out
}

/// Per-shape look of the floating particle field.
struct ParticleStyle {
    shape: ShapeKind,
    colors: &'static [Color],
    size_px: Span,
    base_duration_s: f64,
    animation: &'static str,
}

const PARTICLE_STYLES: [ParticleStyle; 4] = [
    ParticleStyle {
        shape: ShapeKind::Heart,
        colors: &[
            Color::hex(0xff69b4),
            Color::hex(0xff6b9d),
            Color::hex(0xec4899),
            Color::hex(0xf472b6),
        ],
        size_px: Span::new(10.0, 20.0),
        base_duration_s: 6.0,
        animation: "particle-heart",
    },
    ParticleStyle {
        shape: ShapeKind::Sparkle,
        colors: &[
            Color::hex(0xffffff),
            Color::hex(0xfef3c7),
            Color::hex(0xddd6fe),
            Color::hex(0xc4b5fd),
        ],
        size_px: Span::new(6.0, 14.0),
        base_duration_s: 3.0,
        animation: "particle-sparkle",
    },
    ParticleStyle {
        shape: ShapeKind::Star,
        colors: &[
            Color::hex(0xffffff),
            Color::hex(0xfef3c7),
            Color::hex(0xfbcfe8),
            Color::hex(0xddd6fe),
        ],
        size_px: Span::new(6.0, 14.0),
        base_duration_s: 4.0,
        animation: "particle-star",
    },
    ParticleStyle {
        shape: ShapeKind::Circle,
        colors: &[
            Color::rgba(255, 255, 255, 0.6),
            Color::rgba(196, 181, 253, 0.5),
            Color::rgba(251, 207, 232, 0.5),
        ],
        size_px: Span::new(6.0, 14.0),
        base_duration_s: 5.0,
        animation: "particle-circle",
    },
];

/// Default size of the floating particle field.
pub const PARTICLE_COUNT: usize = 25;

/// Floating hearts, stars, sparkles and circles.
pub fn particle_field(
    count: usize,
    src: &mut impl RandomSource,
) -> BackdropResult<Vec<ParticleSpec>> {
    check_capacity(count)?;
    let mut grid = GridClaims::default();
    let mut out = Vec::with_capacity(count);

    for i in 0..count {
        let idx = i as u64;
        let style = &PARTICLE_STYLES[((src.unit(idx, CH_SHAPE) * PARTICLE_STYLES.len() as f64)
            as usize)
            .min(PARTICLE_STYLES.len() - 1)];
        let palette = Palette {
            colors: style.colors.to_vec(),
            shapes: vec![style.shape],
            animations: vec![style.animation.to_string()],
            size_px: style.size_px,
            duration_s: Span::new(style.base_duration_s, style.base_duration_s + 2.0),
            delay_s: Span::new(-5.0, 0.0),
            opacity: Span::new(0.85, 1.0),
        };
        let mut p = sample_particle(format!("particle-{i}"), idx, &palette, src);
        (p.left_pct, p.top_pct) = grid.place(idx, p.left_pct, p.top_pct, src);
        out.push(p);
    }

    tracing::debug!(count = out.len(), "generated particle field");
    Ok(out)
}

/// Timelines used by [`particle_field`].
pub fn particle_timelines() -> BTreeMap<String, Timeline> {
    let t = |x: f64, y: f64, rot: f64, scale: f64| Transform2D {
        translate: Vec2::new(x, y),
        rotate_deg: rot,
        scale: Vec2::new(scale, scale),
    };
    let mut out = BTreeMap::new();
    out.insert(
        "particle-heart".to_string(),
        Timeline::transform(Keyframes::evenly([
            t(0.0, 0.0, -5.0, 1.0),
            t(10.0, -30.0, 5.0, 1.1),
            t(-5.0, -10.0, 0.0, 0.95),
            t(0.0, 0.0, -5.0, 1.0),
        ])),
    );
    out.insert(
        "particle-sparkle".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                t(0.0, 0.0, 0.0, 0.8),
                t(0.0, 0.0, 180.0, 1.3),
                t(0.0, 0.0, 360.0, 0.8),
            ]),
            Keyframes::evenly([0.4, 1.0, 0.4]),
        ),
    );
    out.insert(
        "particle-star".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                t(0.0, 0.0, 0.0, 0.9),
                t(0.0, 0.0, 15.0, 1.15),
                t(0.0, 0.0, 0.0, 0.9),
            ]),
            Keyframes::evenly([0.5, 1.0, 0.5]),
        ),
    );
    out.insert(
        "particle-circle".to_string(),
        Timeline::transform_opacity(
            Keyframes::evenly([
                t(0.0, 0.0, 0.0, 1.0),
                t(0.0, -15.0, 0.0, 1.2),
                t(0.0, 0.0, 0.0, 1.0),
            ]),
            Keyframes::evenly([0.3, 0.7, 0.3]),
        ),
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/generate/particles.rs"]
mod tests;
