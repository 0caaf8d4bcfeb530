//! Backdrop builds layered decorative page backgrounds.
//!
//! A [`Scene`] stacks gradient layers, generated particle fields and a pointer-following
//! lantern. Compiling it against an [`AnimationPolicy`] yields a [`RenderPlan`] in which every
//! animated property is `transform` or `opacity`; the plan renders to CSS and HTML and can
//! be sampled at any time for tests and previews.
//!
//! - Describe a scene with [`SceneBuilder`], or start from [`dreamscape`]
//! - Compile with [`compile_scene`]
//! - Emit [`render_css`] and [`render_html`], or sample with [`Evaluator::eval_at`]
//!
//! Pointer-reactive pieces ([`Lantern`], [`EyeTracker`], [`CursorTrail`]...) consume
//! [`InputEvent`]s from an injected [`InputContext`] and tear their listeners down on drop.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod compile;
pub(crate) mod composition;
pub(crate) mod eval;
pub(crate) mod generate;
pub(crate) mod input;
pub(crate) mod policy;
pub(crate) mod reactive;
pub(crate) mod render;

pub use crate::foundation::core::{Anchor, Color, Length, Placement, Point, Transform2D, Vec2};
pub use crate::foundation::error::{BackdropError, BackdropResult};
pub use crate::foundation::rng::Rng64;

pub use crate::animation::binding::{AnimationBinding, Direction, Repeat};
pub use crate::animation::ease::Ease;
pub use crate::animation::keyframes::{
    AnimatedProperty, Channel, ChannelSample, Keyframe, Keyframes, Lerp, Timeline,
};
pub use crate::animation::spring::{Regime, Spring, Spring2, SpringState, low_pass};

pub use crate::composition::dsl::SceneBuilder;
pub use crate::composition::model::{
    BlendMode, Fill, GradientStop, GroupSpec, LanternSpec, LayerSpec, ParticleField,
    ParticleSpec, RadialShape, Scene, SceneLayer, Shadow, ShapeKind,
};
pub use crate::composition::presets::dreamscape;

pub use crate::policy::rules::{AnimationPolicy, BlurMode, PolicyReport, Violation};
pub use crate::policy::soften::{GlowPair, SOFTEN_STEPS, compensate_blur, glow_pair};

pub use crate::generate::bokeh::{BOKEH_COUNT, bokeh_field, bokeh_timelines};
pub use crate::generate::clouds::{CLOUD_COUNT, cloud_field, cloud_timelines};
pub use crate::generate::particles::{
    PARTICLE_COUNT, Palette, RandomSource, SPARKLE_COUNT, SPARKLE_SIZE_PX, SeededIndex, Span,
    SparkleCategory, generate_particles, particle_field, particle_timelines, sparkle_field,
    sparkle_timelines,
};

pub use crate::compile::fingerprint::{PlanFingerprint, fingerprint_plan};
pub use crate::compile::plan::{
    CompileOptions, Follower, MotionPreference, NodeKind, PlannedLayer, RenderPlan, compile_scene,
};
pub use crate::eval::evaluator::{Evaluator, FrameSample, LayerState};
pub use crate::render::css::{ROOT_CLASS, layer_class, noise_data_uri, render_css};
pub use crate::render::html::render_html;

pub use crate::input::context::{EventKind, InputContext, InputEvent, Subscription};
pub use crate::input::orientation::{
    AlwaysGranted, OrientationPermission, OrientationTracker, PermissionError, Tilt,
};
pub use crate::reactive::eyes::{EyeConfig, EyeFrame, EyeTracker, pupil_offset};
pub use crate::reactive::lantern::{Lantern, LanternFrame, glow_intensity};
pub use crate::reactive::magnetic::{MagneticConfig, MagneticOffset};
pub use crate::reactive::parallax::{
    ParallaxDepth, ParallaxFrame, ScrollParallax, TILT_MAX_OFFSET_PX,
};
pub use crate::reactive::pointer::{PointerState, PointerTracker};
pub use crate::reactive::trail::{CursorTrail, TRAIL_CAPACITY, TrailParticle};

pub use crate::audio::engine::{
    AudioBackend, AudioEngine, CLICK_NOTE, Cue, DRONE_NOTE, HOVER_NOTES, Note, NoteLength,
    SUCCESS_CHORD, Wind,
};
