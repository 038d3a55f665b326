//! Keyreel turns keyframed shapes into rendered animation.
//!
//! - Describe motion as keyframe states with per-segment durations and eases ([`Animated`])
//! - Compose time segments with the [`Scene`] algebra: concatenation, freeze, reverse
//! - Build timelines step by step with a [`Playbook`]
//! - Render a scene into a [`FrameSink`] (GIF, `ffmpeg` video, or memory) with the
//!   `vello_cpu`-backed [`CpuRenderer`]
#![forbid(unsafe_code)]

mod foundation;

/// Keyframe interpolation.
pub mod animation;
/// Visual objects.
pub mod drawable;
/// Frame sinks.
pub mod encode;
/// Display lists and rasterization.
pub mod render;
/// Scene algebra, frame loop and playbook.
pub mod scene;
/// JSON reel scripts.
pub mod script;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::{Ease, EaseFn};
pub use crate::animation::frozen::Frozen;
pub use crate::animation::keyframes::{Animated, PerSegment};
pub use crate::animation::tween::{Tween, tween};
pub use crate::drawable::{
    Cropped, Drawable, DrawableExt, DrawableRef, Ellipse, Group, Rectangle, TimeCursor,
    timeline_duration,
};
pub use crate::encode::{
    EncodeOpts, FfmpegSink, FfmpegSinkOpts, FrameSink, GifSink, InMemorySink, SinkConfig,
    sink_for_path,
};
pub use crate::render::{CpuRenderer, DisplayList, DrawOp, FrameRGBA, RenderSettings, Renderer};
pub use crate::scene::{
    Playbook, RenderOpts, RenderStats, RenderThreading, Scene, Timeline, render_scene,
};
pub use crate::script::ReelScript;
