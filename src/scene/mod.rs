//! Scene algebra, frame-loop materialization and the playbook builder.

/// Two-phase timeline builder.
pub mod playbook;
/// Frame loop driving renderers and sinks.
pub mod render;
/// Time-bounded drawable mappings and their combinators.
#[allow(clippy::module_inception)]
pub mod scene;

pub use playbook::{Playbook, Timeline};
pub use render::{RenderOpts, RenderStats, RenderThreading, render_scene, total_frames};
pub use scene::{FrameFn, Scene};
