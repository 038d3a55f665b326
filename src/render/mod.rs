//! Display-list recording and CPU rasterization.

/// Renderer contract and frame buffers.
pub mod backend;
/// `vello_cpu` renderer.
pub mod cpu;
/// Owned per-frame draw recordings.
pub mod display_list;

pub use backend::{FrameRGBA, RenderSettings, Renderer};
pub use cpu::CpuRenderer;
pub use display_list::{DisplayList, DrawOp};
