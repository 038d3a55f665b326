use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Output size and rate, fixed for the whole render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

impl SinkConfig {
    /// Reject zero-sized outputs.
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(format!(
                "sink size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Byte length of one RGBA8 frame at this size.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Destination for rendered frames.
///
/// A render calls `begin` once, `push_frame` with strictly increasing indices, then `end`.
/// `end` is also called after a failed frame, so sinks must tolerate it at any point.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()>;
    fn end(&mut self) -> ReelResult<()>;
}

/// Ordering and size bookkeeping shared by the concrete sinks.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameGate {
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FrameGate {
    pub(crate) fn open(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.cfg = None;
        self.last_idx = None;
    }

    /// Check `frame` against the configured size and the previous index.
    pub(crate) fn admit(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ReelError::encode(format!("frame {} pushed before begin", idx.0)))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::encode(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != cfg.frame_len() {
            return Err(ReelError::encode(format!(
                "frame {} carries {} bytes, expected {}",
                idx.0,
                frame.data.len(),
                cfg.frame_len()
            )));
        }
        self.last_idx = Some(idx);
        Ok(())
    }
}

/// Keeps every pushed frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    gate: FrameGate,
    began: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: usize,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config passed to the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.began
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Number of times `end` was called.
    pub fn end_calls(&self) -> usize {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.gate.open(cfg)?;
        self.began = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.gate.admit(idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.gate.close();
        self.ended += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
