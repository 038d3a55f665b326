use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameGate, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Animated GIF output that loops forever.
pub struct GifSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    delay: Option<Delay>,
    gate: FrameGate,
}

impl GifSink {
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
            encoder: None,
            delay: None,
            gate: FrameGate::default(),
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.gate.open(cfg)?;
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }

        ensure_parent_dir(&self.out_path)?;
        if !self.overwrite && self.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }

        let file = File::create(&self.out_path)
            .with_context(|| format!("failed to create '{}'", self.out_path.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ReelError::encode(format!("gif repeat setup failed: {e}")))?;

        tracing::debug!(out = %self.out_path.display(), "gif sink started");
        self.delay = Some(Delay::from_numer_denom_ms(
            1000 * cfg.fps.den,
            cfg.fps.num,
        ));
        self.encoder = Some(encoder);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.gate.admit(idx, frame)?;
        let (Some(encoder), Some(delay)) = (self.encoder.as_mut(), self.delay) else {
            return Err(ReelError::encode("gif sink is already finalized"));
        };

        let image = RgbaImage::from_raw(frame.width, frame.height, frame.straight_rgba8())
            .ok_or_else(|| ReelError::encode("frame buffer does not match its dimensions"))?;

        encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .map_err(|e| ReelError::encode(format!("gif frame {} failed: {e}", idx.0)))
    }

    fn end(&mut self) -> ReelResult<()> {
        self.gate.close();
        self.delay = None;
        // Dropping the encoder writes the GIF trailer.
        if self.encoder.take().is_some() {
            tracing::debug!(out = %self.out_path.display(), "gif sink finished");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
