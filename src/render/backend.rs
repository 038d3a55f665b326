use crate::drawable::Drawable;
use crate::foundation::error::ReelResult;
use crate::foundation::math::unpremul_rgba8;

/// One rendered frame as tightly packed RGBA8 rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Read one pixel. Returns `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixel data with straight (non-premultiplied) alpha.
    pub fn straight_rgba8(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let straight = unpremul_rgba8([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&straight);
            }
        }
        data
    }
}

/// Options shared by a renderer and the worker renderers cloned from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// Straight-alpha RGBA the surface is cleared to before drawing. Transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Turns a drawable's current state into pixels.
pub trait Renderer {
    /// Draw `drawable` with its own bounds as the viewport.
    fn render(&mut self, drawable: &dyn Drawable) -> ReelResult<()>;

    /// Pixels of the most recent [`Renderer::render`] call.
    fn rendered_pixels(&self) -> ReelResult<FrameRGBA>;

    /// Settings for spawning equivalent CPU workers in parallel mode.
    ///
    /// Renderers that cannot be replicated return `None` and only support sequential renders.
    fn worker_settings(&self) -> Option<RenderSettings> {
        None
    }
}
