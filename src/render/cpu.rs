use crate::{
    drawable::Drawable,
    foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul},
    foundation::error::{ReelError, ReelResult},
    foundation::math::mul_div255_u16,
    render::backend::{FrameRGBA, RenderSettings, Renderer},
    render::display_list::{DisplayList, DrawOp},
};

/// Software renderer backed by `vello_cpu`.
///
/// The output surface is `ceil(viewport)` pixels with the viewport origin at pixel (0, 0).
#[derive(Debug, Default)]
pub struct CpuRenderer {
    settings: RenderSettings,
    last: Option<FrameRGBA>,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            last: None,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Rasterize an already recorded display list.
    pub fn render_list(&mut self, list: &DisplayList) -> ReelResult<()> {
        let frame = rasterize(list, &self.settings)?;
        self.last = Some(frame);
        Ok(())
    }

    /// Take the last rendered frame, leaving the renderer empty.
    pub fn take_pixels(&mut self) -> ReelResult<FrameRGBA> {
        self.last
            .take()
            .ok_or_else(|| ReelError::render("no frame has been rendered yet"))
    }
}

impl Renderer for CpuRenderer {
    fn render(&mut self, drawable: &dyn Drawable) -> ReelResult<()> {
        self.render_list(&DisplayList::record(drawable))
    }

    fn rendered_pixels(&self) -> ReelResult<FrameRGBA> {
        self.last
            .clone()
            .ok_or_else(|| ReelError::render("no frame has been rendered yet"))
    }

    fn worker_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

/// Pixel size of the surface covering `viewport`.
pub fn surface_size(viewport: Rect) -> ReelResult<(u16, u16)> {
    let side = |len: f64, what: &str| -> ReelResult<u16> {
        let px = len.ceil();
        if !px.is_finite() || px < 1.0 || px > f64::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "viewport {what} {len} must be within 1..={} pixels",
                u16::MAX
            )));
        }
        Ok(px as u16)
    };
    Ok((
        side(viewport.width(), "width")?,
        side(viewport.height(), "height")?,
    ))
}

/// Rasterize `list` into a premultiplied frame sized from its viewport.
pub fn rasterize(list: &DisplayList, settings: &RenderSettings) -> ReelResult<FrameRGBA> {
    let viewport = list.viewport();
    let (width, height) = surface_size(viewport)?;

    let clear = settings
        .clear_rgba
        .map(|[r, g, b, a]| Rgba8Premul::from_straight_rgba(r, g, b, a))
        .unwrap_or_else(Rgba8Premul::transparent);
    let mut data = vec![0u8; usize::from(width) * usize::from(height) * 4];
    clear_buffer(&mut data, clear);

    let target = Target {
        width,
        height,
        to_pixels: Affine::translate(-viewport.origin().to_vec2()),
    };
    draw_ops(&target, &mut data, list.ops());

    Ok(FrameRGBA {
        width: u32::from(width),
        height: u32::from(height),
        data,
        premultiplied: true,
    })
}

struct Target {
    width: u16,
    height: u16,
    to_pixels: Affine,
}

impl Target {
    fn blank(&self) -> Vec<u8> {
        vec![0u8; usize::from(self.width) * usize::from(self.height) * 4]
    }
}

// Consecutive fills go through one vello context; each clip is rendered on its own layer,
// masked, and composited over what came before so paint order is preserved.
fn draw_ops(target: &Target, dst: &mut [u8], ops: &[DrawOp]) {
    let mut batch: Vec<(&BezPath, Rgba8Premul)> = Vec::new();
    for op in ops {
        match op {
            DrawOp::FillPath { path, color } => batch.push((path, *color)),
            DrawOp::Clip { rect, ops } => {
                flush_fills(target, dst, &mut batch);
                let mut layer = target.blank();
                draw_ops(target, &mut layer, ops);
                mask_outside(target, &mut layer, *rect);
                over_in_place(dst, &layer);
            }
        }
    }
    flush_fills(target, dst, &mut batch);
}

fn flush_fills(target: &Target, dst: &mut [u8], batch: &mut Vec<(&BezPath, Rgba8Premul)>) {
    if batch.is_empty() {
        return;
    }
    let mut ctx = vello_cpu::RenderContext::new(target.width, target.height);
    ctx.set_transform(affine_to_cpu(target.to_pixels));
    for (path, color) in batch.drain(..) {
        let [r, g, b, a] = color.to_straight_rgba();
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_path(&bezpath_to_cpu(path));
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(target.width, target.height);
    ctx.render_to_pixmap(&mut pixmap);
    over_in_place(dst, pixmap.data_as_u8_slice());
}

fn mask_outside(target: &Target, layer: &mut [u8], clip: Rect) {
    let clip = target.to_pixels.transform_rect_bbox(clip);
    let width = usize::from(target.width);
    for (i, px) in layer.chunks_exact_mut(4).enumerate() {
        let center = Point::new((i % width) as f64 + 0.5, (i / width) as f64 + 0.5);
        let inside =
            center.x >= clip.x0 && center.x < clip.x1 && center.y >= clip.y0 && center.y < clip.y1;
        if !inside {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
}

fn clear_buffer(data: &mut [u8], color: Rgba8Premul) {
    let px = [color.r, color.g, color.b, color.a];
    for dst in data.chunks_exact_mut(4) {
        dst.copy_from_slice(&px);
    }
}

/// Premultiplied source-over of equal-sized RGBA8 buffers.
fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - u16::from(sa);
        for i in 0..4 {
            let dc = mul_div255_u16(u16::from(d[i]), inv);
            d[i] = (u16::from(s[i]) + dc).min(255) as u8;
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
