use kurbo::{PathEl, Shape};

use crate::drawable::Drawable;
use crate::foundation::core::{BezPath, Rect, Rgba8Premul};
use crate::foundation::math::Fnv1a64;

/// Flattening tolerance used when converting shapes to paths.
const SHAPE_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
/// Draw operation recorded by [`Drawable::draw`], in world coordinates.
pub enum DrawOp {
    /// Fill a path with a solid premultiplied color.
    FillPath {
        /// Path in world coordinates.
        path: BezPath,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Draw nested operations clipped to `rect`.
    Clip {
        /// Clip rectangle in world coordinates.
        rect: Rect,
        /// Operations drawn inside the clip.
        ops: Vec<DrawOp>,
    },
}

/// Resolved, owned snapshot of one frame's drawing.
///
/// Recording touches the drawable (and thus its time cursor); the list itself is plain data and
/// can be rasterized on any thread.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    viewport: Rect,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Empty list for the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
        }
    }

    /// Record `drawable` with its current bounds as the viewport.
    pub fn record(drawable: &dyn Drawable) -> Self {
        let mut list = Self::new(drawable.bounds());
        drawable.draw(&mut list);
        list
    }

    /// World-space rectangle this list maps onto the output surface.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Recorded operations in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Return `true` when nothing visible was recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Fill `path` with `color`. Fully transparent fills are dropped.
    pub fn fill_path(&mut self, path: BezPath, color: Rgba8Premul) {
        if color.a == 0 {
            return;
        }
        self.ops.push(DrawOp::FillPath { path, color });
    }

    /// Fill any `kurbo` shape with `color`.
    pub fn fill_shape(&mut self, shape: &impl Shape, color: Rgba8Premul) {
        self.fill_path(shape.to_path(SHAPE_TOLERANCE), color);
    }

    /// Record whatever `f` draws clipped to `rect`.
    pub fn with_clip(&mut self, rect: Rect, f: impl FnOnce(&mut DisplayList)) {
        let mut inner = DisplayList::new(self.viewport);
        f(&mut inner);
        if !inner.ops.is_empty() {
            self.ops.push(DrawOp::Clip {
                rect,
                ops: inner.ops,
            });
        }
    }

    /// Content hash of viewport and operations, used to skip re-rasterizing identical frames.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        write_rect(&mut h, self.viewport);
        write_ops(&mut h, &self.ops);
        h.finish()
    }
}

fn write_ops(h: &mut Fnv1a64, ops: &[DrawOp]) {
    h.write_u64(ops.len() as u64);
    for op in ops {
        match op {
            DrawOp::FillPath { path, color } => {
                h.write_u8(0);
                h.write_bytes(&[color.r, color.g, color.b, color.a]);
                write_path(h, path);
            }
            DrawOp::Clip { rect, ops } => {
                h.write_u8(1);
                write_rect(h, *rect);
                write_ops(h, ops);
            }
        }
    }
}

fn write_path(h: &mut Fnv1a64, path: &BezPath) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                h.write_u8(0);
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::LineTo(p) => {
                h.write_u8(1);
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            PathEl::QuadTo(p1, p2) => {
                h.write_u8(2);
                for p in [p1, p2] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::CurveTo(p1, p2, p3) => {
                h.write_u8(3);
                for p in [p1, p2, p3] {
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
            }
            PathEl::ClosePath => h.write_u8(4),
        }
    }
}

fn write_rect(h: &mut Fnv1a64, r: Rect) {
    h.write_f64(r.x0);
    h.write_f64(r.y0);
    h.write_f64(r.x1);
    h.write_f64(r.y1);
}

#[cfg(test)]
#[path = "../../tests/unit/render/display_list.rs"]
mod tests;
