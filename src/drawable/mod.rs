//! Visual object contract consumed by the keyframe evaluator, scenes and renderers.
//!
//! A [`Drawable`] knows its bounds, its children and how to record itself into a
//! [`DisplayList`]. Time-dependent drawables also carry a [`TimeCursor`] that callers move with
//! [`Drawable::set_time`]; everything else observes the cursor through `bounds`, `children` and
//! `draw`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Rect;
use crate::render::display_list::DisplayList;

mod layout;
mod shapes;

pub use layout::{Cropped, Group};
pub use shapes::{Ellipse, Rectangle};

/// Shared handle to a drawable. Scenes, groups and freezers all hold drawables this way.
pub type DrawableRef = Arc<dyn Drawable>;

/// Capability set of a visual object.
pub trait Drawable: fmt::Debug + Send + Sync {
    /// Bounds in world coordinates at the current time.
    fn bounds(&self) -> Rect;

    /// Direct children at the current time, in paint order.
    fn children(&self) -> Vec<DrawableRef> {
        Vec::new()
    }

    /// Record draw operations for the current time.
    fn draw(&self, list: &mut DisplayList);

    /// Move the current time of this drawable and its subtree.
    ///
    /// Mutates shared state: callers must not interleave `set_time` and reads of the same
    /// instance from concurrently evaluated frames.
    fn set_time(&self, t: f64) {
        for child in self.children() {
            child.set_time(t);
        }
    }

    /// Length of this drawable's own keyframe timeline, when it has one.
    fn total_duration(&self) -> Option<f64> {
        None
    }
}

/// Helpers available on every [`DrawableRef`].
pub trait DrawableExt {
    /// Pre-order search of the subtree (self first) for drawables matching `pred`.
    fn find_all(&self, pred: impl Fn(&dyn Drawable) -> bool) -> Vec<DrawableRef>;

    /// Wrap in a [`Cropped`] whose bounds are exactly `bounds`.
    fn crop(&self, bounds: Rect) -> DrawableRef;

    /// Longest keyframe timeline found anywhere in the subtree, or `0.0`.
    fn timeline_duration(&self) -> f64;
}

impl DrawableExt for DrawableRef {
    fn find_all(&self, pred: impl Fn(&dyn Drawable) -> bool) -> Vec<DrawableRef> {
        fn walk(
            node: &DrawableRef,
            pred: &dyn Fn(&dyn Drawable) -> bool,
            out: &mut Vec<DrawableRef>,
        ) {
            if pred(node.as_ref()) {
                out.push(Arc::clone(node));
            }
            for child in node.children() {
                walk(&child, pred, out);
            }
        }

        let mut out = Vec::new();
        walk(self, &pred, &mut out);
        out
    }

    fn crop(&self, bounds: Rect) -> DrawableRef {
        Arc::new(Cropped::new(Arc::clone(self), bounds))
    }

    fn timeline_duration(&self) -> f64 {
        timeline_duration(self)
    }
}

/// Longest `total_duration` among all timed drawables under `root` (inclusive), `0.0` if none.
pub fn timeline_duration(root: &DrawableRef) -> f64 {
    root.find_all(|d| d.total_duration().is_some())
        .into_iter()
        .filter_map(|d| d.total_duration())
        .fold(0.0, f64::max)
}

/// Current query time of a time-dependent drawable.
///
/// Stored as `f64` bits in an atomic so drawables stay `Send + Sync`.
#[derive(Debug, Default)]
pub struct TimeCursor(AtomicU64);

impl TimeCursor {
    /// Cursor positioned at `t` seconds.
    pub fn new(t: f64) -> Self {
        Self(AtomicU64::new(t.to_bits()))
    }

    /// Current time in seconds.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Move the cursor to `t` seconds.
    pub fn set(&self, t: f64) {
        self.0.store(t.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/drawable.rs"]
mod tests;
