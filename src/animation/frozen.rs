use std::sync::Arc;

use crate::{
    drawable::{Drawable, DrawableRef, timeline_duration},
    foundation::core::Rect,
    render::display_list::DisplayList,
};

/// Shows a shared, time-dependent drawable at one fixed time.
///
/// The child's time is re-pinned before every read because the same child may be re-timed by
/// other scenes between reads.
#[derive(Debug)]
pub struct Frozen {
    child: DrawableRef,
    at: f64,
}

impl Frozen {
    /// Freeze `child` at the end of the longest keyframe timeline in its subtree.
    pub fn new(child: DrawableRef) -> Self {
        let at = timeline_duration(&child);
        Self { child, at }
    }

    /// Freeze `child` at `t` seconds.
    pub fn at(child: DrawableRef, t: f64) -> Self {
        Self { child, at: t }
    }

    /// Pinned time in seconds.
    pub fn freeze_time(&self) -> f64 {
        self.at
    }

    /// Finish into a shared handle.
    pub fn into_ref(self) -> DrawableRef {
        Arc::new(self)
    }

    fn pin(&self) {
        self.child.set_time(self.at);
    }
}

impl Drawable for Frozen {
    fn bounds(&self) -> Rect {
        self.pin();
        self.child.bounds()
    }

    fn children(&self) -> Vec<DrawableRef> {
        self.pin();
        self.child.children()
    }

    fn draw(&self, list: &mut DisplayList) {
        self.pin();
        self.child.draw(list);
    }

    // The pinned time wins over whatever the enclosing timeline asks for.
    fn set_time(&self, _t: f64) {}
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frozen.rs"]
mod tests;
