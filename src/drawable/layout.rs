use std::sync::Arc;

use crate::drawable::{Drawable, DrawableRef};
use crate::foundation::core::Rect;
use crate::render::display_list::DisplayList;

/// Ordered stack of drawables painted back to front.
#[derive(Clone, Debug, Default)]
pub struct Group {
    children: Vec<DrawableRef>,
}

impl Group {
    /// Group painting `children` in order.
    pub fn new(children: Vec<DrawableRef>) -> Self {
        Self { children }
    }

    /// Append a child on top of the existing ones.
    pub fn push(&mut self, child: DrawableRef) {
        self.children.push(child);
    }

    /// Finish into a shared handle.
    pub fn into_ref(self) -> DrawableRef {
        Arc::new(self)
    }
}

impl Drawable for Group {
    /// Union of child bounds; an empty group has zero-sized bounds at the origin.
    fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(|c| c.bounds())
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO)
    }

    fn children(&self) -> Vec<DrawableRef> {
        self.children.clone()
    }

    fn draw(&self, list: &mut DisplayList) {
        for child in &self.children {
            child.draw(list);
        }
    }
}

/// A drawable restricted to a fixed rectangle.
///
/// Bounds are always the crop rectangle, regardless of the child, so every frame cropped to the
/// same rectangle rasterizes to the same pixel size.
#[derive(Clone, Debug)]
pub struct Cropped {
    child: DrawableRef,
    bounds: Rect,
}

impl Cropped {
    /// Crop `child` to `bounds`.
    pub fn new(child: DrawableRef, bounds: Rect) -> Self {
        Self { child, bounds }
    }
}

impl Drawable for Cropped {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn children(&self) -> Vec<DrawableRef> {
        vec![Arc::clone(&self.child)]
    }

    fn draw(&self, list: &mut DisplayList) {
        list.with_clip(self.bounds, |inner| self.child.draw(inner));
    }
}
