use kurbo::RoundedRect;

use crate::animation::tween::Tween;
use crate::drawable::Drawable;
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::render::display_list::DisplayList;

/// Axis-aligned filled rectangle with optional rounded corners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Rectangle in world coordinates.
    pub rect: Rect,
    /// Fill color.
    pub fill: Rgba8Premul,
    /// Corner radius in pixels, clamped to half the shorter side when drawn.
    #[serde(default)]
    pub corner_radius: f64,
}

impl Rectangle {
    /// Square-cornered rectangle.
    pub fn new(rect: Rect, fill: Rgba8Premul) -> Self {
        Self {
            rect,
            fill,
            corner_radius: 0.0,
        }
    }

    /// Same rectangle with rounded corners.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl Drawable for Rectangle {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, list: &mut DisplayList) {
        let max_radius = self.rect.width().min(self.rect.height()).abs() / 2.0;
        let radius = self.corner_radius.clamp(0.0, max_radius);
        if radius > 0.0 {
            list.fill_shape(&RoundedRect::from_rect(self.rect, radius), self.fill);
        } else {
            list.fill_shape(&self.rect, self.fill);
        }
    }
}

impl Tween for Rectangle {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            rect: Rect::tween(&a.rect, &b.rect, t),
            fill: Rgba8Premul::tween(&a.fill, &b.fill, t),
            corner_radius: f64::tween(&a.corner_radius, &b.corner_radius, t),
        }
    }
}

/// Filled ellipse inscribed in `rect`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ellipse {
    /// Bounding rectangle in world coordinates.
    pub rect: Rect,
    /// Fill color.
    pub fill: Rgba8Premul,
}

impl Ellipse {
    /// Ellipse filling `rect`.
    pub fn new(rect: Rect, fill: Rgba8Premul) -> Self {
        Self { rect, fill }
    }
}

impl Drawable for Ellipse {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, list: &mut DisplayList) {
        list.fill_shape(&kurbo::Ellipse::from_rect(self.rect), self.fill);
    }
}

impl Tween for Ellipse {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            rect: Rect::tween(&a.rect, &b.rect, t),
            fill: Rgba8Premul::tween(&a.fill, &b.fill, t),
        }
    }
}
