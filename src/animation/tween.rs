use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rect, Rgba8Premul, Vec2},
};

/// Interpolation contract for animatable values.
pub trait Tween: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn tween(a: &Self, b: &Self, t: f64) -> Self;
}

/// Interpolate `a` toward `b` at linear `progress`, shaped by `ease`.
pub fn tween<T: Tween>(a: &T, b: &T, progress: f64, ease: Ease) -> T {
    T::tween(a, b, ease.apply(progress))
}

impl Tween for f64 {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Tween for f32 {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Tween for Vec2 {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Tween for Point {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Tween for Rect {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            f64::tween(&a.x0, &b.x0, t),
            f64::tween(&a.y0, &b.y0, t),
            f64::tween(&a.x1, &b.x1, t),
            f64::tween(&a.y1, &b.y1, t),
        )
    }
}

impl Tween for Rgba8Premul {
    fn tween(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
