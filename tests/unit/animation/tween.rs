use super::*;

#[test]
fn scalars_interpolate_linearly() {
    assert_eq!(f64::tween(&0.0, &10.0, 0.25), 2.5);
    assert_eq!(f32::tween(&-1.0, &1.0, 0.5), 0.0);
}

#[test]
fn tween_applies_ease_before_interpolating() {
    assert_eq!(tween(&0.0, &8.0, 0.5, Ease::Linear), 4.0);
    assert_eq!(tween(&0.0, &8.0, 0.5, Ease::InQuad), 2.0);
}

#[test]
fn rect_interpolates_each_edge() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 20.0, 30.0, 50.0);
    assert_eq!(Rect::tween(&a, &b, 0.5), Rect::new(5.0, 10.0, 20.0, 30.0));
}

#[test]
fn colors_round_per_channel() {
    let a = Rgba8Premul::opaque(0, 0, 0);
    let b = Rgba8Premul::opaque(255, 100, 1);
    let mid = Rgba8Premul::tween(&a, &b, 0.5);
    assert_eq!(mid, Rgba8Premul::opaque(128, 50, 1));
}

#[test]
fn points_and_vectors_follow_straight_lines() {
    let p = Point::tween(&Point::new(0.0, 0.0), &Point::new(4.0, -4.0), 0.25);
    assert_eq!(p, Point::new(1.0, -1.0));
    let v = Vec2::tween(&Vec2::new(2.0, 2.0), &Vec2::new(4.0, 6.0), 0.5);
    assert_eq!(v, Vec2::new(3.0, 4.0));
}
