use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::render::display_list::DrawOp;

fn square(x: f64, size: f64) -> DrawableRef {
    Arc::new(Rectangle::new(
        Rect::new(x, 0.0, x + size, size),
        Rgba8Premul::opaque(0, 0, 255),
    ))
}

#[derive(Debug, Default)]
struct Clock(TimeCursor);

impl Drawable for Clock {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.0.get(), 1.0)
    }

    fn draw(&self, _list: &mut DisplayList) {}

    fn set_time(&self, t: f64) {
        self.0.set(t);
    }

    fn total_duration(&self) -> Option<f64> {
        Some(1.25)
    }
}

#[test]
fn group_bounds_are_the_union_of_children() {
    let group = Group::new(vec![square(0.0, 10.0), square(50.0, 20.0)]);
    assert_eq!(group.bounds(), Rect::new(0.0, 0.0, 70.0, 20.0));
    assert_eq!(Group::default().bounds(), Rect::ZERO);
}

#[test]
fn find_all_is_pre_order_and_includes_the_root() {
    let inner = Group::new(vec![square(1.0, 1.0)]).into_ref();
    let root = Group::new(vec![square(0.0, 1.0), Arc::clone(&inner), square(2.0, 1.0)]).into_ref();
    let xs: Vec<f64> = root
        .find_all(|d| d.children().is_empty())
        .iter()
        .map(|d| d.bounds().x0)
        .collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    assert_eq!(root.find_all(|_| true).len(), 5);
}

#[test]
fn set_time_reaches_nested_children() {
    let clock = Arc::new(Clock::default());
    let root = Group::new(vec![Group::new(vec![clock.clone() as DrawableRef]).into_ref()]);
    root.set_time(0.75);
    assert_eq!(clock.0.get(), 0.75);
}

#[test]
fn timeline_duration_reads_timed_nodes() {
    let clock: DrawableRef = Arc::new(Clock::default());
    let root = Group::new(vec![square(0.0, 1.0), clock]).into_ref();
    assert_eq!(root.timeline_duration(), 1.25);
    assert_eq!(square(0.0, 1.0).timeline_duration(), 0.0);
}

#[test]
fn crop_reports_the_crop_rect_and_clips_drawing() {
    let crop_rect = Rect::new(-5.0, -5.0, 5.0, 5.0);
    let cropped = square(0.0, 100.0).crop(crop_rect);
    assert_eq!(cropped.bounds(), crop_rect);

    let list = DisplayList::record(cropped.as_ref());
    assert_eq!(list.viewport(), crop_rect);
    match list.ops() {
        [DrawOp::Clip { rect, ops }] => {
            assert_eq!(*rect, crop_rect);
            assert_eq!(ops.len(), 1);
        }
        other => panic!("unexpected ops: {other:?}"),
    }
}

#[test]
fn time_cursor_roundtrips_values() {
    let cursor = TimeCursor::new(2.5);
    assert_eq!(cursor.get(), 2.5);
    cursor.set(-0.125);
    assert_eq!(cursor.get(), -0.125);
    assert_eq!(TimeCursor::default().get(), 0.0);
}
