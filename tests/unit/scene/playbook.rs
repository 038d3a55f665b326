use super::*;
use crate::animation::ease::Ease;
use crate::animation::keyframes::Animated;
use crate::drawable::{Drawable, Rectangle};
use crate::foundation::core::{Rect, Rgba8Premul};
use std::sync::Arc;

fn slide(secs: f64) -> DrawableRef {
    let blue = Rgba8Premul::opaque(0, 0, 255);
    Animated::new(
        vec![
            Rectangle::new(Rect::new(0.0, 0.0, 10.0, 10.0), blue),
            Rectangle::new(Rect::new(90.0, 0.0, 100.0, 10.0), blue),
        ],
        secs,
        Ease::Linear,
    )
    .unwrap()
    .into_ref()
}

struct ThreeActs {
    calls: usize,
}

impl Timeline for ThreeActs {
    fn timeline(&mut self, book: &mut Playbook) -> ReelResult<()> {
        self.calls += 1;
        book.play(slide(3.0), None)?;
        book.freeze(2.0)?;
        book.play(slide(1.0), Some(4.0))?;
        Ok(())
    }
}

#[test]
fn play_freeze_play_sums_to_nine_seconds() {
    let mut acts = ThreeActs { calls: 0 };
    let book = Playbook::build(&mut acts).unwrap();
    assert_eq!(acts.calls, 1);
    assert_eq!(book.len(), 3);
    assert_eq!(book.cursor(), 9.0);
    assert_eq!(book.combined_scene().unwrap().duration(), 9.0);
}

#[test]
fn freeze_on_empty_playbook_is_a_usage_error() {
    let err = Playbook::from_fn(|book| book.freeze(1.0)).unwrap_err();
    assert!(matches!(err, ReelError::Usage(_)), "{err}");
}

#[test]
fn combining_nothing_is_a_usage_error() {
    let book = Playbook::default();
    assert!(book.is_empty());
    assert!(matches!(book.combined_scene(), Err(ReelError::Usage(_))));
}

#[test]
fn play_shows_the_live_drawable_at_scene_time() {
    let shared = slide(2.0);
    let book = Playbook::from_fn(|book| book.play(Arc::clone(&shared), None)).unwrap();
    let scene = &book.scenes()[0];
    assert_eq!(scene.duration(), 2.0);

    let shown = scene.frame(1.0);
    assert!(Arc::ptr_eq(&shown, &shared));
    assert_eq!(shared.bounds().x0, 45.0);
}

#[test]
fn freeze_holds_the_previous_end_state() {
    let book = Playbook::from_fn(|book| {
        book.play(slide(2.0), None)?;
        book.freeze(1.5)
    })
    .unwrap();
    let scene = book.combined_scene().unwrap();
    assert_eq!(scene.duration(), 3.5);
    assert_eq!(scene.frame(2.1).bounds().x0, 90.0);
    assert_eq!(scene.frame(3.4).bounds().x0, 90.0);
}

#[test]
fn explicit_durations_are_validated() {
    let err = Playbook::from_fn(|book| book.play(slide(1.0), Some(-2.0))).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");
}

#[test]
fn add_scene_appends_caller_scenes() {
    let mut book = Playbook::default();
    book.add_scene(Scene::timed(slide(1.0), 0.5).unwrap());
    book.add_scene(Scene::timed(slide(1.0), 0.25).unwrap());
    assert_eq!(book.cursor(), 0.75);
    assert_eq!(book.combined_scene().unwrap().segment_count(), 2);
}
