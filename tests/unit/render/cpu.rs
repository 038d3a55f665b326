use super::*;
use crate::drawable::{DrawableExt, DrawableRef, Group, Rectangle};
use std::sync::Arc;

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
const BLUE: Rgba8Premul = Rgba8Premul {
    r: 0,
    g: 0,
    b: 255,
    a: 255,
};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64, fill: Rgba8Premul) -> DrawableRef {
    Arc::new(Rectangle::new(Rect::new(x0, y0, x1, y1), fill))
}

#[test]
fn surface_size_rounds_up_and_rejects_degenerate_viewports() {
    assert_eq!(
        surface_size(Rect::new(10.0, 10.0, 20.5, 13.0)).unwrap(),
        (11, 3)
    );
    assert!(surface_size(Rect::ZERO).is_err());
    assert!(surface_size(Rect::new(0.0, 0.0, 70_000.0, 1.0)).is_err());
    assert!(surface_size(Rect::new(0.0, 0.0, f64::NAN, 1.0)).is_err());
}

#[test]
fn rendered_pixels_before_render_is_an_error() {
    let err = CpuRenderer::default().rendered_pixels().unwrap_err();
    assert!(matches!(err, ReelError::Render(_)), "{err}");
}

#[test]
fn viewport_origin_maps_to_pixel_zero() {
    let mut renderer = CpuRenderer::default();
    renderer
        .render(rect(100.0, 50.0, 116.0, 58.0, RED).as_ref())
        .unwrap();
    let frame = renderer.rendered_pixels().unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert_eq!(frame.pixel(8, 4), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn later_ops_paint_over_earlier_ones() {
    let scene = Group::new(vec![
        rect(0.0, 0.0, 20.0, 10.0, RED),
        rect(10.0, 0.0, 20.0, 10.0, BLUE),
    ]);
    let mut renderer = CpuRenderer::default();
    renderer.render(&scene).unwrap();
    let frame = renderer.rendered_pixels().unwrap();
    assert_eq!(frame.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 5), Some([0, 0, 255, 255]));
}

#[test]
fn clear_color_fills_uncovered_pixels() {
    let mut list = DisplayList::new(Rect::new(0.0, 0.0, 4.0, 4.0));
    list.fill_shape(&Rect::new(0.0, 0.0, 2.0, 4.0), BLUE);
    let settings = RenderSettings {
        clear_rgba: Some([0, 255, 0, 255]),
    };
    let frame = rasterize(&list, &settings).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(3, 3), Some([0, 255, 0, 255]));

    let bare = rasterize(&list, &RenderSettings::default()).unwrap();
    assert_eq!(bare.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn crop_masks_pixels_outside_the_clip() {
    let backdrop = rect(0.0, 0.0, 20.0, 20.0, BLUE);
    let cropped = rect(0.0, 0.0, 20.0, 20.0, RED).crop(Rect::new(0.0, 0.0, 10.0, 20.0));
    let scene = Group::new(vec![backdrop, cropped]);

    let mut renderer = CpuRenderer::default();
    renderer.render(&scene).unwrap();
    let frame = renderer.rendered_pixels().unwrap();
    assert_eq!((frame.width, frame.height), (20, 20));
    assert_eq!(frame.pixel(5, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 10), Some([0, 0, 255, 255]));
}

#[test]
fn take_pixels_empties_the_renderer() {
    let mut renderer = CpuRenderer::new(RenderSettings::default());
    renderer
        .render(rect(0.0, 0.0, 2.0, 2.0, RED).as_ref())
        .unwrap();
    assert!(renderer.take_pixels().is_ok());
    assert!(renderer.take_pixels().is_err());
    assert_eq!(renderer.worker_settings(), Some(RenderSettings::default()));
}
