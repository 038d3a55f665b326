use super::*;

fn unit_square() -> Rect {
    Rect::new(0.0, 0.0, 1.0, 1.0)
}

#[test]
fn transparent_fills_are_dropped() {
    let mut list = DisplayList::new(unit_square());
    list.fill_shape(&unit_square(), Rgba8Premul::transparent());
    assert!(list.is_empty());

    list.fill_shape(&unit_square(), Rgba8Premul::opaque(1, 2, 3));
    assert_eq!(list.ops().len(), 1);
}

#[test]
fn empty_clips_are_not_recorded() {
    let mut list = DisplayList::new(unit_square());
    list.with_clip(unit_square(), |_| {});
    list.with_clip(unit_square(), |inner| {
        inner.fill_shape(&unit_square(), Rgba8Premul::transparent())
    });
    assert!(list.is_empty());
}

#[test]
fn clip_keeps_nested_ops_in_order() {
    let red = Rgba8Premul::opaque(255, 0, 0);
    let blue = Rgba8Premul::opaque(0, 0, 255);
    let mut list = DisplayList::new(unit_square());
    list.with_clip(Rect::new(0.0, 0.0, 0.5, 0.5), |inner| {
        inner.fill_shape(&unit_square(), red);
        inner.fill_shape(&unit_square(), blue);
    });
    match list.ops() {
        [DrawOp::Clip { ops, .. }] => {
            let colors: Vec<Rgba8Premul> = ops
                .iter()
                .map(|op| match op {
                    DrawOp::FillPath { color, .. } => *color,
                    DrawOp::Clip { .. } => panic!("unexpected nested clip"),
                })
                .collect();
            assert_eq!(colors, vec![red, blue]);
        }
        other => panic!("unexpected ops: {other:?}"),
    }
}

#[test]
fn fingerprint_tracks_content() {
    let draw = |x: f64, color: Rgba8Premul| {
        let mut list = DisplayList::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.fill_shape(&Rect::new(x, 0.0, x + 1.0, 1.0), color);
        list
    };
    let red = Rgba8Premul::opaque(255, 0, 0);

    assert_eq!(draw(1.0, red).fingerprint(), draw(1.0, red).fingerprint());
    assert_ne!(draw(1.0, red).fingerprint(), draw(2.0, red).fingerprint());
    assert_ne!(
        draw(1.0, red).fingerprint(),
        draw(1.0, Rgba8Premul::opaque(0, 255, 0)).fingerprint()
    );
    assert_ne!(
        DisplayList::new(unit_square()).fingerprint(),
        DisplayList::new(Rect::new(0.0, 0.0, 2.0, 1.0)).fingerprint()
    );
}
