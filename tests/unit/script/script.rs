use super::*;

const TWO_ACTS: &str = r#"{
    "backdrop": { "x": 0, "y": 0, "width": 100, "height": 50, "fill": [0, 0, 0, 255] },
    "steps": [
        { "play": { "layers": [
            {
                "shape": "rect",
                "keys": [
                    { "x": 0, "y": 0, "width": 10, "height": 10 },
                    { "x": 90, "y": 0, "width": 10, "height": 10 }
                ],
                "durations": 2,
                "ease": "linear"
            },
            {
                "shape": "ellipse",
                "keys": [
                    { "x": 0, "y": 20, "width": 10, "height": 10, "fill": [255, 0, 0, 128] },
                    { "x": 40, "y": 20, "width": 10, "height": 10 },
                    { "x": 80, "y": 20, "width": 10, "height": 10 }
                ],
                "durations": [0.5, 1.0],
                "ease": ["in_quad", "out_cubic"],
                "start_time": 0.5
            }
        ] } },
        { "freeze": 1.5 },
        { "play": { "layers": [], "duration": 0.5 } }
    ]
}"#;

#[test]
fn parses_steps_layers_and_defaults() {
    let script = ReelScript::from_json(TWO_ACTS).unwrap();
    assert_eq!(script.steps.len(), 3);
    let Step::Play(play) = &script.steps[0] else {
        panic!("first step should play");
    };
    assert_eq!(play.layers[0].shape, ShapeKind::Rect);
    assert_eq!(play.layers[0].keys[0].fill, [255, 255, 255, 255]);
    assert!(matches!(play.layers[0].durations, PerSegment::Uniform(d) if d == 2.0));
    assert!(matches!(&play.layers[1].durations, PerSegment::Each(d) if d == &vec![0.5, 1.0]));
    assert_eq!(play.layers[1].start_time, 0.5);
    assert!(play.duration.is_none());
    assert!(matches!(script.steps[1], Step::Freeze(s) if s == 1.5));
}

#[test]
fn playbook_durations_follow_the_steps() {
    let book = ReelScript::from_json(TWO_ACTS)
        .unwrap()
        .to_playbook()
        .unwrap();
    assert_eq!(book.len(), 3);
    // The ellipse ends at 0.5 + 1.5, so the first play step lasts two seconds.
    assert_eq!(book.scenes()[0].duration(), 2.0);
    assert_eq!(book.combined_scene().unwrap().duration(), 4.0);
}

#[test]
fn backdrop_sets_the_frame_bounds() {
    let scene = ReelScript::from_json(TWO_ACTS)
        .unwrap()
        .to_playbook()
        .unwrap()
        .combined_scene()
        .unwrap();
    assert_eq!(scene.frame(0.0).bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(scene.frame(3.9).bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ReelScript::from_json("{ \"steps\": [ { \"dance\": 1 } ] }").unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)), "{err}");
}

#[test]
fn leading_freeze_is_a_usage_error() {
    let script = ReelScript::from_json(r#"{ "steps": [ { "freeze": 1.0 } ] }"#).unwrap();
    assert!(matches!(script.to_playbook(), Err(ReelError::Usage(_))));
}

#[test]
fn mismatched_key_and_duration_counts_fail() {
    let script = ReelScript::from_json(
        r#"{ "steps": [ { "play": { "layers": [ {
            "shape": "rect",
            "keys": [
                { "x": 0, "y": 0, "width": 1, "height": 1 },
                { "x": 1, "y": 0, "width": 1, "height": 1 },
                { "x": 2, "y": 0, "width": 1, "height": 1 }
            ],
            "durations": [1.0]
        } ] } } ] }"#,
    )
    .unwrap();
    assert!(matches!(script.to_playbook(), Err(ReelError::Animation(_))));
}

#[test]
fn single_key_layers_are_still_shapes() {
    let layer = Layer {
        shape: ShapeKind::Ellipse,
        keys: vec![ShapeState {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            fill: [0, 0, 0, 255],
            corner_radius: 0.0,
        }],
        durations: PerSegment::Uniform(1.0),
        ease: PerSegment::Uniform(Ease::Linear),
        start_time: 0.0,
    };
    let drawable = layer.to_drawable().unwrap();
    assert_eq!(drawable.bounds(), Rect::new(1.0, 2.0, 4.0, 6.0));
    assert_eq!(drawable.total_duration(), None);
}

#[test]
fn round_trips_through_json() {
    let script = ReelScript::from_json(TWO_ACTS).unwrap();
    let again = ReelScript::from_json(&script.to_json().unwrap()).unwrap();
    assert_eq!(again.steps.len(), script.steps.len());
    assert_eq!(again.backdrop, script.backdrop);
}
