use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert_eq!(
        r.frames().collect::<Vec<_>>(),
        vec![FrameIndex(2), FrameIndex(3), FrameIndex(4)]
    );
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::default(), Fps::whole(60).unwrap());
}

#[test]
fn fps_frame_times_are_exact_for_integer_rates() {
    let fps = Fps::whole(10).unwrap();
    assert_eq!(fps.frame_time_secs(FrameIndex(3)), 0.3);
    assert_eq!(fps.frame_time_secs(FrameIndex(7)), 0.7);
    assert_eq!(fps.secs_to_frames_floor(2.0), 20);
    assert_eq!(fps.secs_to_frames_floor(2.09), 20);
}

#[test]
fn fps_ntsc_counts_whole_frames_only() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert_eq!(fps.secs_to_frames_floor(1.0), 29);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
}

#[test]
fn premul_roundtrip_keeps_opaque_and_clear() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    assert_eq!(c, Rgba8Premul::opaque(200, 100, 50));
    assert_eq!(c.to_straight_rgba(), [200, 100, 50, 255]);
    assert_eq!(Rgba8Premul::transparent().to_straight_rgba(), [0, 0, 0, 0]);
}
