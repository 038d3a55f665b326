use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::default(),
    }
}

fn blank(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn begin_rejects_zero_sized_config() {
    let mut sink = InMemorySink::new();
    assert!(matches!(
        sink.begin(cfg(0, 4)),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn records_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &blank(2, 2)).unwrap();
    sink.push_frame(FrameIndex(1), &blank(2, 2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg(2, 2)));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
    assert_eq!(sink.end_calls(), 1);
}

#[test]
fn out_of_order_frames_are_encode_errors() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(3), &blank(2, 2)).unwrap();
    let err = sink.push_frame(FrameIndex(3), &blank(2, 2)).unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)), "{err}");
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    let err = sink.push_frame(FrameIndex(0), &blank(4, 2)).unwrap_err();
    assert!(err.to_string().contains("frame size mismatch"), "{err}");
}

#[test]
fn push_before_begin_fails() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &blank(1, 1)).is_err());
}
