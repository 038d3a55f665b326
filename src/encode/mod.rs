//! Frame sinks: in-memory capture, animated GIF, and `ffmpeg` video.

use std::path::Path;

/// System `ffmpeg` sink.
pub mod ffmpeg;
/// Animated GIF sink.
pub mod gif;
/// Sink contract.
pub mod sink;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use gif::GifSink;
pub use sink::{FrameSink, InMemorySink, SinkConfig};

/// Output options shared by the file sinks.
#[derive(Clone, Debug)]
pub struct EncodeOpts {
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Straight-alpha RGBA used to flatten transparency for formats without alpha.
    pub bg_rgba: [u8; 4],
}

impl Default for EncodeOpts {
    fn default() -> Self {
        Self {
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// Pick a sink from the extension of `path`: `.gif` writes a GIF, anything else goes to `ffmpeg`.
pub fn sink_for_path(path: &Path, opts: &EncodeOpts) -> Box<dyn FrameSink> {
    let is_gif = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if is_gif {
        Box::new(GifSink::new(path, opts.overwrite))
    } else {
        Box::new(FfmpegSink::new(FfmpegSinkOpts {
            out_path: path.to_path_buf(),
            overwrite: opts.overwrite,
            bg_rgba: opts.bg_rgba,
        }))
    }
}
