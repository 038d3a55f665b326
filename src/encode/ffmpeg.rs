use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameGate, FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8Premul};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file; ffmpeg picks the container from the extension.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Straight-alpha RGBA8 that transparent pixels are flattened over.
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// H.264 video through a system `ffmpeg` process fed raw RGBA on stdin.
///
/// Frames are flattened to opaque pixels before writing. yuv420p needs even dimensions, so odd
/// sizes are padded by an ffmpeg filter.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    process: Option<FfmpegProcess>,
    opaque: Vec<u8>,
    gate: FrameGate,
}

struct FfmpegProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            process: None,
            opaque: Vec::new(),
            gate: FrameGate::default(),
        }
    }

    fn command(&self, cfg: &SinkConfig) -> Command {
        let size = format!("{}x{}", cfg.width, cfg.height);
        let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);

        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgba", "-s", &size, "-r", &rate])
            .args(["-i", "pipe:0", "-an"]);
        if needs_even_padding(cfg) {
            cmd.args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"]);
        }
        cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"])
            .arg(&self.opts.out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl FfmpegProcess {
    fn spawn(mut cmd: Command) -> ReelResult<Self> {
        let mut child = cmd
            .spawn()
            .map_err(|e| ReelError::encode(format!("could not start ffmpeg: {e}")))?;
        let stdin = child.stdin.take();
        let mut pipe = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg stderr was not captured"))?;
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> ReelResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ReelError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| ReelError::encode(format!("writing a frame to ffmpeg failed: {e}")))
    }

    /// Close stdin, wait for exit and turn a failing status into an error carrying stderr.
    fn finish(mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| ReelError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let stderr = self
            .stderr
            .join()
            .map_err(|_| ReelError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| ReelError::encode(format!("reading ffmpeg stderr failed: {e}")))?;
        if status.success() {
            return Ok(());
        }
        Err(ReelError::encode(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&stderr).trim()
        )))
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.gate.open(cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(ReelError::encode(
                "video output needs `ffmpeg` on PATH; write a .gif instead or install ffmpeg",
            ));
        }

        self.process = Some(FfmpegProcess::spawn(self.command(&cfg))?);
        self.opaque = vec![0u8; cfg.frame_len()];
        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.gate.admit(idx, frame)?;
        let process = self
            .process
            .as_mut()
            .ok_or_else(|| ReelError::encode("ffmpeg sink is not running"))?;
        flatten_onto(&mut self.opaque, frame, self.opts.bg_rgba)?;
        process.write(&self.opaque)
    }

    fn end(&mut self) -> ReelResult<()> {
        self.gate.close();
        // Nothing to reap when begin failed before spawning.
        let Some(process) = self.process.take() else {
            return Ok(());
        };
        process.finish()?;
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

fn needs_even_padding(cfg: &SinkConfig) -> bool {
    cfg.width % 2 == 1 || cfg.height % 2 == 1
}

/// Composite `frame` over the opaque background `bg_rgba` into `dst`.
fn flatten_onto(dst: &mut [u8], frame: &FrameRGBA, bg_rgba: [u8; 4]) -> ReelResult<()> {
    if dst.len() != frame.data.len() || dst.len() % 4 != 0 {
        return Err(ReelError::encode(format!(
            "cannot flatten {} bytes of rgba into a {} byte buffer",
            frame.data.len(),
            dst.len()
        )));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let px = if frame.premultiplied {
            Rgba8Premul {
                r: s[0],
                g: s[1],
                b: s[2],
                a: s[3],
            }
        } else {
            Rgba8Premul::from_straight_rgba(s[0], s[1], s[2], s[3])
        };
        let inv = 255 - u16::from(px.a);
        let over = |c: u8, bg: u8| -> u8 {
            (u16::from(c) + mul_div255_u16(u16::from(bg), inv)).min(255) as u8
        };
        d.copy_from_slice(&[
            over(px.r, bg_rgba[0]),
            over(px.g, bg_rgba[1]),
            over(px.b, bg_rgba[2]),
            255,
        ]);
    }
    Ok(())
}

/// Create the directory `path` will be written into.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    use anyhow::Context as _;

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))
            .map_err(ReelError::from),
        _ => Ok(()),
    }
}

/// Whether an `ffmpeg` binary answers `-version`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
