use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{
    drawable::{DrawableExt, DrawableRef},
    encode::{EncodeOpts, FrameSink, SinkConfig, sink_for_path},
    foundation::core::{Fps, FrameIndex, FrameRange, Rect},
    foundation::error::{ReelError, ReelResult},
    render::backend::{FrameRGBA, RenderSettings, Renderer},
    render::cpu::{CpuRenderer, surface_size},
    render::display_list::DisplayList,
    scene::scene::Scene,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Rasterize frames on a worker pool when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Rasterize identical frames within a chunk only once (parallel mode).
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total frames pushed to the sink.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

/// Options for [`render_scene`] and [`Scene::render`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Output frame rate.
    pub fps: Fps,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
    /// Sequential or parallel rasterization.
    pub threading: RenderThreading,
    /// File sink options used by [`Scene::render`].
    pub encode: EncodeOpts,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            show_progress: true,
            threading: RenderThreading::default(),
            encode: EncodeOpts::default(),
        }
    }
}

impl Scene {
    /// Render to `path` with a default [`CpuRenderer`]. The sink follows the file extension.
    pub fn render(&self, path: impl AsRef<Path>, opts: &RenderOpts) -> ReelResult<RenderStats> {
        let mut renderer = CpuRenderer::default();
        self.render_with(path, &mut renderer, opts)
    }

    /// Render to `path` with the caller's renderer.
    pub fn render_with(
        &self,
        path: impl AsRef<Path>,
        renderer: &mut dyn Renderer,
        opts: &RenderOpts,
    ) -> ReelResult<RenderStats> {
        let mut sink = sink_for_path(path.as_ref(), &opts.encode);
        render_scene(self, sink.as_mut(), renderer, opts)
    }
}

/// Number of frames a scene of `duration` seconds produces at `fps`.
pub fn total_frames(duration: f64, fps: Fps) -> ReelResult<u64> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(ReelError::validation(format!(
            "scene duration must be finite and >= 0, got {duration}"
        )));
    }
    let frames = fps.secs_to_frames_floor(duration);
    if frames == 0 {
        return Err(ReelError::validation(format!(
            "scene of {duration}s yields no frames at {} fps",
            fps.as_f64()
        )));
    }
    Ok(frames)
}

/// Drive the frame loop of `scene` into `sink`.
///
/// Frame `k` is sampled at `k / fps` seconds. Every frame is cropped to the bounds of frame 0,
/// so all frames share one pixel size. The sink is ended on every exit path.
#[tracing::instrument(
    skip(scene, sink, renderer, opts),
    fields(duration = scene.duration(), fps = opts.fps.as_f64())
)]
pub fn render_scene(
    scene: &Scene,
    sink: &mut dyn FrameSink,
    renderer: &mut dyn Renderer,
    opts: &RenderOpts,
) -> ReelResult<RenderStats> {
    let frames = total_frames(scene.duration(), opts.fps)?;
    let range = FrameRange::new(FrameIndex(0), FrameIndex(frames))?;

    let parallel = if opts.threading.parallel {
        let settings = renderer.worker_settings().ok_or_else(|| {
            ReelError::validation("parallel render requires a renderer with worker settings")
        })?;
        Some((settings, build_thread_pool(opts.threading.threads)?))
    } else {
        None
    };

    let first = scene.frame(0.0);
    let fixed_bounds = first.bounds();
    let (width, height) = surface_size(fixed_bounds)?;
    let cfg = SinkConfig {
        width: u32::from(width),
        height: u32::from(height),
        fps: opts.fps,
    };

    let progress = progress_bar(range.len_frames(), opts.show_progress);
    let job = FrameJob {
        scene,
        first,
        fixed_bounds,
        fps: opts.fps,
        progress: &progress,
    };
    let mut sink = EndGuard::new(sink);
    let result = sink.begin(cfg).and_then(|()| match &parallel {
        Some((settings, pool)) => {
            job.run_parallel(range, &mut *sink.sink, settings, &opts.threading, pool)
        }
        None => job.run_sequential(range, &mut *sink.sink, renderer),
    });
    progress.finish_and_clear();

    let ended = sink.end();
    match (result, ended) {
        (Ok(stats), Ok(())) => {
            tracing::debug!(
                frames = stats.frames_total,
                elided = stats.frames_elided,
                "render finished"
            );
            Ok(stats)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(end_err)) => {
            tracing::warn!(error = %end_err, "closing the sink failed after a render error");
            Err(e)
        }
    }
}

/// Ends the wrapped sink on drop unless [`EndGuard::end`] already ran, so a panicking frame
/// still closes the output.
struct EndGuard<'a> {
    sink: &'a mut dyn FrameSink,
    ended: bool,
}

impl<'a> EndGuard<'a> {
    fn new(sink: &'a mut dyn FrameSink) -> Self {
        Self { sink, ended: false }
    }

    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.sink.begin(cfg)
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        self.sink.end()
    }
}

impl Drop for EndGuard<'_> {
    fn drop(&mut self) {
        if self.ended {
            return;
        }
        if let Err(e) = self.sink.end() {
            tracing::warn!(error = %e, "closing the sink failed while unwinding");
        }
    }
}

struct FrameJob<'a> {
    scene: &'a Scene,
    /// Frame 0, already evaluated to find the fixed bounds.
    first: DrawableRef,
    fixed_bounds: Rect,
    fps: Fps,
    progress: &'a ProgressBar,
}

impl FrameJob<'_> {
    fn frame(&self, idx: FrameIndex) -> DrawableRef {
        let frame = if idx.0 == 0 {
            Arc::clone(&self.first)
        } else {
            self.scene.frame(self.fps.frame_time_secs(idx))
        };
        frame.crop(self.fixed_bounds)
    }

    fn run_sequential(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
        renderer: &mut dyn Renderer,
    ) -> ReelResult<RenderStats> {
        let mut stats = RenderStats::default();
        for idx in range.frames() {
            let frame = self.frame(idx);
            renderer.render(frame.as_ref())?;
            sink.push_frame(idx, &renderer.rendered_pixels()?)?;
            stats.frames_total += 1;
            stats.frames_rendered += 1;
            self.progress.inc(1);
        }
        Ok(stats)
    }

    fn run_parallel(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
        settings: &RenderSettings,
        threading: &RenderThreading,
        pool: &rayon::ThreadPool,
    ) -> ReelResult<RenderStats> {
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut stats = RenderStats::default();

        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;

            // Time cursors are shared, so recording stays on this thread.
            let lists: Vec<DisplayList> = chunk
                .frames()
                .map(|idx| DisplayList::record(self.frame(idx).as_ref()))
                .collect();

            let out = rasterize_chunk(&lists, settings, threading.static_frame_elision, pool)?;
            for (idx, &u) in chunk.frames().zip(&out.frame_to_unique) {
                let pixels = out.unique_frames.get(u).ok_or_else(|| {
                    ReelError::render("internal error: unique frame index out of range")
                })?;
                sink.push_frame(idx, pixels)?;
                self.progress.inc(1);
            }

            tracing::debug!(
                start = chunk_start,
                end = chunk_end,
                rendered = out.stats.frames_rendered,
                elided = out.stats.frames_elided,
                "chunk done"
            );
            stats.frames_total += out.stats.frames_total;
            stats.frames_rendered += out.stats.frames_rendered;
            stats.frames_elided += out.stats.frames_elided;
            chunk_start = chunk_end;
        }
        Ok(stats)
    }
}

struct ChunkOut {
    unique_frames: Vec<FrameRGBA>,
    frame_to_unique: Vec<usize>,
    stats: RenderStats,
}

fn rasterize_chunk(
    lists: &[DisplayList],
    settings: &RenderSettings,
    static_frame_elision: bool,
    pool: &rayon::ThreadPool,
) -> ReelResult<ChunkOut> {
    let mut unique_indices = Vec::<usize>::with_capacity(lists.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(lists.len());
    if static_frame_elision {
        let mut first = HashMap::<u64, usize>::new();
        for (idx, list) in lists.iter().enumerate() {
            let fingerprint = list.fingerprint();
            match first.get(&fingerprint).copied() {
                Some(slot) if lists[unique_indices[slot]] == *list => frame_to_unique.push(slot),
                _ => {
                    let slot = unique_indices.len();
                    unique_indices.push(idx);
                    first.entry(fingerprint).or_insert(slot);
                    frame_to_unique.push(slot);
                }
            }
        }
    } else {
        for idx in 0..lists.len() {
            frame_to_unique.push(idx);
            unique_indices.push(idx);
        }
    }

    let rendered = pool.install(|| {
        unique_indices
            .par_iter()
            .map_init(
                || CpuRenderer::new(settings.clone()),
                |worker, &list_idx| -> ReelResult<FrameRGBA> {
                    worker.render_list(&lists[list_idx])?;
                    worker.take_pixels()
                },
            )
            .collect::<Vec<_>>()
    });

    let unique_frames = rendered.into_iter().collect::<ReelResult<Vec<_>>>()?;

    let total = lists.len() as u64;
    let rendered_count = unique_indices.len() as u64;
    Ok(ChunkOut {
        unique_frames,
        frame_to_unique,
        stats: RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
        },
    })
}

fn progress_bar(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} frames {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render.rs"]
mod tests;
