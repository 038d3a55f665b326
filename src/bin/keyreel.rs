use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use keyreel::{
    CpuRenderer, DrawableExt as _, EncodeOpts, Fps, ReelScript, RenderOpts,
    RenderSettings, RenderThreading, Renderer as _,
};

#[derive(Parser, Debug)]
#[command(name = "keyreel", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one moment of a reel script as a PNG.
    Frame(FrameArgs),
    /// Render a reel script to a GIF, or to video through `ffmpeg`.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input reel script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input reel script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.gif` writes a GIF, anything else goes through ffmpeg.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    no_progress: bool,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Rasterize frames on a worker pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Rasterize identical frames within a chunk once.
    #[arg(long, default_value_t = false)]
    static_frame_elision: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = ReelScript::from_path(&args.in_path)?;
    let scene = script.to_playbook()?.combined_scene()?;

    let frame = scene.frame(args.time);
    let bounds = frame.bounds();
    let mut renderer = CpuRenderer::new(RenderSettings::default());
    renderer.render(frame.crop(bounds).as_ref())?;
    let pixels = renderer.rendered_pixels()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &pixels.straight_rgba8(),
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let script = ReelScript::from_path(&args.in_path)?;
    let scene = script.to_playbook()?.combined_scene()?;

    let opts = RenderOpts {
        fps: Fps::whole(args.fps)?,
        show_progress: !args.no_progress,
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
            static_frame_elision: args.static_frame_elision,
        },
        encode: EncodeOpts {
            overwrite: !args.no_overwrite,
            ..EncodeOpts::default()
        },
    };
    let stats = scene
        .render(&args.out, &opts)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render stats"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
