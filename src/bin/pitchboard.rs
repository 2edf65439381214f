use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "pitchboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the board at one point of its timeline as a PNG.
    Still(StillArgs),
    /// Render the whole timeline as an MP4 (requires `ffmpeg` on PATH).
    Video(VideoArgs),
    /// Print a summary of a saved design.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Timeline position in seconds; the board as saved when omitted.
    #[arg(long)]
    at: Option<f64>,

    /// Longest edge of the output, for thumbnails.
    #[arg(long)]
    max_edge: Option<u32>,

    /// Surface width before fitting to the pitch aspect.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height bound; defaults to the width.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 12)]
    fps: u32,

    /// Surface width before fitting to the pitch aspect.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height bound; defaults to the width.
    #[arg(long)]
    height: Option<u32>,

    /// Replace an existing output file.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame rate used for the frame count.
    #[arg(long, default_value_t = 12)]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Video(args) => cmd_video(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn open_design(path: &Path, width: u32, height: Option<u32>) -> anyhow::Result<pitchboard::Designer> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read design '{}'", path.display()))?;
    let design = pitchboard::Design::from_json_str(&json);
    let bounds = pitchboard::SurfaceSize::new(width, height.unwrap_or(width));
    let opts = pitchboard::DesignerOpts::default().with_surface(bounds);
    Ok(pitchboard::Designer::from_design(design, opts))
}

fn make_surface(board: &pitchboard::Designer, even: bool) -> anyhow::Result<pitchboard::CpuSurface> {
    let mut size = board.surface_size();
    if even {
        // yuv420p needs even dimensions.
        size = pitchboard::SurfaceSize::new((size.width & !1).max(2), (size.height & !1).max(2));
    }
    let opts = pitchboard::CpuSurfaceOpts::default().with_size(size);
    Ok(pitchboard::CpuSurface::new(opts)?)
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut board = open_design(&args.in_path, args.width, args.height)?;
    if let Some(t) = args.at {
        board.seek(t);
    }
    let mut surface = make_surface(&board, false)?;

    let png = match args.max_edge {
        Some(edge) => {
            let frame = board.render_still(&mut surface)?;
            pitchboard::encode::png::encode_thumbnail_png(&frame, edge)?
        }
        None => board.still_png(&mut surface)?,
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let mut board = open_design(&args.in_path, args.width, args.height)?;
    anyhow::ensure!(
        board.duration() > 0.0,
        "design '{}' has no animated steps",
        args.in_path.display()
    );
    let mut surface = make_surface(&board, true)?;

    let fps = pitchboard::Fps::new(args.fps, 1)?;
    let opts = pitchboard::ExportOpts::default().with_fps(fps);
    let sink_opts = pitchboard::FfmpegSinkOpts::new(&args.out).with_overwrite(args.overwrite);
    let mut sink = pitchboard::FfmpegSink::new(sink_opts);

    let frames = board.export_video(opts, &mut surface, &mut sink)?;

    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let board = open_design(&args.in_path, 800, None)?;
    let fps = pitchboard::Fps::new(args.fps, 1)?;
    let plan = board.export_plan(pitchboard::ExportOpts::default().with_fps(fps));

    println!("id:       {}", board.id());
    println!("name:     {}", board.name());
    println!("pitch:    {}", board.pitch().name);
    println!("items:    {}", board.items().len());
    println!("duration: {:.2}s", board.duration());
    println!("frames:   {} @ {} fps", plan.frame_count, args.fps);
    for (i, step) in board.steps().iter().enumerate() {
        let state = if step.is_complete() { "" } else { " (incomplete)" };
        println!(
            "  {:>2}. {} [{:.2}s @ {:.2}s]{state}",
            i + 1,
            step.name,
            step.effective_duration(),
            board.step_start_time(i),
        );
    }
    if !board.notes().is_empty() {
        println!("notes:    {}", board.notes());
    }
    Ok(())
}
