use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    /// Log loader and renderer activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the priority-first load order for a sequence length.
    Schedule(ScheduleArgs),
    /// Print the visual state mapped from one progress value.
    State(StateArgs),
    /// Load a frame sequence and render the state at one progress value as a PNG.
    Frame(FrameArgs),
    /// Load a frame sequence and render evenly spaced progress samples as PNGs.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Number of frames.
    #[arg(long)]
    frames: usize,
}

#[derive(Parser, Debug)]
struct StateArgs {
    /// Number of frames.
    #[arg(long)]
    frames: usize,

    /// Scroll progress in [0, 1]; out-of-range values are clamped.
    #[arg(long)]
    progress: f64,

    /// Use the hero-text/overlay/vignette mapping with 1-based frame numbers.
    #[arg(long)]
    classic: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Reel config JSON; frame paths resolve relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Give up waiting for frames after this many seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Reel config JSON; frame paths resolve relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Number of progress samples, including both ends.
    #[arg(long, default_value_t = 11)]
    samples: usize,

    /// Output directory for `sample_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Give up waiting for frames after this many seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::State(args) => cmd_state(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be >= 1");
    print_json(&scrollreel::LoadSchedule::bisection(args.frames))
}

fn cmd_state(args: StateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be >= 1");
    let progress = scrollreel::Progress::new(args.progress);
    if args.classic {
        print_json(&scrollreel::map_classic(progress, args.frames))
    } else {
        print_json(&scrollreel::map_state(progress, args.frames))
    }
}

struct Loaded {
    config: scrollreel::ReelConfig,
    handle: scrollreel::LoadHandle,
}

fn load_sequence(config_path: &Path, timeout: Duration) -> anyhow::Result<Loaded> {
    let config = scrollreel::ReelConfig::from_path(config_path)?;
    let root = config_path.parent().unwrap_or_else(|| Path::new("."));
    let source = scrollreel::DirFrameSource::new(root, config.pattern.clone())?;

    let handle = scrollreel::FrameLoader::new(Arc::new(source), config.loader)
        .on_event(|ev| tracing::debug!(?ev, "load event"))
        .load(config.frame_count)?;
    anyhow::ensure!(
        handle.wait_finished_timeout(timeout),
        "frames still loading after {}s",
        timeout.as_secs()
    );

    let counts = handle.store().counts();
    if counts.failed > 0 {
        tracing::warn!(failed = counts.failed, "some frames failed to load");
    }
    Ok(Loaded { config, handle })
}

fn render_at(
    loaded: &Loaded,
    renderer: &mut scrollreel::Renderer,
    progress: scrollreel::Progress,
    out: &Path,
) -> anyhow::Result<serde_json::Value> {
    let state = scrollreel::map_state(progress, loaded.config.frame_count);
    let mut surface = scrollreel::PixmapSurface::new(loaded.config.canvas);
    let mut styles = scrollreel::StyleTable::new();
    renderer.reset();
    let outcome = renderer.render(&state, &loaded.handle.store(), &mut surface, &mut styles);

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface.save_png(out)?;

    let css: serde_json::Map<String, serde_json::Value> = styles
        .iter()
        .map(|(element, style)| {
            (
                format!("{element:?}"),
                serde_json::json!({
                    "opacity": style.opacity,
                    "transform": style.css_transform(),
                }),
            )
        })
        .collect();

    Ok(serde_json::json!({
        "out": out.display().to_string(),
        "state": state,
        "outcome": outcome,
        "styles": css,
    }))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let loaded = load_sequence(&args.config, Duration::from_secs(args.timeout_secs))?;
    let mut renderer = scrollreel::Renderer::new();
    let report = render_at(
        &loaded,
        &mut renderer,
        scrollreel::Progress::new(args.progress),
        &args.out,
    )?;
    print_json(&report)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.samples >= 2, "--samples must be >= 2");
    let loaded = load_sequence(&args.config, Duration::from_secs(args.timeout_secs))?;
    let mut renderer = scrollreel::Renderer::new();

    let last = (args.samples - 1) as f64;
    let mut reports = Vec::with_capacity(args.samples);
    for i in 0..args.samples {
        let progress = scrollreel::Progress::new(i as f64 / last);
        let out = args.out_dir.join(format!("sample_{i:04}.png"));
        reports.push(render_at(&loaded, &mut renderer, progress, &out)?);
    }
    print_json(&reports)?;
    eprintln!("wrote {} samples to {}", args.samples, args.out_dir.display());
    Ok(())
}
