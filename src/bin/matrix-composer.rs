use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use matrix_composer::{LoopConfig, Orchestrator, Pacing, TerminalSink, TerminalSinkOpts, demo, save_png};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "matrix-composer", version, about = "Animated scenes for small pixel grids")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the built-in demo in the terminal.
    Demo(DemoArgs),
    /// Render one frame of the demo as a PNG.
    Frame(FrameArgs),
    /// Print the demo scene report at a point in time as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Loop configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Pack two pixel rows into each terminal cell.
    #[arg(long)]
    half_blocks: bool,

    /// Outline the focused node.
    #[arg(long)]
    debug: bool,

    /// Log file; the terminal is busy drawing frames.
    #[arg(long, default_value = "matrix-composer.log")]
    log_file: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Loop configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Demo scene to render.
    #[arg(long, default_value = "bars")]
    scene: String,

    /// Scene time in seconds.
    #[arg(long, default_value_t = 1.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Loop configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Demo scene to inspect.
    #[arg(long, default_value = "bars")]
    scene: String,

    /// Scene time in seconds.
    #[arg(long, default_value_t = 1.0)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("create log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if let Err(err) = installed {
        eprintln!("tracing already initialised: {err}");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LoopConfig> {
    Ok(match path {
        Some(p) => LoopConfig::from_json_file(p)?,
        None => LoopConfig::default(),
    })
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    init_tracing(Some(&args.log_file))?;
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.debug_focus |= args.debug;
    cfg.validate()?;

    let mut orch = demo::orchestrator(cfg)?;
    orch.transition_to("bars")?;

    let opts = TerminalSinkOpts {
        half_blocks: args.half_blocks,
        ..TerminalSinkOpts::default()
    };
    let mut sink = TerminalSink::stdout(opts);
    let stop = orch.stop_handle();
    let reader = orch
        .input()
        .spawn_terminal_reader(stop.clone())
        .context("spawn input reader")?;

    let result = orch.run(&mut sink, args.duration);
    stop.stop();
    if reader.join().is_err() {
        tracing::warn!("input reader panicked");
    }
    drop(sink);

    let stats = result?;
    eprintln!(
        "rendered {} frames in {:.2}s ({} over budget)",
        stats.frames, stats.elapsed, stats.overruns
    );
    Ok(())
}

/// Build the demo, enter `scene` and step frames up to scene time `t`.
fn demo_at(config: Option<&Path>, scene: &str, t: f64) -> anyhow::Result<Orchestrator> {
    let mut cfg = load_config(config)?;
    cfg.pacing = Pacing::FixedStep;
    let mut orch = demo::orchestrator(cfg)?;
    orch.transition_to(scene)?;

    let step = 1.0 / f64::from(cfg.fps);
    let mut now = 0.0;
    while now < t {
        orch.render_frame(now);
        now += step;
    }
    orch.render_frame(t.max(0.0));
    Ok(orch)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    init_tracing(None)?;
    let mut orch = demo_at(args.config.as_deref(), &args.scene, args.time)?;
    let frame = orch.render_frame(args.time.max(0.0));
    save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    init_tracing(None)?;
    let orch = demo_at(args.config.as_deref(), &args.scene, args.time)?;
    let scene = orch
        .active_scene()
        .context("demo has no active scene")?;
    let json = serde_json::to_string_pretty(&scene.report()).context("serialise scene report")?;
    println!("{json}");
    Ok(())
}
