use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mediamerge::AudioDecoder as _;

#[derive(Parser, Debug)]
#[command(name = "mediamerge", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ffmpeg command a project would run.
    Plan(PlanArgs),
    /// Merge a project's inputs into one video (requires `ffmpeg` on PATH).
    Compose(ComposeArgs),
    /// Render an audio file's waveform preview as a PNG.
    Waveform(WaveformArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input project manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the manifest's target height (e.g. 720).
    #[arg(long)]
    resolution: Option<mediamerge::Resolution>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input project manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Where to write the merged video (defaults to `merged_video.<ext>` next to the manifest).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the manifest's target height (e.g. 720).
    #[arg(long)]
    resolution: Option<mediamerge::Resolution>,

    /// Keep ffmpeg's scratch directory for inspection.
    #[arg(long, default_value_t = false)]
    keep_work_dir: bool,
}

#[derive(Parser, Debug)]
struct WaveformArgs {
    /// Input audio file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Width in pixel columns.
    #[arg(long, default_value_t = mediamerge::DEFAULT_WAVEFORM_WIDTH)]
    width: u32,

    /// Height in pixels.
    #[arg(long, default_value_t = mediamerge::DEFAULT_WAVEFORM_HEIGHT)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Waveform(args) => cmd_waveform(args),
    }
}

fn load_registry(manifest: &mediamerge::ProjectManifest) -> mediamerge::TrackRegistry {
    let mut registry = mediamerge::TrackRegistry::new();
    for item in manifest.ingest_items() {
        let name = item.source.file_name().to_string();
        if registry.ingest(item).is_none() {
            eprintln!("skipped {name}: unsupported media type");
        }
    }
    registry
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let manifest = mediamerge::ProjectManifest::from_path(&args.in_path)?;
    let registry = load_registry(&manifest);
    let resolution = args.resolution.unwrap_or(manifest.resolution);

    let plan = mediamerge::compile_plan(&registry, resolution, &manifest.command_options())?;
    for id in plan.streams.order() {
        let Some(track) = registry.get(*id) else {
            continue;
        };
        let Some(index) = plan.streams.index_of(*id) else {
            continue;
        };
        eprintln!(
            "  [{index}] {:<5} {}",
            track.kind().label(),
            track.source().file_name()
        );
    }
    println!("{}", plan.command.to_command_line("ffmpeg"));
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let manifest = mediamerge::ProjectManifest::from_path(&args.in_path)?;
    let resolution = args.resolution.unwrap_or(manifest.resolution);

    let backend = mediamerge::FfmpegBackend::new(mediamerge::FfmpegBackendOpts {
        keep_work_dir: args.keep_work_dir,
        ..mediamerge::FfmpegBackendOpts::default()
    });
    let mut session = mediamerge::MergeSession::new(
        backend,
        std::sync::Arc::new(mediamerge::FfmpegAudioDecoder::default()),
        mediamerge::MergeSessionOpts {
            command: manifest.command_options(),
            previews: false,
            ..mediamerge::MergeSessionOpts::default()
        },
    );

    let report = session.ingest(manifest.ingest_items());
    for name in &report.skipped {
        eprintln!("skipped {name}: unsupported media type");
    }

    match session.handle(mediamerge::SessionEvent::RenderRequested { resolution }) {
        mediamerge::SessionUpdate::Rendered(output) => {
            let out_path = args.out.unwrap_or_else(|| {
                args.in_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(&output.file_name)
            });
            mediamerge::ensure_parent_dir(&out_path)?;
            std::fs::write(&out_path, &output.bytes)
                .with_context(|| format!("write merged video '{}'", out_path.display()))?;
            eprintln!("wrote {}", out_path.display());
            Ok(())
        }
        mediamerge::SessionUpdate::Failed { notification } => anyhow::bail!(notification),
        mediamerge::SessionUpdate::Ingested(_) | mediamerge::SessionUpdate::Previews(_) => {
            anyhow::bail!("render request produced an unexpected update (bug)")
        }
    }
}

fn cmd_waveform(args: WaveformArgs) -> anyhow::Result<()> {
    let source = mediamerge::MediaSource::from_path(&args.in_path);
    let pcm = mediamerge::FfmpegAudioDecoder::default()
        .decode_first_channel(&source)
        .with_context(|| format!("decode audio '{}'", args.in_path.display()))?;
    let waveform = mediamerge::extract_waveform(&pcm.samples, args.width)?;
    mediamerge::save_waveform_png(
        &waveform,
        args.height,
        mediamerge::WaveformStyle::default(),
        &args.out,
    )?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
