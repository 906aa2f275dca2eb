use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_dither::{render_frame, suggested_pixel_size, DitherMethod, Frame, PixelSettings};
use pixelart_studio::assets::{AssetLoader, ConfigSource};
use pixelart_studio::media::{decode_png, default_output_name, encode_png, FrameReader, FrameWriter};
use pixelart_studio::models::{AppConfig, PaletteLibrary, SettingsOverrides};
use pixelart_studio::services::{FrameScheduler, SettingsWatcher, DEFAULT_FPS};

#[derive(Parser)]
#[command(name = "pixelart")]
#[command(version, about = "Turn images and raw video frames into palette-limited pixel art")]
struct Cli {
    /// Config file (defaults to CONFIG_FILE, then the embedded config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a PNG image to a pixel-art PNG
    Render {
        /// Source PNG
        input: PathBuf,

        /// Output PNG (default: pixel-art-<unix-millis>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Render a PNG and re-render it whenever the config file changes
    Watch {
        /// Source PNG
        input: PathBuf,

        /// Output PNG, overwritten on every render
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Render a raw RGBA frame stream (e.g. from ffmpeg -f rawvideo -pix_fmt rgba)
    Stream {
        /// Frame width in pixels
        #[arg(long)]
        width: usize,

        /// Frame height in pixels
        #[arg(long)]
        height: usize,

        /// Frame rate of the tick scheduler
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f64,

        /// Raw input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Raw output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List palettes and dither methods
    Palettes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the embedded default config.yaml to disk
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Per-invocation overrides for config settings
#[derive(Args, Debug, Clone, Default)]
struct SettingsArgs {
    /// Block size in source pixels ("auto" picks one from the image width)
    #[arg(short = 's', long)]
    pixel_size: Option<PixelSizeArg>,

    /// Palette id (see `pixelart palettes`)
    #[arg(short, long)]
    palette: Option<String>,

    /// Dither method, e.g. FLOYD_STEINBERG or bayer-4x4
    #[arg(short, long)]
    dither: Option<DitherMethod>,

    /// Dithering intensity, 0.0 - 1.0
    #[arg(long)]
    dithering: Option<f32>,

    #[arg(long)]
    contrast: Option<f32>,

    #[arg(long)]
    brightness: Option<f32>,

    /// Blur radius in reduced pixels
    #[arg(long)]
    blur: Option<f32>,

    #[arg(long)]
    saturation: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
enum PixelSizeArg {
    Auto,
    Fixed(u32),
}

impl std::str::FromStr for PixelSizeArg {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

impl SettingsArgs {
    /// Overrides for a source `width` pixels wide, when known
    fn overrides(&self, width: Option<usize>) -> anyhow::Result<SettingsOverrides> {
        let pixel_size = match (self.pixel_size, width) {
            (None, _) => None,
            (Some(PixelSizeArg::Fixed(size)), _) => Some(size),
            (Some(PixelSizeArg::Auto), Some(width)) => Some(suggested_pixel_size(width)),
            (Some(PixelSizeArg::Auto), None) => {
                bail!("--pixel-size auto needs a known source width")
            }
        };

        Ok(SettingsOverrides {
            pixel_size,
            palette_id: self.palette.clone(),
            dither_method: self.dither,
            dithering: self.dithering,
            contrast: self.contrast,
            brightness: self.brightness,
            blur: self.blur,
            saturation: self.saturation,
        })
    }
}

/// Config, palettes and the loader they came from
struct Session {
    loader: AssetLoader,
    config: AppConfig,
    palettes: Arc<PaletteLibrary>,
}

impl Session {
    fn load(config: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_file = config.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
        let loader = AssetLoader::new(config_file);
        let config = AppConfig::load_from_assets(&loader);
        let palettes = Arc::new(PaletteLibrary::new(&config.palettes)?);
        Ok(Self {
            loader,
            config,
            palettes,
        })
    }

    fn settings(&self, overrides: &SettingsOverrides) -> anyhow::Result<PixelSettings> {
        let mut settings = self.config.settings.clone();
        overrides.apply(&mut settings);
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }

    /// Config file to watch, if the config came from disk
    fn watched_file(&self) -> Option<PathBuf> {
        match self.loader.config_source() {
            ConfigSource::File(path) => Some(path),
            ConfigSource::Embedded => None,
        }
    }
}

fn init_tracing() {
    // stdout may carry frame data, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelart_studio=info,pixel_dither=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            optimize,
            settings,
        }) => run_render_command(cli.config, &input, output, optimize, &settings),
        Some(Commands::Watch {
            input,
            output,
            optimize,
            settings,
        }) => run_watch_command(cli.config, input, output, optimize, &settings).await,
        Some(Commands::Stream {
            width,
            height,
            fps,
            input,
            output,
            settings,
        }) => run_stream_command(cli.config, width, height, fps, input, output, &settings).await,
        Some(Commands::Palettes { json }) => run_palettes_command(cli.config, json),
        Some(Commands::Init { force }) => run_init_command(cli.config, force),
        None => {
            run_status_command(cli.config);
            Ok(())
        }
    }
}

fn read_source(input: &Path) -> anyhow::Result<Frame> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let frame = decode_png(BufReader::new(file))
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    Ok(frame)
}

/// Render one still and write it as PNG, returning the encoded size
fn render_to_file(
    source: &Frame,
    settings: &PixelSettings,
    palettes: &PaletteLibrary,
    output: &Path,
    optimize: bool,
) -> anyhow::Result<usize> {
    let palette = palettes.resolve(&settings.palette_id);
    let rendered = render_frame(source, settings, palette)?;
    let png_bytes = encode_png(&rendered, optimize)?;
    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(png_bytes.len())
}

/// Render a PNG once
fn run_render_command(
    config: Option<PathBuf>,
    input: &Path,
    output: Option<PathBuf>,
    optimize: bool,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let session = Session::load(config)?;
    let source = read_source(input)?;
    let settings = session.settings(&args.overrides(Some(source.width()))?)?;

    let output = output.unwrap_or_else(|| PathBuf::from(default_output_name()));
    let size = render_to_file(&source, &settings, &session.palettes, &output, optimize)?;
    println!("Rendered {} ({} bytes)", output.display(), size);

    Ok(())
}

/// Render a PNG, then again on every settings change until Ctrl-C
async fn run_watch_command(
    config: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
    optimize: bool,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let session = Session::load(config)?;
    let Some(config_path) = session.watched_file() else {
        bail!("watch needs a config file on disk; run `pixelart init` or pass --config");
    };

    let source = Arc::new(read_source(&input)?);
    let overrides = args.overrides(Some(source.width()))?;
    let settings = session.settings(&overrides)?;
    let output = output.unwrap_or_else(|| PathBuf::from(default_output_name()));

    let (sender, mut receiver) = watch::channel(settings);
    let _watcher = SettingsWatcher::spawn(config_path, overrides, sender)?;

    loop {
        let settings = receiver.borrow_and_update().clone();
        let source = source.clone();
        let palettes = session.palettes.clone();
        let target = output.clone();
        let size = tokio::task::spawn_blocking(move || {
            render_to_file(&source, &settings, &palettes, &target, optimize)
        })
        .await??;
        println!("Rendered {} ({} bytes)", output.display(), size);

        tokio::select! {
            changed = receiver.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

/// Render a raw frame stream at a fixed tick rate
async fn run_stream_command(
    config: Option<PathBuf>,
    width: usize,
    height: usize,
    fps: f64,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let session = Session::load(config)?;
    let overrides = args.overrides(Some(width))?;
    let settings = session.settings(&overrides)?;

    let source: Box<dyn Read + Send> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin()),
    };
    let sink: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let (sender, receiver) = watch::channel(settings);
    let scheduler = FrameScheduler::new(fps, session.palettes.clone(), receiver)?;

    // Keep the sender alive even without a watcher so the snapshot stays valid
    let _watcher = match session.watched_file() {
        Some(path) => match SettingsWatcher::spawn(path, overrides, sender.clone()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start settings watcher");
                None
            }
        },
        None => None,
    };

    tracing::info!(width, height, fps, "Streaming");
    let reader = FrameReader::new(source, width, height)?;
    let writer = FrameWriter::new(sink);

    tokio::select! {
        stats = scheduler.run(reader, writer) => {
            let stats = stats?;
            eprintln!(
                "Rendered {} frames ({} ticks skipped, {} failed)",
                stats.rendered, stats.skipped, stats.failed
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }
    drop(sender);

    Ok(())
}

/// List palettes and dither methods
fn run_palettes_command(config: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let session = Session::load(config)?;

    if json {
        let methods: Vec<_> = DitherMethod::ALL
            .iter()
            .map(|m| serde_json::json!({ "id": m, "name": m.display_name() }))
            .collect();
        let palettes: Vec<_> = session.palettes.iter().collect();
        let doc = serde_json::json!({
            "palettes": palettes,
            "ditherMethods": methods,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Palettes:");
    for palette in session.palettes.iter() {
        let colors: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
        println!(
            "  {:<16} {:<20} {}",
            palette.id(),
            palette.name(),
            colors.join(" ")
        );
    }

    println!("\nDither methods:");
    for method in DitherMethod::ALL {
        println!("  {:<20} {}", method.tag(), method.display_name());
    }

    Ok(())
}

/// Write the embedded config to disk
fn run_init_command(config: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let config_file = config.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let report = AssetLoader::new(config_file).init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} (exists, use --force to overwrite)");
    }

    Ok(())
}

/// Display version and configuration status
fn run_status_command(config: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let env_config = std::env::var("CONFIG_FILE").ok();
    let config_file = config.or_else(|| env_config.clone().map(PathBuf::from));
    let loader = AssetLoader::new(config_file.clone());

    println!("pixelart v{VERSION}");
    println!("Pixel-art renderer for images and raw video frames\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        env_config.as_deref().unwrap_or("(not set)")
    );
    let rust_log = std::env::var("RUST_LOG").ok();
    println!(
        "  RUST_LOG    = {}",
        rust_log
            .as_deref()
            .unwrap_or("pixelart_studio=info,pixel_dither=warn (default)")
    );

    let source = match (loader.config_source(), config_file) {
        (ConfigSource::File(path), _) => path.display().to_string(),
        (ConfigSource::Embedded, Some(_)) => "embedded (file not found)".to_string(),
        (ConfigSource::Embedded, None) => "embedded".to_string(),
    };
    println!("\nConfig:  {source}");

    let config = AppConfig::load_from_assets(&loader);
    let palettes = match PaletteLibrary::new(&config.palettes) {
        Ok(library) => library.len(),
        Err(e) => {
            println!("  (invalid palettes: {e})");
            PaletteLibrary::builtin().len()
        }
    };
    let s = &config.settings;
    println!("\nSettings:");
    println!("  pixelSize    = {}", s.pixel_size);
    println!("  paletteId    = {}", s.palette_id);
    println!("  ditherMethod = {}", s.dither_method);
    println!("  dithering    = {}", s.dithering_intensity);
    println!("  contrast     = {}", s.contrast);
    println!("  brightness   = {}", s.brightness);
    println!("  blur         = {}", s.blur);
    println!("  saturation   = {}", s.saturation);

    println!("\n{palettes} palettes, {} dither methods", DitherMethod::ALL.len());
    println!("\nRun 'pixelart --help' for usage.");
}
