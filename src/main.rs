use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use graph4::{DitherAlgorithm, OutputFormat, PalettePolicy, ViewportHeight};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msx_g4::models::ExportConfig;
use msx_g4::rendering::render_preview;
use msx_g4::services::{load_png, run_export, ExportOutcome};

#[derive(Parser)]
#[command(name = "msx-g4")]
#[command(about = "Convert PNG images to MSX2 GRAPHICS 4 (SCREEN 5) files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image and write the SCREEN 5 files
    Convert {
        /// Input PNG file
        input: PathBuf,

        #[command(flatten)]
        options: ExportOptions,

        /// Only quantize in memory, write no MSX files
        #[arg(long)]
        in_memory: bool,

        /// Write a PNG preview of the converted image
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Print the palette that would be used for an image
    Palette {
        /// Input PNG file
        input: PathBuf,

        #[command(flatten)]
        options: ExportOptions,
    },
}

/// Command-line overrides for the YAML configuration.
#[derive(Args)]
struct ExportOptions {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output layout: combined, split, raw or headerless
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Directory for the output files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base name of the output files (default NONAME)
    #[arg(short, long)]
    name: Option<String>,

    /// Enable error diffusion dithering
    #[arg(long, conflicts_with = "no_dither")]
    dither: bool,

    /// Disable dithering
    #[arg(long)]
    no_dither: bool,

    /// Dither strength, 0.0 to 1.0
    #[arg(long)]
    strength: Option<f32>,

    /// Diffusion kernel (floyd-steinberg, atkinson, sierra-lite, sierra-two-row, jarvis-judice-ninke)
    #[arg(long)]
    algorithm: Option<DitherAlgorithm>,

    /// Reserve palette index 0 for transparent pixels
    #[arg(long)]
    reserve_index0: bool,

    /// Treat this color as transparent (e.g. "#ff00ff")
    #[arg(long)]
    transparent: Option<String>,

    /// Visible lines per page: 192 or 212
    #[arg(long)]
    viewport: Option<ViewportHeight>,

    /// Fallback when the image has too many colors (most-frequent, merge-nearest)
    #[arg(long)]
    palette_policy: Option<PalettePolicy>,

    /// Also write a .PAL file for combined and headerless output
    #[arg(long)]
    export_palette: bool,

    /// Write a .TXT palette listing
    #[arg(long)]
    palette_text: bool,

    /// Omit BSAVE headers
    #[arg(long)]
    no_bsave_header: bool,
}

impl ExportOptions {
    /// Load the configuration file, if any, and apply the flags on top.
    fn into_config(self) -> anyhow::Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::load(path)?,
            None => ExportConfig::default(),
        };

        if let Some(format) = self.format {
            config.output_format = format.name().to_string();
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        if self.dither {
            config.dithering = true;
        }
        if self.no_dither {
            config.dithering = false;
        }
        if let Some(strength) = self.strength {
            config.dither_strength = strength;
        }
        if let Some(algorithm) = self.algorithm {
            config.dither_algorithm = algorithm.name().to_string();
        }
        if self.reserve_index0 {
            config.reserve_index_0 = true;
        }
        if let Some(color) = self.transparent {
            config.transparent_color = Some(color);
        }
        if let Some(viewport) = self.viewport {
            config.viewport_height = viewport.lines() as u16;
        }
        if let Some(policy) = self.palette_policy {
            config.palette_policy = policy.name().to_string();
        }
        if self.export_palette {
            config.export_palette = true;
        }
        if self.palette_text {
            config.palette_text = true;
        }
        if self.no_bsave_header {
            config.bsave_header = false;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msx_g4=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert {
            input,
            options,
            in_memory,
            preview,
        } => run_convert_command(input, options, in_memory, preview),
        Commands::Palette { input, options } => run_palette_command(input, options),
    }
}

fn run_convert_command(
    input: PathBuf,
    options: ExportOptions,
    in_memory: bool,
    preview: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = options.into_config()?;
    if in_memory {
        config.write_to_disk = false;
    }
    let settings = config.resolve()?;

    let image = load_png(&input)?;
    let outcome = run_export(&image.source()?, &settings)?;

    match &outcome {
        ExportOutcome::Written { paths, .. } => {
            for path in paths {
                println!("{}", path.display());
            }
        }
        ExportOutcome::InMemory(image) => {
            let stats = image.stats();
            println!(
                "{}x{} quantized to {} of {} colors",
                image.width(),
                image.height(),
                image.palette().used_colors(),
                stats.distinct_colors
            );
        }
    }

    if let Some(path) = preview {
        let png = render_preview(outcome.image())?;
        std::fs::write(&path, &png)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        println!("Preview saved to {}", path.display());
    }

    Ok(())
}

fn run_palette_command(input: PathBuf, options: ExportOptions) -> anyhow::Result<()> {
    let settings = options.into_config()?.resolve()?;
    let image = load_png(&input)?;
    let indexed = settings.encoder.quantize(&image.source()?)?;

    let stats = indexed.stats();
    print!("{}", indexed.palette().to_text());
    println!(
        "{} distinct colors, {} slots{}",
        stats.distinct_colors,
        stats.capacity,
        if stats.overflowed() {
            ", fallback used"
        } else {
            ""
        }
    );
    Ok(())
}
