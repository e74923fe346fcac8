use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use iconpack::batch::{self, DEFAULT_OUTPUT};
use iconpack::{Extract, Platform, ScaleAlgorithm, Settings};

/// Packs images into multi-resolution .ico and .icns files.
///
/// Sizes missing from the inputs are generated from the largest input
/// image.
#[derive(Debug, Parser)]
#[command(name = "iconpack", version)]
struct Cli {
    /// Input files (.ico, .icns, .png, .bmp or .qoi)
    #[arg(short, long = "input", value_delimiter = ',', required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output icon file; .icns writes an Apple icon, anything else an ICO
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Size scheme to generate: 1 windows, 2 favicon, 3 android, 4 ios,
    /// 5 macos (names also accepted)
    #[arg(short, long, conflicts_with = "gen_size")]
    platform: Option<Platform>,

    /// Explicit sizes to generate, comma separated
    #[arg(short, long = "gen-size", value_delimiter = ',')]
    gen_size: Option<Vec<u32>>,

    /// Scaling algorithm: 1 nearest, 2 smooth
    #[arg(short, long = "scale-algorithm", default_value = "smooth")]
    scale_algorithm: ScaleAlgorithm,

    /// Write input images of these sizes as PNG files, comma separated
    #[arg(long = "extract-size", value_delimiter = ',', conflicts_with = "extract_all")]
    extract_size: Option<Vec<u32>>,

    /// Write every input image as a PNG file
    #[arg(long = "extract-all")]
    extract_all: bool,

    /// Keep the annotation text of each image when writing
    #[arg(long = "export-text")]
    export_text: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let extract = if self.extract_all {
            Extract::All
        } else if let Some(ref sizes) = self.extract_size {
            Extract::Sizes(sizes.clone())
        } else {
            Extract::None
        };
        Settings {
            platform: self.platform,
            sizes: self.gen_size.clone(),
            algorithm: self.scale_algorithm,
            export_text: self.export_text,
            extract,
        }
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    let summary = batch::process(&settings, &cli.inputs, &cli.output)
        .with_context(|| format!("failed to build {}", cli.output.display()))?;

    match summary.output {
        Some(ref path) => println!("{}", path.display()),
        None if summary.staged == 0 => bail!("no usable square images in the input files"),
        None => bail!("no icon sizes could be written to {}", cli.output.display()),
    }
    for path in &summary.extracted {
        println!("{}", path.display());
    }
    Ok(())
}
