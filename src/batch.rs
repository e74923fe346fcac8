//! The command-line pipeline: load every input, build the output pack,
//! write it, then optionally extract input images as PNG files.

use std::path::{Path, PathBuf};

use super::buffer::PixelBuffer;
use super::container::{self, ContainerFormat, DecodedImage};
use super::error::{self, Diagnostic, Result};
use super::pack::IconPack;
use super::platform::Platform;
use super::resize::Target;
use super::settings::Settings;
use super::textchunk;

/// The output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "output.ico";

/// What a batch run produced.
#[derive(Debug, Default)]
pub struct Summary {
    /// Square input images kept for the output pack.
    pub staged: usize,
    /// Output slots copied from an input of the same size.
    pub copied: usize,
    /// Output slots generated by resampling.
    pub generated: usize,
    /// The icon file written, if any.
    pub output: Option<PathBuf>,
    /// PNG files written by extraction.
    pub extracted: Vec<PathBuf>,
    /// Everything that was skipped along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Returns the file name of an extracted image: `{base}_{size}x{size}.png`.
pub fn png_file_name(base: &str, size: u32) -> String {
    format!("{}_{}x{}.png", base, size, size)
}

/// Runs the whole pipeline over `inputs`, writing the pack to `output`.
pub fn process<P: AsRef<Path>>(settings: &Settings, inputs: &[P], output: &Path) -> Result<Summary> {
    let mut summary = Summary::default();

    let mut staged: Vec<DecodedImage> = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        tracing::info!("reading {}", input.display());
        let images = container::decode_file(input, &mut summary.diagnostics)?;
        for image in images {
            if image.pixels.is_square() {
                staged.push(image);
            } else {
                error::record(&mut summary.diagnostics,
                              Diagnostic::GeometryMismatch {
                                  width: image.pixels.width(),
                                  height: image.pixels.height(),
                              });
            }
        }
    }
    summary.staged = staged.len();

    let mut pack = match settings.sizes {
        Some(ref sizes) => IconPack::with_sizes(sizes)?,
        None => IconPack::new(settings.platform.unwrap_or(Platform::Windows)),
    };
    for image in &staged {
        if let Some(index) = pack.index_of(image.size()) {
            if !pack.entries()[index].is_valid() {
                pack.load_images(Some(image.clone()));
                summary.copied += 1;
            }
        }
    }
    if let Some(source) = largest(&staged) {
        summary.generated = pack.generate_from(source, Target::All, settings.algorithm)?;
    }

    let format = ContainerFormat::from_path(output);
    let export = pack.save(output, format, &settings.export_options())?;
    summary.diagnostics.extend(export.diagnostics);
    if export.bytes.is_some() {
        summary.output = Some(output.to_path_buf());
    }

    summary.extracted = extract(settings, &staged, output)?;
    tracing::info!("{} staged, {} copied, {} generated, {} extracted",
                   summary.staged,
                   summary.copied,
                   summary.generated,
                   summary.extracted.len());
    Ok(summary)
}

/// Returns the largest staged image; ties go to the first one read.
fn largest(staged: &[DecodedImage]) -> Option<&PixelBuffer> {
    let mut best: Option<&DecodedImage> = None;
    for image in staged {
        if best.map_or(true, |current| image.size() > current.size()) {
            best = Some(image);
        }
    }
    best.map(|image| &image.pixels)
}

/// Writes the staged images selected by `settings.extract` next to the
/// output file.  Only the first image of each size is written.
fn extract(settings: &Settings, staged: &[DecodedImage], output: &Path) -> Result<Vec<PathBuf>> {
    let base = output.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    let directory = output.parent().unwrap_or_else(|| Path::new(""));
    let mut written: Vec<u32> = Vec::new();
    let mut paths = Vec::new();
    for image in staged {
        let size = image.size();
        if !settings.extract.includes(size) || written.contains(&size) {
            continue;
        }
        let mut png = image.pixels.to_png()?;
        if settings.export_text && !image.text.is_empty() {
            png = textchunk::embed(&png, image.text.as_bytes())?;
        }
        let path = directory.join(png_file_name(base, size));
        std::fs::write(&path, &png)?;
        tracing::info!("extracted {}", path.display());
        written.push(size);
        paths.push(path);
    }
    Ok(paths)
}
