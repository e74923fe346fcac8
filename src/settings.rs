//! Typed configuration for loading, generating and exporting icon packs.

use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

use super::error::{Error, Result};
use super::platform::Platform;

/// The resampling filter used when generating missing sizes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScaleAlgorithm {
    /// Nearest-neighbor sampling; keeps hard pixel edges.
    Nearest,
    /// Bicubic (Catmull-Rom) sampling.
    #[default]
    Smooth,
}

impl ScaleAlgorithm {
    pub(crate) fn filter_type(self) -> FilterType {
        match self {
            ScaleAlgorithm::Nearest => FilterType::Nearest,
            ScaleAlgorithm::Smooth => FilterType::CatmullRom,
        }
    }
}

impl fmt::Display for ScaleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScaleAlgorithm::Nearest => f.write_str("nearest"),
            ScaleAlgorithm::Smooth => f.write_str("smooth"),
        }
    }
}

impl FromStr for ScaleAlgorithm {
    type Err = Error;

    fn from_str(string: &str) -> Result<ScaleAlgorithm> {
        match string.to_ascii_lowercase().as_str() {
            "nearest" | "1" => Ok(ScaleAlgorithm::Nearest),
            "smooth" | "bicubic" | "2" => Ok(ScaleAlgorithm::Smooth),
            _ => {
                let msg = format!("unknown scale algorithm: {:?}", string);
                Err(Error::invalid_argument(msg))
            }
        }
    }
}

/// Which staged input images to write out as standalone PNG files.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Extract {
    /// Write nothing.
    #[default]
    None,
    /// Write every staged image.
    All,
    /// Write only staged images with one of these sizes.
    Sizes(Vec<u32>),
}

impl Extract {
    /// Returns true if an image of the given size should be extracted.
    pub fn includes(&self, size: u32) -> bool {
        match self {
            Extract::None => false,
            Extract::All => true,
            Extract::Sizes(sizes) => sizes.contains(&size),
        }
    }
}

/// Options applied when encoding a pack.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExportOptions {
    /// Re-embed each entry's annotation text into its PNG payload.
    pub export_text: bool,
}

/// Settings for one batch run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// Size scheme of the output pack, when no explicit size list is given.
    pub platform: Option<Platform>,
    /// Explicit output sizes; overrides `platform`.
    pub sizes: Option<Vec<u32>>,
    /// Filter used to generate sizes that no input provides.
    pub algorithm: ScaleAlgorithm,
    /// Keep annotation text when writing images.
    pub export_text: bool,
    /// Input images to write out as PNG files.
    pub extract: Extract,
}

impl Settings {
    /// Returns the export options implied by these settings.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions { export_text: self.export_text }
    }
}
