use std::path::Path;

use super::buffer::PixelBuffer;
use super::container::{ContainerFormat, DecodedContainer, DecodedImage};
use super::entry::IconEntry;
use super::error::{self, Diagnostic, Error, Result};
use super::family;
use super::ico;
use super::platform::Platform;
use super::resize::{self, Target};
use super::settings::{ExportOptions, ScaleAlgorithm};
use super::textchunk;

/// The largest slot size accepted in an explicit size list.
pub const MAX_ICON_SIZE: u32 = 1024;

/// The outcome of loading images into a pack.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Number of slots that were filled.
    pub loaded: usize,
    /// Images that were skipped, and why.
    pub diagnostics: Vec<Diagnostic>,
}

/// An encoded pack.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Export {
    /// The container bytes, or `None` if the pack had nothing to write.
    pub bytes: Option<Vec<u8>>,
    /// Entries that were left out, and why.
    pub diagnostics: Vec<Diagnostic>,
}

/// An ordered set of square icon slots, one per required size.
#[derive(Clone, Debug, PartialEq)]
pub struct IconPack {
    entries: Vec<IconEntry>,
}

impl IconPack {
    /// Creates an empty pack with one slot per size of the platform's
    /// scheme.
    pub fn new(platform: Platform) -> IconPack {
        IconPack::from_sizes(platform.sizes())
    }

    /// Creates an empty pack from an explicit list of sizes.  Every size
    /// must be between 1 and 1024 and appear only once.
    pub fn with_sizes(sizes: &[u32]) -> Result<IconPack> {
        if sizes.is_empty() {
            return Err(Error::invalid_argument("size list is empty"));
        }
        for (index, &size) in sizes.iter().enumerate() {
            if size == 0 || size > MAX_ICON_SIZE {
                let msg = format!("icon size {} is outside 1..={}", size, MAX_ICON_SIZE);
                return Err(Error::invalid_argument(msg));
            }
            if sizes[..index].contains(&size) {
                let msg = format!("icon size {} is listed twice", size);
                return Err(Error::invalid_argument(msg));
            }
        }
        Ok(IconPack::from_sizes(sizes))
    }

    fn from_sizes(sizes: &[u32]) -> IconPack {
        IconPack { entries: sizes.iter().map(|&size| IconEntry::new(size)).collect() }
    }

    /// Returns the slot sizes, in pack order.
    pub fn sizes(&self) -> Vec<u32> {
        self.entries.iter().map(IconEntry::size).collect()
    }

    /// Returns all slots, in pack order.
    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    /// Returns the slot at `index`.
    pub fn entry(&self, index: usize) -> Result<&IconEntry> {
        let len = self.entries.len();
        self.entries.get(index).ok_or_else(|| index_error(index, len))
    }

    /// Returns the index of the slot with the given size, if any.
    pub fn index_of(&self, size: u32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.size() == size)
    }

    /// Returns the number of slots holding a real image.
    pub fn count_valid(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_valid()).count()
    }

    /// Decodes an in-memory ICO, ICNS or image file and loads its images.
    /// A malformed container leaves the pack untouched.
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<LoadReport> {
        let mut diagnostics = Vec::new();
        let images = match DecodedContainer::decode(data, &mut diagnostics)? {
            DecodedContainer::Unrecognized => {
                return Err(Error::malformed("unrecognized file format"));
            }
            decoded => decoded.into_images(),
        };
        let mut report = self.load_images(images);
        diagnostics.append(&mut report.diagnostics);
        report.diagnostics = diagnostics;
        Ok(report)
    }

    /// Reads a file from disk and loads its images.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        tracing::info!("loading {}", path.display());
        let data = std::fs::read(path)?;
        self.load_bytes(&data)
    }

    /// Places each image in the slot of the same size.  Non-square images,
    /// images without a matching slot and images whose slot is already
    /// filled are skipped.
    pub fn load_images<I>(&mut self, images: I) -> LoadReport
        where I: IntoIterator<Item = DecodedImage>
    {
        let mut report = LoadReport::default();
        for image in images {
            let (width, height) = (image.pixels.width(), image.pixels.height());
            if width != height {
                error::record(&mut report.diagnostics,
                              Diagnostic::GeometryMismatch { width, height });
                continue;
            }
            let index = match self.index_of(width) {
                Some(index) => index,
                None => {
                    error::record(&mut report.diagnostics,
                                  Diagnostic::GeometryMismatch { width, height });
                    continue;
                }
            };
            let entry = &mut self.entries[index];
            if entry.is_valid() {
                error::record(&mut report.diagnostics,
                              Diagnostic::SlotOccupied { size: width });
                continue;
            }
            entry.fill(image.pixels, &image.text);
            report.loaded += 1;
        }
        tracing::debug!("loaded {} image(s), {} valid slot(s)",
                        report.loaded,
                        self.count_valid());
        report
    }

    /// Resets the slot at `index` to the placeholder.
    pub fn clear_entry(&mut self, index: usize) -> Result<()> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| index_error(index, len))?;
        entry.clear();
        Ok(())
    }

    /// Resets every slot to the placeholder.
    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.clear();
        }
    }

    /// Fills the targeted empty slots by resampling the largest valid slot.
    /// Returns the number of slots filled, which is zero when the pack has
    /// no valid slot.
    pub fn generate_missing(&mut self, target: Target, algorithm: ScaleAlgorithm) -> Result<usize> {
        if let Target::Index(index) = target {
            self.entry(index)?;
        }
        let source = match resize::largest_valid(&self.entries) {
            Some(index) => self.entries[index].pixels().clone(),
            None => {
                tracing::debug!("no valid entry to generate from");
                return Ok(0);
            }
        };
        resize::fill_missing(&mut self.entries, &source, target, algorithm)
    }

    /// Fills the targeted empty slots by resampling `source`, which need not
    /// match any slot size.
    pub fn generate_from(&mut self,
                         source: &PixelBuffer,
                         target: Target,
                         algorithm: ScaleAlgorithm)
                         -> Result<usize> {
        resize::fill_missing(&mut self.entries, source, target, algorithm)
    }

    /// Sets the annotation text of a valid slot.  Text longer than 39 bytes
    /// is truncated.
    pub fn set_text(&mut self, index: usize, text: &str) -> Result<()> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| index_error(index, len))?;
        if !entry.is_valid() {
            let msg = format!("entry {} ({}x{}) holds no image",
                              index,
                              entry.size(),
                              entry.size());
            return Err(Error::invalid_argument(msg));
        }
        entry.set_text(text);
        Ok(())
    }

    /// Encodes the valid slots into an ICO or ICNS file, in pack order.
    pub fn encode(&self, format: ContainerFormat, options: &ExportOptions) -> Result<Export> {
        let valid: Vec<(&PixelBuffer, &[u8])> = self.entries
            .iter()
            .filter(|entry| entry.is_valid())
            .map(|entry| {
                let text: &[u8] = if options.export_text {
                    entry.text().as_bytes()
                } else {
                    &[]
                };
                (entry.pixels(), text)
            })
            .collect();
        let mut diagnostics = Vec::new();
        let bytes = match format {
            ContainerFormat::Ico => ico::encode(valid)?,
            ContainerFormat::Icns => family::encode(valid, &mut diagnostics)?,
        };
        if bytes.is_none() {
            tracing::info!("no valid entries to export");
        }
        Ok(Export { bytes, diagnostics })
    }

    /// Encodes the pack and writes it to `path`.  Nothing is written when
    /// the pack has no encodable entries.
    pub fn save<P: AsRef<Path>>(&self,
                                path: P,
                                format: ContainerFormat,
                                options: &ExportOptions)
                                -> Result<Export> {
        let path = path.as_ref();
        let export = self.encode(format, options)?;
        if let Some(ref bytes) = export.bytes {
            std::fs::write(path, bytes)?;
            tracing::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        Ok(export)
    }

    /// Encodes a single valid slot as a standalone PNG stream.
    pub fn encode_png(&self, index: usize, export_text: bool) -> Result<Vec<u8>> {
        let entry = self.entry(index)?;
        if !entry.is_valid() {
            let msg = format!("entry {} ({}x{}) holds no image",
                              index,
                              entry.size(),
                              entry.size());
            return Err(Error::invalid_argument(msg));
        }
        let png = entry.pixels().to_png()?;
        if export_text && !entry.text().is_empty() {
            return Ok(textchunk::embed(&png, entry.text().as_bytes())?);
        }
        Ok(png)
    }
}

fn index_error(index: usize, len: usize) -> Error {
    let msg = format!("entry index {} out of range (pack has {} entries)", index, len);
    Error::invalid_argument(msg)
}
