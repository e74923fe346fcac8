//! Generation of missing pack sizes by resampling an existing image.

use image::{imageops, RgbaImage};

use super::buffer::{PixelBuffer, PixelFormat};
use super::entry::IconEntry;
use super::error::{Error, Result};
use super::settings::ScaleAlgorithm;

/// The slots a generation pass should fill.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// Every invalid slot in the pack.
    All,
    /// Only the slot at this index.
    Index(usize),
}

/// Resamples `image` to a `size`x`size` RGBA buffer.  The aspect ratio is
/// not preserved.
pub fn resample(image: &PixelBuffer, size: u32, algorithm: ScaleAlgorithm) -> Result<PixelBuffer> {
    if size == 0 {
        return Err(Error::invalid_argument("cannot resample to size 0"));
    }
    let rgba = image.to_rgba();
    if rgba.width() == size && rgba.height() == size {
        return Ok(rgba);
    }
    let (width, height) = (rgba.width(), rgba.height());
    let source = RgbaImage::from_raw(width, height, rgba.into_data()).ok_or_else(|| {
        Error::invalid_argument(format!("pixel data does not fill {}x{}", width, height))
    })?;
    let resized = imageops::resize(&source, size, size, algorithm.filter_type());
    PixelBuffer::from_data(PixelFormat::RGBA, size, size, resized.into_raw())
}

/// Returns the index of the largest valid entry.  Ties go to the earliest
/// entry.
pub fn largest_valid(entries: &[IconEntry]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_valid() {
            continue;
        }
        match best {
            Some(current) if entries[current].size() >= entry.size() => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Fills the targeted invalid entries with resampled copies of `source`.
/// Valid entries are left untouched.  Returns the number of entries filled.
pub(crate) fn fill_missing(entries: &mut [IconEntry],
                           source: &PixelBuffer,
                           target: Target,
                           algorithm: ScaleAlgorithm)
                           -> Result<usize> {
    let indices: Vec<usize> = match target {
        Target::All => (0..entries.len()).collect(),
        Target::Index(index) if index < entries.len() => vec![index],
        Target::Index(index) => {
            let msg = format!("entry index {} out of range (pack has {} entries)",
                              index,
                              entries.len());
            return Err(Error::invalid_argument(msg));
        }
    };
    let mut generated = 0;
    for index in indices {
        let entry = &mut entries[index];
        if entry.is_valid() {
            continue;
        }
        let pixels = resample(source, entry.size(), algorithm)?;
        tracing::debug!("generated {}x{} from {}x{} ({})",
                        entry.size(),
                        entry.size(),
                        source.width(),
                        source.height(),
                        algorithm);
        entry.fill(pixels, "");
        generated += 1;
    }
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A square image whose four quadrants have different colors.
    fn quadrants(size: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(PixelFormat::RGBA, size, size);
        let half = size / 2;
        for y in 0..size {
            for x in 0..size {
                let color: [u8; 4] = match (x < half, y < half) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 255, 255],
                };
                let start = 4 * (y * size + x) as usize;
                buffer.data_mut()[start..start + 4].copy_from_slice(&color);
            }
        }
        buffer
    }

    #[test]
    fn nearest_keeps_quadrant_colors() {
        let small = resample(&quadrants(64), 16, ScaleAlgorithm::Nearest).unwrap();
        assert_eq!(small.width(), 16);
        assert_eq!(small.pixel(0, 0), &[255, 0, 0, 255]);
        assert_eq!(small.pixel(15, 0), &[0, 255, 0, 255]);
        assert_eq!(small.pixel(0, 15), &[0, 0, 255, 255]);
        assert_eq!(small.pixel(15, 15), &[255, 255, 255, 255]);
    }

    #[test]
    fn smooth_solid_stays_solid() {
        let source = PixelBuffer::solid(256, [10, 20, 30, 255]);
        let small = resample(&source, 48, ScaleAlgorithm::Smooth).unwrap();
        assert_eq!(small, PixelBuffer::solid(48, [10, 20, 30, 255]));
    }

    #[test]
    fn same_size_is_copy() {
        let source = quadrants(32);
        assert_eq!(resample(&source, 32, ScaleAlgorithm::Smooth).unwrap(), source);
        assert!(resample(&source, 0, ScaleAlgorithm::Smooth).is_err());
    }

    #[test]
    fn largest_valid_prefers_size_then_order() {
        let mut entries: Vec<IconEntry> =
            [16, 64, 32, 64].iter().map(|&size| IconEntry::new(size)).collect();
        assert_eq!(largest_valid(&entries), None);
        entries[0].fill(PixelBuffer::solid(16, [0, 0, 0, 255]), "");
        assert_eq!(largest_valid(&entries), Some(0));
        entries[3].fill(PixelBuffer::solid(64, [0, 0, 0, 255]), "");
        entries[1].fill(PixelBuffer::solid(64, [0, 0, 0, 255]), "");
        assert_eq!(largest_valid(&entries), Some(1));
    }

    #[test]
    fn fill_missing_skips_valid() {
        let mut entries: Vec<IconEntry> =
            [32, 16, 8].iter().map(|&size| IconEntry::new(size)).collect();
        let kept = PixelBuffer::solid(16, [1, 2, 3, 255]);
        entries[1].fill(kept.clone(), "kept");
        let source = PixelBuffer::solid(64, [9, 9, 9, 255]);
        let count = fill_missing(&mut entries, &source, Target::All, ScaleAlgorithm::Nearest)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(entries[1].pixels(), &kept);
        assert_eq!(entries[1].text(), "kept");
        assert_eq!(entries[2].pixels(), &PixelBuffer::solid(8, [9, 9, 9, 255]));
        assert!(fill_missing(&mut entries, &source, Target::Index(3), ScaleAlgorithm::Nearest)
            .is_err());
    }
}
