use super::error::{Error, Result};

// Placeholder colors for slots that hold no real image.
const PLACEHOLDER_BORDER: [u8; 4] = [80, 80, 80, 255];
const PLACEHOLDER_FILL: [u8; 4] = [130, 130, 130, 255];

/// Decoded pixel data for a single image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl PixelBuffer {
    /// Creates a new buffer with all pixel data set to zero.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> PixelBuffer {
        let data_len = format.channels() * (width as usize) * (height as usize);
        PixelBuffer {
            format,
            width,
            height,
            data: vec![0u8; data_len].into_boxed_slice(),
        }
    }

    /// Wraps existing pixel data.  Returns an error if `data` does not hold
    /// exactly `width * height` pixels of the given format.
    pub fn from_data(format: PixelFormat,
                     width: u32,
                     height: u32,
                     data: Vec<u8>)
                     -> Result<PixelBuffer> {
        let expected = format.channels() * (width as usize) * (height as usize);
        if data.len() != expected {
            let msg = format!("wrong pixel data length ({} instead of {} \
                               for {}x{} {:?})",
                              data.len(),
                              expected,
                              width,
                              height,
                              format);
            return Err(Error::invalid_argument(msg));
        }
        Ok(PixelBuffer {
            format,
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Creates a square RGBA buffer filled with a single color.
    pub fn solid(size: u32, rgba: [u8; 4]) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(PixelFormat::RGBA, size, size);
        for pixel in buffer.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
        buffer
    }

    /// Creates the filler image shown in an empty slot: a gray square with a
    /// one pixel darker border.
    pub fn placeholder(size: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::solid(size, PLACEHOLDER_BORDER);
        if size > 2 {
            let stride = size as usize;
            for y in 1..(stride - 1) {
                for x in 1..(stride - 1) {
                    let start = 4 * (y * stride + x);
                    buffer.data[start..start + 4]
                        .copy_from_slice(&PLACEHOLDER_FILL);
                }
            }
        }
        buffer
    }

    /// Creates a copy of this buffer using the RGBA pixel format.  If the
    /// source is already RGBA, this is equivalent to `clone()`.
    pub fn to_rgba(&self) -> PixelBuffer {
        let rgba_data = match self.format {
            PixelFormat::RGBA => self.data.clone(),
            PixelFormat::RGB => rgb_to_rgba(&self.data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(&self.data),
            PixelFormat::Gray => gray_to_rgba(&self.data),
        };
        PixelBuffer {
            format: PixelFormat::RGBA,
            width: self.width,
            height: self.height,
            data: rgba_data,
        }
    }

    /// Converts the buffer into RGBA in place, consuming it.
    pub fn into_rgba(self) -> PixelBuffer {
        if self.format == PixelFormat::RGBA {
            self
        } else {
            self.to_rgba()
        }
    }

    /// Returns the format in which this buffer's pixel data is stored.
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns the bytes of the pixel at (`x`, `y`).  Panics if the
    /// coordinates are out of range.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height);
        let channels = self.format.channels();
        let start = channels * (y as usize * self.width as usize + x as usize);
        &self.data[start..start + channels]
    }

    /// Returns a reference to the raw pixel data, in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data.into_vec()
    }
}

/// A format for storing pixel data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale with alpha channel.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bytes used by a single pixel in this format.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::RGBA => 4,
            PixelFormat::RGB => 3,
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Gray => 1,
        }
    }
}

fn rgb_to_rgba(rgb: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba.into_boxed_slice()
}

fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba.into_boxed_slice()
}

fn gray_to_rgba(gray: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba.into_boxed_slice()
}
