use png;
use std::io::{self, Cursor, Write};

use super::buffer::{PixelBuffer, PixelFormat};

/// The eight bytes every PNG stream starts with.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// The largest width or height accepted when decoding an image.
pub(crate) const MAX_IMAGE_DIMENSION: u32 = 4096;

/// Returns true if `data` starts with the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}

impl PixelBuffer {
    /// Decodes a PNG stream held in memory.  Paletted and low bit depth
    /// images are expanded to 8 bits per channel.
    pub fn read_png(data: &[u8]) -> io::Result<PixelBuffer> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let info = decoder.read_header_info()?;
        let (width, height) = (info.width, info.height);
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            let msg = format!("PNG dimensions {}x{} exceed the {}x{} limit",
                              width,
                              height,
                              MAX_IMAGE_DIMENSION,
                              MAX_IMAGE_DIMENSION);
            return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
        }
        let mut reader = decoder.read_info()?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported PNG bit depth: {:?}", bit_depth);
            return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
        }
        let pixel_format = match color_type {
            png::ColorType::Rgba => PixelFormat::RGBA,
            png::ColorType::Rgb => PixelFormat::RGB,
            png::ColorType::GrayscaleAlpha => PixelFormat::GrayAlpha,
            png::ColorType::Grayscale => PixelFormat::Gray,
            png::ColorType::Indexed => {
                let msg = "paletted PNG output was not expanded";
                return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
            }
        };

        let mut buffer = PixelBuffer::new(pixel_format, width, height);
        if reader.output_buffer_size() != Some(buffer.data().len()) {
            let msg = "PNG frame size does not match its header";
            return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
        }
        reader.next_frame(buffer.data_mut())?;
        reader.finish()?;
        Ok(buffer)
    }

    /// Encodes the buffer as a PNG stream, keeping its channel layout.
    pub fn write_png<W: Write>(&self, output: W) -> io::Result<()> {
        let color_type = match self.pixel_format() {
            PixelFormat::RGBA => png::ColorType::Rgba,
            PixelFormat::RGB => png::ColorType::Rgb,
            PixelFormat::GrayAlpha => png::ColorType::GrayscaleAlpha,
            PixelFormat::Gray => png::ColorType::Grayscale,
        };
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.data())?;
        writer.finish()?;
        Ok(())
    }

    /// Encodes the buffer as an in-memory PNG stream.
    pub fn to_png(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_png(&mut output)?;
        Ok(output)
    }
}

/// Builds a PNG stream holding only an RGBA IHDR and IEND, with no image
/// data.
#[cfg(test)]
pub(crate) fn header_only_png(width: u32, height: u32) -> Vec<u8> {
    use super::textchunk::write_chunk;
    let mut png = PNG_SIGNATURE.to_vec();
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);
    write_chunk(&mut png, b"IHDR", &ihdr).unwrap();
    write_chunk(&mut png, b"IEND", &[]).unwrap();
    png
}
