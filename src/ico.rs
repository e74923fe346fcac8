//! Reading and writing Windows icon (.ico) files whose entries are
//! embedded PNG streams.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Error, ErrorKind, Read, Seek, SeekFrom, Write};

use super::buffer::PixelBuffer;
use super::container::DecodedImage;
use super::error::{self, Diagnostic};
use super::pngio::is_png;
use super::textchunk;

/// The resource type number for icons (cursors use 2).
const ICON_RESOURCE_TYPE: u16 = 1;

/// The length of the ICONDIR header, in bytes.
const ICONDIR_LENGTH: u32 = 6;

/// The length of one ICONDIRENTRY, in bytes.
const ICONDIRENTRY_LENGTH: u32 = 16;

/// Bits per pixel recorded for every entry we write.
const BITS_PER_PIXEL: u16 = 32;

/// Returns true if `data` starts with an icon-resource ICONDIR header.
pub fn has_ico_header(data: &[u8]) -> bool {
    data.len() >= ICONDIR_LENGTH as usize && data[..4] == [0, 0, 1, 0]
}

/// The directory and payloads of a single ICO file.
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Encodes an image as a new PNG entry, embedding `text` in an `rIPt`
    /// chunk when it is not empty.
    pub fn add_entry(&mut self, image: &PixelBuffer, text: &[u8]) -> io::Result<()> {
        let mut data = image.to_png()?;
        if !text.is_empty() {
            data = textchunk::embed(&data, text)?;
        }
        self.entries.push(IconDirEntry {
            width: image.width(),
            height: image.height(),
            num_colors: 0,
            color_planes: 0,
            bits_per_pixel: BITS_PER_PIXEL,
            data_size: data.len() as u32,
            data_offset: 0,
            data,
        });
        Ok(())
    }

    /// Reads an ICO file.  A bad header or a directory shorter than its
    /// declared entry count is an error; payloads that cannot be read in
    /// full are kept truncated and rejected later by
    /// [`IconDirEntry::decode`](struct.IconDirEntry.html#method.decode).
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            let msg = format!("invalid reserved field in ICONDIR (was {}, \
                               but must be 0)",
                              reserved);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            let msg = format!("unsupported resource type ({})", restype);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width = reader.read_u8()?;
            let height = reader.read_u8()?;
            let num_colors = reader.read_u8()?;
            let _reserved = reader.read_u8()?;
            let color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            entries.push(IconDirEntry {
                width: if width == 0 { 256 } else { u32::from(width) },
                height: if height == 0 { 256 } else { u32::from(height) },
                num_colors,
                color_planes,
                bits_per_pixel,
                data_size,
                data_offset,
                data: Vec::new(),
            });
        }
        for entry in entries.iter_mut() {
            reader.seek(SeekFrom::Start(u64::from(entry.data_offset)))?;
            reader.by_ref()
                .take(u64::from(entry.data_size))
                .read_to_end(&mut entry.data)?;
        }
        Ok(IconDir { entries })
    }

    /// Writes the ICO file, placing payloads right after the directory in
    /// directory order.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.len() > (u16::MAX as usize) {
            let msg = format!("too many entries in ICONDIR (was {}, but max \
                               is {})",
                              self.entries.len(),
                              u16::MAX);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset = ICONDIR_LENGTH +
                              ICONDIRENTRY_LENGTH * (self.entries.len() as u32);
        for entry in &self.entries {
            writer.write_u8(dimension_byte(entry.width))?;
            writer.write_u8(dimension_byte(entry.height))?;
            writer.write_u8(entry.num_colors)?;
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(entry.color_planes)?;
            writer.write_u16::<LittleEndian>(entry.bits_per_pixel)?;
            let data_size = entry.data.len() as u32;
            writer.write_u32::<LittleEndian>(data_size)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += data_size;
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

/// Directory byte for a width or height; 0 stands for 256 and larger.
fn dimension_byte(size: u32) -> u8 {
    if size > 255 {
        0
    } else {
        size as u8
    }
}

/// One entry of an ICO file: directory fields plus the payload bytes.
pub struct IconDirEntry {
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Decodes this entry's PNG payload.  The decoded PNG dimensions win
    /// over the directory's width and height bytes.
    pub fn decode(&self) -> io::Result<DecodedImage> {
        if self.data.len() as u64 != u64::from(self.data_size) {
            let msg = format!("payload at offset {} is truncated ({} of {} \
                               bytes)",
                              self.data_offset,
                              self.data.len(),
                              self.data_size);
            return Err(Error::new(ErrorKind::UnexpectedEof, msg));
        }
        if !is_png(&self.data) {
            let msg = "payload is not a PNG stream (BMP entries are not \
                       supported)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let pixels = PixelBuffer::read_png(&self.data)?;
        if pixels.width() != self.width || pixels.height() != self.height {
            tracing::debug!("directory says {}x{} ({} colors, {} planes, {} bpp) \
                             but PNG is {}x{}",
                            self.width,
                            self.height,
                            self.num_colors,
                            self.color_planes,
                            self.bits_per_pixel,
                            pixels.width(),
                            pixels.height());
        }
        Ok(DecodedImage::from_png_payload(pixels, &self.data))
    }
}

/// Decodes an in-memory ICO file.  Fails with `MalformedContainer` if the
/// header or directory is unreadable; entries that cannot be decoded are
/// skipped and reported in `diagnostics`.
pub fn decode(data: &[u8], diagnostics: &mut Vec<Diagnostic>) -> error::Result<Vec<DecodedImage>> {
    let dir = IconDir::read(Cursor::new(data))
        .map_err(|err| error::Error::malformed(format!("ico: {}", err)))?;
    tracing::debug!("read ico file with {} entries", dir.entries.len());
    let mut images = Vec::with_capacity(dir.entries.len());
    for (index, entry) in dir.entries.iter().enumerate() {
        match entry.decode() {
            Ok(image) => images.push(image),
            Err(err) => {
                error::record(diagnostics,
                              Diagnostic::UnsupportedPayload {
                                  index,
                                  reason: err.to_string(),
                              });
            }
        }
    }
    Ok(images)
}

/// Encodes `(image, text)` pairs into an in-memory ICO file.  Returns
/// `None` when there are no images.
pub fn encode<'a, I>(images: I) -> io::Result<Option<Vec<u8>>>
    where I: IntoIterator<Item = (&'a PixelBuffer, &'a [u8])>
{
    let mut dir = IconDir::new();
    for (image, text) in images {
        dir.add_entry(image, text)?;
    }
    if dir.entries.is_empty() {
        return Ok(None);
    }
    let mut output = Vec::new();
    dir.write(&mut output)?;
    Ok(Some(output))
}
