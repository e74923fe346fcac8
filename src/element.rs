use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error, ErrorKind, Read, Write};

use super::buffer::PixelBuffer;
use super::container::DecodedImage;
use super::icontype::{IconType, OSType};
use super::pngio::is_png;
use super::textchunk;

/// The length of an icon element header, in bytes:
const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// One chunk in an ICNS file.  Only PNG-encoded icon elements can be
/// decoded; other elements are kept as opaque data.
pub struct IconElement {
    /// The OSType for this element (e.g. `ic07` or `icp4`).
    pub ostype: OSType,
    /// The raw data payload for this element.
    pub data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement { ostype, data }
    }

    /// Encodes the image as a PNG element of the given icon type, embedding
    /// `text` in an `rIPt` chunk when it is not empty.  Returns an error if
    /// the image has the wrong dimensions for the selected type.
    pub fn encode_image_with_type(image: &PixelBuffer,
                                  text: &[u8],
                                  icon_type: IconType)
                                  -> io::Result<IconElement> {
        let size = icon_type.pixel_width();
        if image.width() != size || image.height() != size {
            let msg = format!("image has wrong dimensions for {} ({}x{} \
                               instead of {}x{})",
                              icon_type.ostype(),
                              image.width(),
                              image.height(),
                              size,
                              size);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        let mut data = image.to_png()?;
        if !text.is_empty() {
            data = textchunk::embed(&data, text)?;
        }
        Ok(IconElement::new(icon_type.ostype(), data))
    }

    /// Decodes the icon element into an image.  Returns an error if this
    /// element does not represent an icon type supported by this library, if
    /// the payload is not a PNG stream, or if the data is malformed.
    pub fn decode_image(&self) -> io::Result<DecodedImage> {
        let icon_type = self.icon_type().ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput,
                       format!("unsupported OSType: {}", self.ostype))
        })?;
        if !is_png(&self.data) {
            let msg = format!("{} payload is not a PNG stream", self.ostype);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let pixels = PixelBuffer::read_png(&self.data)?;
        let size = icon_type.pixel_width();
        if pixels.width() != size || pixels.height() != size {
            let msg = format!("decoded PNG has wrong dimensions \
                               ({}x{} instead of {}x{})",
                              pixels.width(),
                              pixels.height(),
                              size,
                              size);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(DecodedImage::from_png_payload(pixels, &self.data))
    }

    /// Returns the type of icon encoded by this element, or `None` if this
    /// element does not encode a supported icon type.
    pub fn icon_type(&self) -> Option<IconType> {
        IconType::from_ostype(self.ostype)
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        ICON_ELEMENT_HEADER_LENGTH + (self.data.len() as u32)
    }

    /// Reads an icon element from within an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconElement> {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let element_length = reader.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            return Err(Error::new(ErrorKind::InvalidData,
                                  "invalid element length"));
        }
        let data_length = element_length - ICON_ELEMENT_HEADER_LENGTH;
        let mut data = Vec::new();
        reader.take(u64::from(data_length)).read_to_end(&mut data)?;
        if data.len() as u32 != data_length {
            let msg = format!("{} element is truncated ({} of {} bytes)",
                              OSType(raw_ostype),
                              data.len(),
                              data_length);
            return Err(Error::new(ErrorKind::UnexpectedEof, msg));
        }
        Ok(IconElement::new(OSType(raw_ostype), data))
    }

    /// Writes the icon element to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}
