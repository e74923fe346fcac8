use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Error, ErrorKind, Read, Write};

use super::buffer::PixelBuffer;
use super::container::DecodedImage;
use super::element::IconElement;
use super::error::{self, Diagnostic};
use super::icontype::IconType;

/// The first four bytes of an ICNS file:
pub const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// A set of icons stored in a single ICNS file.
pub struct IconFamily {
    /// The icon elements stored in the ICNS file.
    pub elements: Vec<IconElement>,
}

impl IconFamily {
    /// Creates a new, empty icon family.
    pub fn new() -> IconFamily {
        IconFamily { elements: Vec::new() }
    }

    /// Returns true if the icon family contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encodes the image into the family, choosing the icon type from the
    /// image dimensions.  Returns an error if no encodable icon type matches
    /// the image dimensions.
    pub fn add_icon(&mut self, image: &PixelBuffer, text: &[u8]) -> io::Result<()> {
        if image.width() != image.height() {
            let msg = format!("icon images must be square (was {}x{})",
                              image.width(),
                              image.height());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        match IconType::for_pixel_size(image.width()) {
            Some(icon_type) => {
                let element = IconElement::encode_image_with_type(image, text, icon_type)?;
                self.elements.push(element);
                Ok(())
            }
            None => {
                let msg = format!("no supported icon type has dimensions {}x{}",
                                  image.width(),
                                  image.height());
                Err(Error::new(ErrorKind::InvalidInput, msg))
            }
        }
    }

    /// Decodes every PNG icon element.  Elements that cannot be decoded are
    /// skipped and reported in `diagnostics`.
    pub fn decode_images(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<DecodedImage> {
        let mut images = Vec::with_capacity(self.elements.len());
        for (index, element) in self.elements.iter().enumerate() {
            match element.decode_image() {
                Ok(image) => {
                    tracing::debug!("decoded {} element ({}x{})",
                                    element.ostype,
                                    image.pixels.width(),
                                    image.pixels.height());
                    images.push(image);
                }
                Err(err) => {
                    error::record(diagnostics,
                                  Diagnostic::UnsupportedPayload {
                                      index,
                                      reason: err.to_string(),
                                  });
                }
            }
        }
        images
    }

    /// Reads an icon family from an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconFamily> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != *ICNS_MAGIC_LITERAL {
            let msg = "not an icns file (wrong magic literal)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let file_length = reader.read_u32::<BigEndian>()?;
        if file_length < ICON_FAMILY_HEADER_LENGTH {
            let msg = format!("invalid icns file length ({})", file_length);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let mut file_position = u64::from(ICON_FAMILY_HEADER_LENGTH);
        let mut family = IconFamily::new();
        while file_position < u64::from(file_length) {
            let element = IconElement::read(reader.by_ref())?;
            file_position += u64::from(element.total_length());
            family.elements.push(element);
        }
        Ok(family)
    }

    /// Writes the icon family to an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_FAMILY_HEADER_LENGTH;
        for element in &self.elements {
            length += element.total_length();
        }
        length
    }
}

impl Default for IconFamily {
    fn default() -> IconFamily {
        IconFamily::new()
    }
}

/// Decodes an in-memory ICNS file.  Fails with `MalformedContainer` if the
/// header or chunk framing is broken.
pub fn decode(data: &[u8], diagnostics: &mut Vec<Diagnostic>) -> error::Result<Vec<DecodedImage>> {
    let family = IconFamily::read(Cursor::new(data))
        .map_err(|err| error::Error::malformed(format!("icns: {}", err)))?;
    tracing::debug!("read icns file with {} element(s)", family.elements.len());
    Ok(family.decode_images(diagnostics))
}

/// Encodes `(image, text)` pairs into an in-memory ICNS file.  Images
/// without an encodable icon type are skipped and reported in
/// `diagnostics`.  Returns `None` if no image could be encoded.
pub fn encode<'a, I>(images: I, diagnostics: &mut Vec<Diagnostic>) -> io::Result<Option<Vec<u8>>>
    where I: IntoIterator<Item = (&'a PixelBuffer, &'a [u8])>
{
    let mut family = IconFamily::new();
    for (image, text) in images {
        if image.is_square() && IconType::for_pixel_size(image.width()).is_some() {
            family.add_icon(&image.to_rgba(), text)?;
        } else {
            error::record(diagnostics,
                          Diagnostic::EncodeSkippedSize { size: image.width() });
        }
    }
    if family.is_empty() {
        return Ok(None);
    }
    let mut output = Vec::with_capacity(family.total_length() as usize);
    family.write(&mut output)?;
    Ok(Some(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::icontype::OSType;
    use super::super::pngio::header_only_png;

    #[test]
    fn write_empty_icon_family() {
        let family = IconFamily::new();
        assert!(family.is_empty());
        let mut output: Vec<u8> = vec![];
        family.write(&mut output).expect("write failed");
        assert_eq!(b"icns\0\0\0\x08", &output as &[u8]);
    }

    #[test]
    fn read_icon_family_with_fake_elements() {
        let input: Cursor<&[u8]> =
            Cursor::new(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#");
        let family = IconFamily::read(input).expect("read failed");
        assert_eq!(2, family.elements.len());
        assert_eq!(OSType(*b"quux"), family.elements[0].ostype);
        assert_eq!(6, family.elements[0].data.len());
        assert_eq!(OSType(*b"baz!"), family.elements[1].ostype);
        assert_eq!(1, family.elements[1].data.len());
    }

    #[test]
    fn write_icon_family_with_fake_elements() {
        let mut family = IconFamily::new();
        family.elements
            .push(IconElement::new(OSType(*b"quux"), b"foobar".to_vec()));
        family.elements
            .push(IconElement::new(OSType(*b"baz!"), b"#".to_vec()));
        let mut output: Vec<u8> = vec![];
        family.write(&mut output).expect("write failed");
        assert_eq!(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#",
                   &output as &[u8]);
    }

    #[test]
    fn unknown_elements_become_diagnostics() {
        let mut diagnostics = Vec::new();
        let images = decode(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#",
                            &mut diagnostics)
            .expect("decode failed");
        assert!(images.is_empty());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn corrupt_png_elements_do_not_hide_good_ones() {
        let mut broken = PixelBuffer::solid(128, [1, 2, 3, 255]).to_png().unwrap();
        broken.truncate(60);
        let good = PixelBuffer::solid(16, [4, 5, 6, 255]);
        let mut family = IconFamily::new();
        family.elements.push(IconElement::new(OSType(*b"ic07"), broken));
        family.elements
            .push(IconElement::new(OSType(*b"ic10"), header_only_png(60000, 60000)));
        family.add_icon(&good, b"").unwrap();
        let mut output = Vec::new();
        family.write(&mut output).expect("write failed");

        let mut diagnostics = Vec::new();
        let images = decode(&output, &mut diagnostics).expect("decode failed");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].pixels, good);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(diagnostics[0], Diagnostic::UnsupportedPayload { index: 0, .. }));
        assert!(matches!(diagnostics[1], Diagnostic::UnsupportedPayload { index: 1, .. }));
    }

    #[test]
    fn malformed_headers_are_fatal() {
        let mut diagnostics = Vec::new();
        for input in [&b"icn"[..], &b"icns\0\0"[..], &b"icns\0\0\0\x04"[..], &b"ICNS\0\0\0\x08"[..]] {
            let result = decode(input, &mut diagnostics);
            assert!(matches!(result, Err(error::Error::MalformedContainer(_))));
        }
    }

    #[test]
    fn truncated_chunk_is_fatal() {
        let mut diagnostics = Vec::new();
        let result = decode(b"icns\0\0\0\x20ic07\0\0\0\x18abc", &mut diagnostics);
        assert!(matches!(result, Err(error::Error::MalformedContainer(_))));
    }

    #[test]
    fn encode_skips_unsupported_sizes() {
        let supported = PixelBuffer::solid(32, [9, 9, 9, 255]);
        let unsupported = PixelBuffer::solid(96, [9, 9, 9, 255]);
        let mut diagnostics = Vec::new();
        let output = encode(vec![(&unsupported, &b""[..]), (&supported, &b""[..])],
                            &mut diagnostics)
            .unwrap()
            .expect("nothing encoded");
        assert_eq!(&output[0..4], ICNS_MAGIC_LITERAL);
        assert_eq!(&output[8..12], b"ic11");
        assert_eq!(diagnostics, vec![Diagnostic::EncodeSkippedSize { size: 96 }]);
        let declared = u32::from_be_bytes([output[4], output[5], output[6], output[7]]);
        assert_eq!(declared as usize, output.len());
    }

    #[test]
    fn encode_nothing_is_none() {
        let unsupported = PixelBuffer::solid(96, [9, 9, 9, 255]);
        let mut diagnostics = Vec::new();
        let output = encode(vec![(&unsupported, &b""[..])], &mut diagnostics).unwrap();
        assert!(output.is_none());
    }
}
