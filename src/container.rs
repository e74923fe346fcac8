//! Detects the kind of an input file from its leading bytes and decodes it
//! into a list of images.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader, Limits};

use super::buffer::{PixelBuffer, PixelFormat};
use super::error::{Diagnostic, Error, Result};
use super::family::{self, ICNS_MAGIC_LITERAL};
use super::ico;
use super::pngio::{is_png, MAX_IMAGE_DIMENSION};
use super::textchunk;

/// One image taken out of an input file, with its annotation text.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    /// The decoded pixels, normalized to RGBA.
    pub pixels: PixelBuffer,
    /// Annotation text from the payload's `rIPt` chunk, or empty.  Bytes
    /// that are not valid UTF-8 are replaced with U+FFFD.
    pub text: String,
}

impl DecodedImage {
    /// Creates a decoded image without annotation text.
    pub fn new(pixels: PixelBuffer) -> DecodedImage {
        DecodedImage {
            pixels: pixels.into_rgba(),
            text: String::new(),
        }
    }

    /// Pairs decoded pixels with the text found in the PNG stream they were
    /// decoded from.  The text is decoded lossily, so chunks written by
    /// other tools in a non-UTF-8 encoding do not round-trip byte for byte.
    pub(crate) fn from_png_payload(pixels: PixelBuffer, png: &[u8]) -> DecodedImage {
        let text = textchunk::read(png)
            .map(|raw| String::from_utf8_lossy(&raw).into_owned())
            .unwrap_or_default();
        DecodedImage {
            pixels: pixels.into_rgba(),
            text,
        }
    }

    /// Returns the image width, which is its size when it is square.
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }
}

/// The kinds of input file this library understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContainerKind {
    /// A Windows icon file.
    Ico,
    /// An Apple icon file.
    Icns,
    /// A single PNG, BMP or QOI image.
    RawImage,
}

/// The icon containers a pack can be written to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ContainerFormat {
    /// A Windows icon file.
    #[default]
    Ico,
    /// An Apple icon file.
    Icns,
}

impl ContainerFormat {
    /// Picks the output format from the file extension.  Anything other
    /// than `.icns` is written as ICO.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ContainerFormat {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("icns") => ContainerFormat::Icns,
            _ => ContainerFormat::Ico,
        }
    }
}

/// Guesses the kind of file from its leading bytes.
pub fn sniff(data: &[u8]) -> Option<ContainerKind> {
    if data.starts_with(ICNS_MAGIC_LITERAL) {
        Some(ContainerKind::Icns)
    } else if ico::has_ico_header(data) {
        Some(ContainerKind::Ico)
    } else if is_png(data) || matches!(image::guess_format(data),
                                         Ok(ImageFormat::Bmp) | Ok(ImageFormat::Qoi)) {
        Some(ContainerKind::RawImage)
    } else {
        None
    }
}

/// The result of decoding an input file.
#[derive(Debug)]
pub enum DecodedContainer {
    /// Images read from an ICO file.
    Ico(Vec<DecodedImage>),
    /// Images read from an ICNS file.
    Icns(Vec<DecodedImage>),
    /// A single standalone image.
    RawImage(DecodedImage),
    /// The data matched no supported format.
    Unrecognized,
}

impl DecodedContainer {
    /// Decodes `data` according to its leading bytes.  Per-image problems
    /// are recorded in `diagnostics`; a broken container header fails with
    /// `MalformedContainer`.
    pub fn decode(data: &[u8], diagnostics: &mut Vec<Diagnostic>) -> Result<DecodedContainer> {
        match sniff(data) {
            Some(ContainerKind::Icns) => Ok(DecodedContainer::Icns(family::decode(data, diagnostics)?)),
            Some(ContainerKind::Ico) => Ok(DecodedContainer::Ico(ico::decode(data, diagnostics)?)),
            Some(ContainerKind::RawImage) => Ok(DecodedContainer::RawImage(decode_raw_image(data)?)),
            None => Ok(DecodedContainer::Unrecognized),
        }
    }

    /// Returns the decoded images, in file order.
    pub fn into_images(self) -> Vec<DecodedImage> {
        match self {
            DecodedContainer::Ico(images) | DecodedContainer::Icns(images) => images,
            DecodedContainer::RawImage(image) => vec![image],
            DecodedContainer::Unrecognized => Vec::new(),
        }
    }
}

/// Reads and decodes a file.  Unrecognized data fails with
/// `MalformedContainer`.
pub fn decode_file<P: AsRef<Path>>(path: P,
                                   diagnostics: &mut Vec<Diagnostic>)
                                   -> Result<Vec<DecodedImage>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    match DecodedContainer::decode(&data, diagnostics)? {
        DecodedContainer::Unrecognized => {
            let msg = format!("{}: unrecognized file format", path.display());
            Err(Error::malformed(msg))
        }
        decoded => Ok(decoded.into_images()),
    }
}

/// Decodes a standalone image.  PNG streams go through the same decoder as
/// container payloads so their annotation text is kept.
fn decode_raw_image(data: &[u8]) -> Result<DecodedImage> {
    if is_png(data) {
        let pixels = PixelBuffer::read_png(data)
            .map_err(|err| Error::malformed(format!("png: {}", err)))?;
        return Ok(DecodedImage::from_png_payload(pixels, data));
    }
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
    limits.max_image_height = Some(MAX_IMAGE_DIMENSION);
    let mut reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    reader.limits(limits);
    let decoded = reader.decode()
        .map_err(|err| Error::malformed(format!("image: {}", err)))?
        .into_rgba8();
    let (width, height) = (decoded.width(), decoded.height());
    let pixels = PixelBuffer::from_data(PixelFormat::RGBA, width, height, decoded.into_raw())?;
    Ok(DecodedImage::new(pixels))
}
