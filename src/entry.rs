use super::buffer::PixelBuffer;
use super::textchunk::MAX_TEXT_LEN;

/// One sized slot in an icon pack.
///
/// An invalid entry holds the placeholder image and no text.  The size of
/// an entry is fixed when the pack is created.
#[derive(Clone, Debug, PartialEq)]
pub struct IconEntry {
    size: u32,
    valid: bool,
    pixels: PixelBuffer,
    text: String,
}

impl IconEntry {
    /// Creates an empty (invalid) entry of the given size.
    pub fn new(size: u32) -> IconEntry {
        IconEntry {
            size,
            valid: false,
            pixels: PixelBuffer::placeholder(size),
            text: String::new(),
        }
    }

    /// Returns the width and height of this slot, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns true if the slot holds a real image.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the slot's image, which is the placeholder when invalid.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Returns the annotation text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stores an image in the slot.  The caller guarantees the image matches
    /// the slot size.
    pub(crate) fn fill(&mut self, pixels: PixelBuffer, text: &str) {
        debug_assert!(pixels.width() == self.size && pixels.height() == self.size);
        self.pixels = pixels.into_rgba();
        self.valid = true;
        self.set_text(text);
    }

    /// Resets the slot to the placeholder.
    pub(crate) fn clear(&mut self) {
        if self.valid {
            *self = IconEntry::new(self.size);
        }
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = truncate_text(text).to_string();
    }
}

/// Cuts `text` to at most `MAX_TEXT_LEN` bytes without splitting a
/// character.
pub(crate) fn truncate_text(text: &str) -> &str {
    if text.len() <= MAX_TEXT_LEN {
        return text;
    }
    let mut end = MAX_TEXT_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
