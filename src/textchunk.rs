//! Reads and writes the `rIPt` annotation chunk inside a PNG stream.
//!
//! The chunk is ancillary, so PNG decoders that do not know it simply skip
//! it.  Its payload is the raw annotation text, at most
//! [`MAX_TEXT_LEN`](constant.MAX_TEXT_LEN.html) bytes.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use crc32fast::Hasher;
use std::io::{self, Error, ErrorKind};

use super::pngio::{is_png, PNG_SIGNATURE};

/// The chunk type of the annotation chunk.
pub const TEXT_CHUNK_TYPE: &[u8; 4] = b"rIPt";

/// The maximum number of annotation bytes stored in a chunk.  Longer text
/// is truncated.
pub const MAX_TEXT_LEN: usize = 39;

const IHDR: &[u8; 4] = b"IHDR";
const IEND: &[u8; 4] = b"IEND";

/// Length, type and CRC fields surrounding every chunk's data.
const CHUNK_OVERHEAD: usize = 12;

/// Location of one chunk within a PNG stream.
struct ChunkSpan {
    chunk_type: [u8; 4],
    start: usize,
    data_len: usize,
}

impl ChunkSpan {
    fn data_start(&self) -> usize {
        self.start + 8
    }

    fn end(&self) -> usize {
        self.start + CHUNK_OVERHEAD + self.data_len
    }
}

/// Walks chunk boundaries up to and including IEND.  Stops early (without
/// an error) at the first chunk that runs past the end of the data.
fn chunk_spans(png: &[u8]) -> Vec<ChunkSpan> {
    let mut spans = Vec::new();
    let mut position = PNG_SIGNATURE.len();
    while position + CHUNK_OVERHEAD <= png.len() {
        let data_len = BigEndian::read_u32(&png[position..]) as usize;
        let mut chunk_type = [0u8; 4];
        chunk_type.copy_from_slice(&png[position + 4..position + 8]);
        let span = ChunkSpan {
            chunk_type,
            start: position,
            data_len,
        };
        if span.end() > png.len() {
            break;
        }
        position = span.end();
        let is_end = &span.chunk_type == IEND;
        spans.push(span);
        if is_end {
            break;
        }
    }
    spans
}

/// Returns the payload of the first `rIPt` chunk in `png`, or `None` if
/// there is no such chunk.
pub fn read(png: &[u8]) -> Option<Vec<u8>> {
    if !is_png(png) {
        return None;
    }
    chunk_spans(png)
        .into_iter()
        .find(|span| &span.chunk_type == TEXT_CHUNK_TYPE)
        .map(|span| png[span.data_start()..span.data_start() + span.data_len].to_vec())
}

/// Returns a copy of `png` carrying `text` in an `rIPt` chunk placed right
/// after IHDR.  Any existing `rIPt` chunk is replaced.  Text longer than
/// [`MAX_TEXT_LEN`](constant.MAX_TEXT_LEN.html) bytes is truncated; empty
/// text removes the chunk.
pub fn embed(png: &[u8], text: &[u8]) -> io::Result<Vec<u8>> {
    if !is_png(png) {
        return Err(Error::new(ErrorKind::InvalidInput, "not a PNG stream"));
    }
    let spans = chunk_spans(png);
    let header = match spans.first() {
        Some(span) if &span.chunk_type == IHDR => span.end(),
        _ => {
            let msg = "PNG stream does not start with an IHDR chunk";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
    };
    let text = &text[..text.len().min(MAX_TEXT_LEN)];

    let mut output = Vec::with_capacity(png.len() + CHUNK_OVERHEAD + text.len());
    output.extend_from_slice(&png[..header]);
    if !text.is_empty() {
        write_chunk(&mut output, TEXT_CHUNK_TYPE, text)?;
    }
    let mut position = header;
    for span in spans.iter().skip(1) {
        if &span.chunk_type == TEXT_CHUNK_TYPE {
            output.extend_from_slice(&png[position..span.start]);
            position = span.end();
        }
    }
    output.extend_from_slice(&png[position..]);
    Ok(output)
}

/// Appends a complete chunk (length, type, data and CRC) to `output`.
pub(crate) fn write_chunk(output: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
    let mut hasher = Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    output.write_u32::<BigEndian>(data.len() as u32)?;
    output.extend_from_slice(chunk_type);
    output.extend_from_slice(data);
    output.write_u32::<BigEndian>(hasher.finalize())?;
    Ok(())
}
