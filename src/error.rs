//! Error and diagnostic types.
//!
//! Only container-level structural failures and caller contract violations
//! are surfaced as [`Error`]s.  Problems with a single image inside an
//! otherwise readable container are recorded as [`Diagnostic`]s and the
//! operation carries on with the remaining images.

use std::fmt;
use std::io;
use thiserror::Error;

/// Errors returned by pack and codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The container header or directory is unreadable or truncated.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// A caller passed an identifier, index or size outside the accepted
    /// range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing the underlying file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Error {
        Error::MalformedContainer(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Error {
        Error::InvalidArgument(msg.into())
    }
}

/// Result type alias for pack and codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal problem with one image, recorded while the surrounding
/// operation continues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    /// A container entry could not be decoded (no PNG signature, corrupt PNG
    /// data, unknown ICNS type, or unreadable payload span).
    UnsupportedPayload {
        /// Position of the entry within its container.
        index: usize,
        /// Human-readable cause.
        reason: String,
    },
    /// A decoded image is not square, or its size has no slot in the pack.
    GeometryMismatch {
        /// Decoded width, in pixels.
        width: u32,
        /// Decoded height, in pixels.
        height: u32,
    },
    /// A decoded image matched a slot that already holds a valid image.
    SlotOccupied {
        /// Size of the occupied slot.
        size: u32,
    },
    /// A valid entry was left out of an ICNS file because no OSType encodes
    /// its size.
    EncodeSkippedSize {
        /// Size of the skipped entry.
        size: u32,
    },
}

impl Diagnostic {
    /// Logs the diagnostic at warn level.
    pub(crate) fn emit(&self) {
        tracing::warn!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedPayload { index, reason } => {
                write!(f, "skipped entry {}: {}", index, reason)
            }
            Diagnostic::GeometryMismatch { width, height } if width != height => {
                write!(f, "image is not square ({}x{})", width, height)
            }
            Diagnostic::GeometryMismatch { width, height } => {
                write!(f, "no slot for image size {}x{}", width, height)
            }
            Diagnostic::SlotOccupied { size } => {
                write!(f, "slot {}x{} already holds an image", size, size)
            }
            Diagnostic::EncodeSkippedSize { size } => {
                write!(f, "no ICNS type encodes size {}x{}", size, size)
            }
        }
    }
}

/// Records a diagnostic in `sink` and logs it.
pub(crate) fn record(sink: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.emit();
    sink.push(diagnostic);
}
