//! Library for building multi-resolution icon packs and reading/writing them
//! as Windows icon (.ico) and Apple Icon Image (.icns) files.
//!
//! An [`IconPack`](struct.IconPack.html) holds one square slot per size
//! required by a [`Platform`](enum.Platform.html) (or by an explicit size
//! list).  Slots are filled by loading ICO, ICNS or plain image files, and
//! missing sizes can be generated by resampling the largest image present.
//! Every entry may carry a short annotation that is stored in a private
//! `rIPt` chunk of its PNG payload.
//!
//! ICO and ICNS payloads are only supported in PNG form.  See
//! https://en.wikipedia.org/wiki/ICO_(file_format) and
//! https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file formats.
//!
//! # Example: building an .icns file from a PNG
//!
//! ```no_run
//! use iconpack::{ContainerFormat, ExportOptions, IconPack, Platform, ScaleAlgorithm, Target};
//!
//! let mut pack = IconPack::new(Platform::MacOS);
//! let report = pack.load_file("icon_1024.png").unwrap();
//! println!("loaded {} image(s)", report.loaded);
//! pack.generate_missing(Target::All, ScaleAlgorithm::Smooth).unwrap();
//! pack.save("icon.icns", ContainerFormat::Icns, &ExportOptions::default()).unwrap();
//! ```
//!
//! # Example: listing the images inside an .ico file
//!
//! ```no_run
//! use iconpack::{IconPack, Platform};
//!
//! let mut pack = IconPack::new(Platform::Windows);
//! pack.load_file("app.ico").unwrap();
//! for entry in pack.entries().iter().filter(|entry| entry.is_valid()) {
//!     println!("{}x{} {:?}", entry.size(), entry.size(), entry.text());
//! }
//! ```

#![warn(missing_docs)]

pub mod batch;
mod buffer;
pub mod container;
mod element;
mod entry;
mod error;
mod family;
pub mod ico;
mod icontype;
mod pack;
mod platform;
mod pngio;
mod resize;
mod session;
mod settings;
pub mod textchunk;

pub use self::buffer::{PixelBuffer, PixelFormat};
pub use self::container::{ContainerFormat, ContainerKind, DecodedContainer, DecodedImage};
pub use self::element::IconElement;
pub use self::entry::IconEntry;
pub use self::error::{Diagnostic, Error, Result};
pub use self::family::IconFamily;
pub use self::icontype::{IconType, OSType};
pub use self::pack::{Export, IconPack, LoadReport, MAX_ICON_SIZE};
pub use self::platform::Platform;
pub use self::pngio::is_png;
pub use self::resize::{largest_valid, resample, Target};
pub use self::session::Session;
pub use self::settings::{ExportOptions, Extract, ScaleAlgorithm, Settings};
