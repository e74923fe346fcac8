use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};

const WINDOWS_SIZES: &[u32] = &[256, 128, 96, 64, 48, 32, 24, 16];
const MACOS_SIZES: &[u32] = &[1024, 512, 256, 128, 64, 48, 32, 16];
const FAVICON_SIZES: &[u32] = &[228, 152, 144, 120, 96, 72, 64, 32, 24, 16];
const ANDROID_SIZES: &[u32] = &[192, 144, 96, 72, 64, 48, 36, 32, 24, 16];
const IOS_SIZES: &[u32] = &[180, 152, 120, 87, 80, 76, 58, 40, 29];

/// A target platform, each with its own scheme of required icon sizes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Platform {
    /// Windows application icons.
    Windows,
    /// macOS application icons.
    MacOS,
    /// Website favicons for multiple devices.
    Favicon,
    /// Android launcher, action and dialog icons.
    Android,
    /// iOS app and settings icons.
    IOS,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 5] = [Platform::Windows,
                                    Platform::MacOS,
                                    Platform::Favicon,
                                    Platform::Android,
                                    Platform::IOS];

    /// Returns the square pixel sizes required by this platform, largest
    /// first.
    ///
    /// # Examples
    /// ```
    /// use iconpack::Platform;
    /// assert_eq!(Platform::Windows.sizes()[0], 256);
    /// assert_eq!(Platform::IOS.sizes().len(), 9);
    /// ```
    pub fn sizes(self) -> &'static [u32] {
        match self {
            Platform::Windows => WINDOWS_SIZES,
            Platform::MacOS => MACOS_SIZES,
            Platform::Favicon => FAVICON_SIZES,
            Platform::Android => ANDROID_SIZES,
            Platform::IOS => IOS_SIZES,
        }
    }

    /// Looks up a platform by its command-line number (1 = Windows,
    /// 2 = Favicon, 3 = Android, 4 = iOS, 5 = macOS).
    pub fn from_number(number: u32) -> Result<Platform> {
        match number {
            1 => Ok(Platform::Windows),
            2 => Ok(Platform::Favicon),
            3 => Ok(Platform::Android),
            4 => Ok(Platform::IOS),
            5 => Ok(Platform::MacOS),
            _ => {
                let msg = format!("unknown platform number: {}", number);
                Err(Error::invalid_argument(msg))
            }
        }
    }

    /// Returns the lowercase name of the platform.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOS => "macos",
            Platform::Favicon => "favicon",
            Platform::Android => "android",
            Platform::IOS => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        out.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(input: &str) -> Result<Platform> {
        if let Ok(number) = input.parse::<u32>() {
            return Platform::from_number(number);
        }
        let lower = input.to_ascii_lowercase();
        Platform::ALL
            .iter()
            .copied()
            .find(|platform| platform.name() == lower)
            .ok_or_else(|| {
                Error::invalid_argument(format!("unknown platform: {}", input))
            })
    }
}
