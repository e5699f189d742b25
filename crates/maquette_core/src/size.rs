//! Output size buckets for generated images.

use serde::{Deserialize, Serialize};

/// One of the three fixed output sizes accepted by the generation backends.
///
/// # Examples
///
/// ```
/// use maquette_core::ImageSize;
///
/// let size = ImageSize::default();
/// assert_eq!(size, ImageSize::Square1024);
/// assert_eq!(size.width(), 1024);
/// assert_eq!(size.as_str(), "1024x1024");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ImageSize {
    /// 1024x1024 pixels, the default bucket
    #[default]
    #[display("1024x1024")]
    #[serde(rename = "1024x1024")]
    Square1024,
    /// 512x512 pixels
    #[display("512x512")]
    #[serde(rename = "512x512")]
    Square512,
    /// 256x256 pixels
    #[display("256x256")]
    #[serde(rename = "256x256")]
    Square256,
}

impl ImageSize {
    /// Width in pixels.
    pub fn width(&self) -> i32 {
        match self {
            ImageSize::Square1024 => 1024,
            ImageSize::Square512 => 512,
            ImageSize::Square256 => 256,
        }
    }

    /// Height in pixels. All buckets are square.
    pub fn height(&self) -> i32 {
        self.width()
    }

    /// Convert to the wire representation used by providers and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square1024 => "1024x1024",
            ImageSize::Square512 => "512x512",
            ImageSize::Square256 => "256x256",
        }
    }
}

impl std::str::FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1024x1024" => Ok(ImageSize::Square1024),
            "512x512" => Ok(ImageSize::Square512),
            "256x256" => Ok(ImageSize::Square256),
            _ => Err(format!("Unknown image size: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_wire_format() {
        for size in [
            ImageSize::Square1024,
            ImageSize::Square512,
            ImageSize::Square256,
        ] {
            assert_eq!(ImageSize::from_str(size.as_str()).unwrap(), size);
        }
    }

    #[test]
    fn rejects_unknown_bucket() {
        assert!(ImageSize::from_str("800x600").is_err());
    }
}
