//! Dither method selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::kernel::{ATKINSON, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, STUCKI};
use super::ordered::{BAYER_2X2, BAYER_4X4, BAYER_8X8, CLUSTERED_4X4};
use super::{Direct, Dither};

/// The closed set of dithering strategies.
///
/// Serialized with the upper-case tags used in settings files
/// (`FLOYD_STEINBERG`, `BAYER_4X4`, ...).
///
/// # Example
///
/// ```
/// use pixel_dither::DitherMethod;
///
/// let method: DitherMethod = "floyd-steinberg".parse().unwrap();
/// assert_eq!(method, DitherMethod::FloydSteinberg);
/// assert_eq!(method.to_string(), "FLOYD_STEINBERG");
/// assert_eq!(method.display_name(), "Floyd-Steinberg");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DitherMethod {
    /// Plain nearest-color quantization.
    None,
    /// Floyd-Steinberg error diffusion (100% propagation, 4 neighbors).
    #[default]
    FloydSteinberg,
    /// Atkinson error diffusion (75% propagation).
    Atkinson,
    /// Jarvis-Judice-Ninke error diffusion (12 neighbors, /48).
    JarvisJudiceNinke,
    /// Stucki error diffusion (12 neighbors, /42).
    Stucki,
    /// Ordered dithering with the 2x2 Bayer matrix.
    #[serde(rename = "BAYER_2X2")]
    Bayer2x2,
    /// Ordered dithering with the 4x4 Bayer matrix.
    #[serde(rename = "BAYER_4X4")]
    Bayer4x4,
    /// Ordered dithering with the 8x8 Bayer matrix.
    #[serde(rename = "BAYER_8X8")]
    Bayer8x8,
    /// Ordered dithering with a 4x4 clustered-dot matrix.
    #[serde(rename = "CLUSTERED_4X4")]
    Clustered4x4,
}

impl DitherMethod {
    /// Every method, in menu order.
    pub const ALL: [DitherMethod; 9] = [
        DitherMethod::None,
        DitherMethod::FloydSteinberg,
        DitherMethod::Atkinson,
        DitherMethod::JarvisJudiceNinke,
        DitherMethod::Stucki,
        DitherMethod::Bayer2x2,
        DitherMethod::Bayer4x4,
        DitherMethod::Bayer8x8,
        DitherMethod::Clustered4x4,
    ];

    /// Tag used in settings files and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            DitherMethod::None => "NONE",
            DitherMethod::FloydSteinberg => "FLOYD_STEINBERG",
            DitherMethod::Atkinson => "ATKINSON",
            DitherMethod::JarvisJudiceNinke => "JARVIS_JUDICE_NINKE",
            DitherMethod::Stucki => "STUCKI",
            DitherMethod::Bayer2x2 => "BAYER_2X2",
            DitherMethod::Bayer4x4 => "BAYER_4X4",
            DitherMethod::Bayer8x8 => "BAYER_8X8",
            DitherMethod::Clustered4x4 => "CLUSTERED_4X4",
        }
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            DitherMethod::None => "No Dither",
            DitherMethod::FloydSteinberg => "Floyd-Steinberg",
            DitherMethod::Atkinson => "Atkinson",
            DitherMethod::JarvisJudiceNinke => "Jarvis-Judice-Ninke",
            DitherMethod::Stucki => "Stucki",
            DitherMethod::Bayer2x2 => "Bayer 2x2",
            DitherMethod::Bayer4x4 => "Bayer 4x4",
            DitherMethod::Bayer8x8 => "Bayer 8x8",
            DitherMethod::Clustered4x4 => "Clustered 4x4",
        }
    }

    /// `true` for the error-diffusion family.
    pub fn is_error_diffusion(self) -> bool {
        matches!(
            self,
            DitherMethod::FloydSteinberg
                | DitherMethod::Atkinson
                | DitherMethod::JarvisJudiceNinke
                | DitherMethod::Stucki
        )
    }

    /// `true` for the ordered (threshold matrix) family.
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            DitherMethod::Bayer2x2
                | DitherMethod::Bayer4x4
                | DitherMethod::Bayer8x8
                | DitherMethod::Clustered4x4
        )
    }

    /// The strategy implementing this method.
    pub fn ditherer(self) -> &'static dyn Dither {
        match self {
            DitherMethod::None => &Direct,
            DitherMethod::FloydSteinberg => &FLOYD_STEINBERG,
            DitherMethod::Atkinson => &ATKINSON,
            DitherMethod::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            DitherMethod::Stucki => &STUCKI,
            DitherMethod::Bayer2x2 => &BAYER_2X2,
            DitherMethod::Bayer4x4 => &BAYER_4X4,
            DitherMethod::Bayer8x8 => &BAYER_8X8,
            DitherMethod::Clustered4x4 => &CLUSTERED_4X4,
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unknown dither method tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither method '{0}' (expected one of NONE, FLOYD_STEINBERG, ATKINSON, JARVIS_JUDICE_NINKE, STUCKI, BAYER_2X2, BAYER_4X4, BAYER_8X8, CLUSTERED_4X4)")]
pub struct ParseDitherMethodError(pub String);

impl FromStr for DitherMethod {
    type Err = ParseDitherMethodError;

    /// Accepts the upper-case tags as well as lower-case and kebab-case
    /// spellings (`bayer-4x4`, `floyd_steinberg`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        DitherMethod::ALL
            .into_iter()
            .find(|m| m.tag() == normalized)
            .ok_or_else(|| ParseDitherMethodError(s.to_string()))
    }
}
