//! Pixel-art settings value object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dither::DitherMethod;
use crate::preprocess::ToneOptions;

/// Id of the palette selected by default.
pub const DEFAULT_PALETTE_ID: &str = "olive-dream";

/// Everything that controls one render, as an immutable snapshot.
///
/// Field names serialize in camelCase (`pixelSize`, `paletteId`,
/// `ditherMethod`, `dithering`, ...). `ditheringIntensity` is accepted as an
/// alias for `dithering`. Missing fields take their defaults.
///
/// # Example
///
/// ```
/// use pixel_dither::{DitherMethod, PixelSettings};
///
/// let settings: PixelSettings = serde_yaml::from_str(
///     "pixelSize: 6\nditherMethod: BAYER_4X4\n",
/// ).unwrap();
/// assert_eq!(settings.pixel_size, 6);
/// assert_eq!(settings.dither_method, DitherMethod::Bayer4x4);
/// assert_eq!(settings.palette_id, "olive-dream");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixelSettings {
    /// Downsampling factor; each output block is `pixel_size` pixels wide.
    pub pixel_size: u32,
    /// Palette reference, resolved by the caller.
    pub palette_id: String,
    /// Dithering strategy.
    pub dither_method: DitherMethod,
    /// Pattern strength in `0.0..=1.0`.
    #[serde(rename = "dithering", alias = "ditheringIntensity")]
    pub dithering_intensity: f32,
    /// Contrast multiplier.
    pub contrast: f32,
    /// Brightness multiplier.
    pub brightness: f32,
    /// Gaussian blur radius in working-buffer pixels.
    pub blur: f32,
    /// Saturation multiplier.
    pub saturation: f32,
}

impl Default for PixelSettings {
    fn default() -> Self {
        Self {
            pixel_size: 4,
            palette_id: DEFAULT_PALETTE_ID.to_string(),
            dither_method: DitherMethod::FloydSteinberg,
            dithering_intensity: 0.5,
            contrast: 1.1,
            brightness: 1.0,
            blur: 0.0,
            saturation: 1.0,
        }
    }
}

/// A settings value outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("pixel size must be at least 1")]
    ZeroPixelSize,
    #[error("dithering intensity must be within 0..=1, got {0}")]
    IntensityOutOfRange(f32),
    #[error("blur must be a non-negative number, got {0}")]
    NegativeBlur(f32),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

impl PixelSettings {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.pixel_size == 0 {
            return Err(SettingsError::ZeroPixelSize);
        }
        for (field, value) in [
            ("dithering", self.dithering_intensity),
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("blur", self.blur),
            ("saturation", self.saturation),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.dithering_intensity) {
            return Err(SettingsError::IntensityOutOfRange(self.dithering_intensity));
        }
        if self.blur < 0.0 {
            return Err(SettingsError::NegativeBlur(self.blur));
        }
        Ok(())
    }

    /// The tonal pre-filter parameters carried by these settings.
    pub fn tone_options(&self) -> ToneOptions {
        ToneOptions::new()
            .blur(self.blur)
            .contrast(self.contrast)
            .brightness(self.brightness)
            .saturation(self.saturation)
    }
}

/// Pixel size suggested for a freshly loaded image of `width` pixels:
/// `max(2, width / 200)`.
pub fn suggested_pixel_size(width: usize) -> u32 {
    u32::try_from(width / 200).unwrap_or(u32::MAX).max(2)
}
