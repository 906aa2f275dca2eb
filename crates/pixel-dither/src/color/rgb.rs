//! 8-bit RGB color type
//!
//! Pixel art quantization works directly on raw 8-bit RGB channel values.
//! There is no gamma decoding: distances and dither error are computed on
//! the encoded values, exactly as they appear in the frame buffer.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit RGB color.
///
/// Used for palette entries and for quantized output pixels. Alpha is never
/// part of a color; the pipeline carries it separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use pixel_dither::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel values as floats, the representation the quantizer works on.
    #[inline]
    pub fn to_sample(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Squared Euclidean distance between a (possibly fractional) sample
    /// and this color.
    #[inline]
    pub fn distance_squared(self, sample: [f32; 3]) -> f32 {
        let dr = sample[0] - self.r as f32;
        let dg = sample[1] - self.g as f32;
        let db = sample[2] - self.b as f32;
        dr * dr + dg * dg + db * db
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (shorthand, each digit doubled)
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixel_dither::Rgb;
    ///
    /// let olive: Rgb = "#2d3122".parse().unwrap();
    /// assert_eq!(olive.to_bytes(), [0x2d, 0x31, 0x22]);
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red.to_bytes(), [255, 0, 0]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Also keeps byte slicing below on char boundaries
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(c));
        }

        let b = s.as_bytes();
        match b.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                Ok(Self::from_u8(
                    nibble(b[0]) * 17,
                    nibble(b[1]) * 17,
                    nibble(b[2]) * 17,
                ))
            }
            6 => Ok(Self::from_u8(
                nibble(b[0]) << 4 | nibble(b[1]),
                nibble(b[2]) << 4 | nibble(b[3]),
                nibble(b[4]) << 4 | nibble(b[5]),
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// Value of an ASCII hex digit.
#[inline]
fn nibble(digit: u8) -> u8 {
    (digit as char).to_digit(16).unwrap_or(0) as u8
}
