//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// A character other than `0-9`, `a-f`, `A-F` (after the optional '#')
    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette '{id}' cannot be empty")]
    EmptyPalette {
        /// Id of the rejected palette
        id: String,
    },
    /// Invalid hex color string
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        /// Position of the offending entry in the color list
        index: usize,
        /// Underlying parse failure
        source: ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_message() {
        let err = PaletteError::EmptyPalette {
            id: "custom-1".to_string(),
        };
        assert_eq!(err.to_string(), "palette 'custom-1' cannot be empty");
    }

    #[test]
    fn test_parse_color_message_includes_index() {
        let err = PaletteError::ParseColor {
            index: 2,
            source: ParseColorError::InvalidLength,
        };
        assert_eq!(
            err.to_string(),
            "invalid color at index 2: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_invalid_hex_message() {
        assert_eq!(
            ParseColorError::InvalidHex('+').to_string(),
            "invalid hex character: '+'"
        );
    }
}
