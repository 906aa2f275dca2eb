//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the nearest-color quantizer,
//! the built-in palettes, and error types for parsing and validation.

mod builtin;
mod error;
mod palette;

pub use builtin::builtin_palettes;
pub use error::{PaletteError, ParseColorError};
pub use palette::{nearest_color, Palette};
