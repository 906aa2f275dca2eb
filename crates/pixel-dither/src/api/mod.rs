//! Public API for the pixel-dither crate.
//!
//! This module provides the frame pipeline: [`PixelSettings`], the
//! [`FrameRenderer`] that owns reusable scratch, and the [`PipelineError`]
//! unified error type.

mod error;
mod renderer;
mod settings;

pub use error::PipelineError;
pub use renderer::{render_frame, FrameRenderer};
pub use settings::{suggested_pixel_size, PixelSettings, SettingsError, DEFAULT_PALETTE_ID};
