#![allow(
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::manual_range_contains
)]

//! pixel-dither: palette-constrained pixel-art quantization
//!
//! This library turns a full-resolution RGBA frame into a "pixel art"
//! rendition: a reduced-resolution, limited-palette, optionally dithered
//! reconstruction at the original size. It is fast enough to re-render a
//! video frame on every display tick.
//!
//! # Quick Start
//!
//! ```
//! use pixel_dither::{render_frame, DitherMethod, Frame, Palette, PixelSettings, Rgb};
//!
//! let palette = Palette::new(
//!     "bw",
//!     "Black & White",
//!     vec![Rgb::from_u8(0, 0, 0), Rgb::from_u8(255, 255, 255)],
//! )
//! .unwrap();
//!
//! let settings = PixelSettings {
//!     pixel_size: 2,
//!     dither_method: DitherMethod::Bayer4x4,
//!     ..PixelSettings::default()
//! };
//!
//! let source = Frame::filled(8, 8, [128, 128, 128, 255]).unwrap();
//! let out = render_frame(&source, &settings, &palette).unwrap();
//! assert_eq!((out.width(), out.height()), (8, 8));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Frame (W x H, RGBA8)
//!     |
//!     v
//! [Downsample]      nearest neighbor to max(1, W/p) x max(1, H/p)
//!     |
//!     v
//! [Tonal filter]    blur, contrast, brightness, saturate (f32, unclamped)
//!     |
//!     v
//! [Dither]          clamp, quantize to the palette, pattern or diffuse
//!     |
//!     v
//! [Upscale]         nearest neighbor back to W x H, source alpha kept
//! ```
//!
//! # Color Handling
//!
//! Everything happens on raw 8-bit RGB values. Nearest-color matching uses
//! squared Euclidean distance in RGB and breaks ties in palette order. There
//! is no gamma decoding and no perceptual color space.
//!
//! # Dithering Methods
//!
//! [`DitherMethod`] is a closed set:
//!
//! - `NONE`: plain nearest-color quantization
//! - Error diffusion: Floyd-Steinberg, Atkinson, Jarvis-Judice-Ninke, Stucki
//! - Ordered: Bayer 2x2, 4x4, 8x8 and a clustered-dot 4x4
//!
//! The dithering intensity scales the ordered threshold shift or the
//! diffused residual. At intensity `0.0` every method produces the same
//! colors as `NONE`.

pub mod api;
pub mod color;
pub mod dither;
pub mod frame;
pub mod palette;
pub mod preprocess;


pub use api::{
    render_frame, suggested_pixel_size, FrameRenderer, PipelineError, PixelSettings,
    SettingsError, DEFAULT_PALETTE_ID,
};
pub use color::Rgb;
pub use dither::{DitherMethod, ParseDitherMethodError};
pub use frame::{Frame, FrameError, WorkingBuffer};
pub use palette::{builtin_palettes, nearest_color, Palette, PaletteError, ParseColorError};
pub use preprocess::{reduced_dimensions, ToneOptions};
