//! Dithering algorithms.
//!
//! Three families turn a filtered working buffer into palette colors:
//!
//! - **Direct**: nearest-color quantization with no spatial interaction
//! - **Ordered**: a tiled threshold matrix shifts each pixel before
//!   quantization ([`ThresholdMatrix`])
//! - **Error diffusion**: each pixel's quantization residual is pushed onto
//!   unvisited neighbors in raster order ([`Kernel`])
//!
//! All of them implement [`Dither`]. [`DitherMethod::ditherer`] maps the
//! closed method enum onto its constant strategy, so selecting a method
//! never allocates.
//!
//! # Example
//!
//! ```
//! use pixel_dither::dither::{Dither, DitherMethod, ErrorAccumulator};
//! use pixel_dither::{Palette, Rgb, WorkingBuffer};
//!
//! let palette = Palette::new("bw", "BW", vec![Rgb::from_u8(0, 0, 0), Rgb::from_u8(255, 255, 255)]).unwrap();
//! let mut buffer = WorkingBuffer::from_samples(2, 2, vec![[100.0; 3]; 4]).unwrap();
//! let mut errors = ErrorAccumulator::default();
//!
//! DitherMethod::Bayer2x2
//!     .ditherer()
//!     .dither(&mut buffer, &palette, 1.0, &mut errors);
//! ```

mod kernel;
mod method;
mod ordered;

pub use kernel::*;
pub use method::{DitherMethod, ParseDitherMethodError};
pub use ordered::*;

use crate::color::clamp_sample;
use crate::frame::WorkingBuffer;
use crate::palette::Palette;

/// A dithering strategy.
///
/// Implementors quantize `buffer` in place: on return every sample holds an
/// exact palette color. Samples are clamped to `0.0..=255.0` before they are
/// matched.
pub trait Dither {
    /// Quantize `buffer` against `palette`.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Filtered samples; overwritten with palette colors
    /// * `palette` - Colors to quantize to
    /// * `intensity` - Pattern strength in `0.0..=1.0`. At `0.0` the result
    ///   equals plain nearest-color quantization.
    /// * `errors` - Scratch for error diffusion; reset by the strategies
    ///   that use it
    fn dither(
        &self,
        buffer: &mut WorkingBuffer,
        palette: &Palette,
        intensity: f32,
        errors: &mut ErrorAccumulator,
    );
}

/// Nearest-color quantization without dithering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Dither for Direct {
    fn dither(
        &self,
        buffer: &mut WorkingBuffer,
        palette: &Palette,
        _intensity: f32,
        _errors: &mut ErrorAccumulator,
    ) {
        for sample in buffer.samples_mut() {
            *sample = palette.nearest_color(clamp_sample(*sample)).to_sample();
        }
    }
}

/// Per-pixel error storage for error diffusion.
///
/// A full grid the size of the working buffer holding three `f32` error
/// terms per pixel. It is zeroed at the start of every diffusion pass and
/// keeps its allocation between passes.
#[derive(Debug, Default, Clone)]
pub struct ErrorAccumulator {
    width: usize,
    height: usize,
    cells: Vec<[f32; 3]>,
}

impl ErrorAccumulator {
    /// Resize to `width x height` and zero every cell.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, [0.0; 3]);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Error accumulated so far for `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.cells[y * self.width + x]
    }

    /// Add error to `(x, y)`.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, error: [f32; 3]) {
        if x < self.width && y < self.height {
            let cell = &mut self.cells[y * self.width + x];
            for c in 0..3 {
                cell[c] += error[c];
            }
        }
    }

    /// Sum of all cells, per channel.
    pub fn total(&self) -> [f32; 3] {
        self.cells.iter().fold([0.0; 3], |acc, e| {
            [acc[0] + e[0], acc[1] + e[1], acc[2] + e[2]]
        })
    }
}

/// Quantize `buffer` in place with `method`.
pub fn dither_buffer(
    method: DitherMethod,
    buffer: &mut WorkingBuffer,
    palette: &Palette,
    intensity: f32,
    errors: &mut ErrorAccumulator,
) {
    method.ditherer().dither(buffer, palette, intensity, errors);
}
