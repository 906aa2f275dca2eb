//! Ordered (threshold matrix) dithering.
//!
//! Each pixel is shifted by a fixed amount taken from a tiled threshold
//! matrix, then quantized on its own. No error travels between pixels, so
//! the result never bleeds across edges and is stable under small input
//! changes.

use super::{Dither, ErrorAccumulator};
use crate::color::clamp_sample;
use crate::frame::WorkingBuffer;
use crate::palette::Palette;

mod tables {
    include!(concat!(env!("OUT_DIR"), "/threshold_tables.rs"));
}

/// A square threshold matrix, tiled across the buffer.
///
/// `thresholds` is row-major, `size * size` long, every value in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMatrix {
    /// Edge length of the matrix.
    pub size: usize,
    /// Normalized thresholds `(rank + 0.5) / size²`.
    pub thresholds: &'static [f32],
}

/// 2x2 Bayer matrix, ranks `[[0, 2], [3, 1]]`.
pub const BAYER_2X2: ThresholdMatrix = ThresholdMatrix {
    size: 2,
    thresholds: &tables::BAYER_2X2,
};

/// 4x4 Bayer matrix (recursive Bayer ranking).
pub const BAYER_4X4: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    thresholds: &tables::BAYER_4X4,
};

/// 8x8 Bayer matrix (recursive Bayer ranking).
pub const BAYER_8X8: ThresholdMatrix = ThresholdMatrix {
    size: 8,
    thresholds: &tables::BAYER_8X8,
};

/// 4x4 clustered-dot matrix. Dots grow outward from the centre of each
/// tile, giving a halftone look.
pub const CLUSTERED_4X4: ThresholdMatrix = ThresholdMatrix {
    size: 4,
    thresholds: &tables::CLUSTERED_4X4,
};

impl ThresholdMatrix {
    /// Threshold for pixel `(x, y)`, tiling the matrix by modulo indexing.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f32 {
        self.thresholds[(y % self.size) * self.size + (x % self.size)]
    }

    /// Channel shift applied at `(x, y)`: `(threshold - 0.5) * intensity * 255`.
    #[inline]
    pub fn shift(&self, x: usize, y: usize, intensity: f32) -> f32 {
        (self.threshold(x, y) - 0.5) * intensity * 255.0
    }
}

impl Dither for ThresholdMatrix {
    fn dither(
        &self,
        buffer: &mut WorkingBuffer,
        palette: &Palette,
        intensity: f32,
        _errors: &mut ErrorAccumulator,
    ) {
        let width = buffer.width();
        for (i, sample) in buffer.samples_mut().iter_mut().enumerate() {
            let shift = self.shift(i % width, i / width, intensity);
            let shifted = clamp_sample([sample[0] + shift, sample[1] + shift, sample[2] + shift]);
            *sample = palette.nearest_color(shifted).to_sample();
        }
    }
}
