//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how quantization error is distributed to
//! neighboring pixels that the raster scan has not reached yet.

use super::{Dither, ErrorAccumulator};
use crate::color::clamp_sample;
use crate::frame::WorkingBuffer;
use crate::palette::Palette;

/// An error diffusion kernel.
///
/// Each entry specifies an offset (dx, dy) and a weight for that neighbor.
/// Every offset points forward in raster order: `dy > 0`, or `dy == 0` with
/// `dx > 0`.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Most kernels
/// propagate 100% of error (sum equals divisor), but Atkinson intentionally
/// propagates only 75%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    ///
    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Atkinson dithering kernel.
///
/// Distributes error to 6 neighbors with 75% total propagation (6/8).
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
};

/// Jarvis-Judice-Ninke dithering kernel.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// Stucki dithering kernel.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

impl Kernel {
    /// Sum of all entry weights.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }

    /// Spread `residual` from `(x, y)` into the accumulator.
    ///
    /// Targets outside the accumulator are dropped; the remaining weights are
    /// not renormalized.
    #[inline]
    pub fn diffuse(&self, errors: &mut ErrorAccumulator, x: usize, y: usize, residual: [f32; 3]) {
        let divisor = self.divisor as f32;
        for &(dx, dy, weight) in self.entries {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 {
                continue;
            }
            let factor = weight as f32;
            errors.add(
                nx as usize,
                ny as usize,
                [
                    residual[0] * factor / divisor,
                    residual[1] * factor / divisor,
                    residual[2] * factor / divisor,
                ],
            );
        }
    }
}

impl Dither for Kernel {
    fn dither(
        &self,
        buffer: &mut WorkingBuffer,
        palette: &Palette,
        intensity: f32,
        errors: &mut ErrorAccumulator,
    ) {
        let (width, height) = (buffer.width(), buffer.height());
        errors.reset(width, height);

        for y in 0..height {
            for x in 0..width {
                let sample = buffer.get(x, y);
                let err = errors.get(x, y);
                let adjusted = clamp_sample([
                    sample[0] + err[0],
                    sample[1] + err[1],
                    sample[2] + err[2],
                ]);

                let quantized = palette.nearest_color(adjusted).to_sample();
                buffer.set(x, y, quantized);

                let residual = [
                    (adjusted[0] - quantized[0]) * intensity,
                    (adjusted[1] - quantized[1]) * intensity,
                    (adjusted[2] - quantized[2]) * intensity,
                ];
                self.diffuse(errors, x, y, residual);
            }
        }
    }
}
