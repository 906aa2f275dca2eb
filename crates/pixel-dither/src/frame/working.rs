//! Reduced-resolution working buffer.

use super::error::FrameError;

/// A `width x height` grid of RGB samples in `f32`.
///
/// Samples are not clamped: the tonal filter may push them outside
/// `0.0..=255.0` and the dither engine clamps before quantizing. After
/// dithering every sample holds an exact palette color.
///
/// The buffer keeps its allocation across [`resize`](Self::resize) calls so a
/// renderer can reuse it frame after frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingBuffer {
    width: usize,
    height: usize,
    samples: Vec<[f32; 3]>,
}

impl WorkingBuffer {
    /// A zero-filled buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![[0.0; 3]; width * height],
        }
    }

    /// Wrap existing row-major samples.
    ///
    /// # Errors
    ///
    /// [`FrameError::LengthMismatch`] if `samples.len() != width * height`.
    pub fn from_samples(
        width: usize,
        height: usize,
        samples: Vec<[f32; 3]>,
    ) -> Result<Self, FrameError> {
        if samples.len() != width * height {
            return Err(FrameError::LengthMismatch {
                expected: width * height,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Change dimensions, reusing the existing allocation. Contents are
    /// zeroed.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.samples.clear();
        self.samples.resize(width * height, [0.0; 3]);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, sample: [f32; 3]) {
        self.samples[y * self.width + x] = sample;
    }

    /// Row-major samples.
    #[inline]
    pub fn samples(&self) -> &[[f32; 3]] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.samples
    }

    /// Allocated sample capacity, for scratch reuse checks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }
}
