//! RGBA8 frame buffer.

use super::error::FrameError;

/// A source or rendered frame: tightly packed RGBA8, row-major.
///
/// # Example
///
/// ```
/// use pixel_dither::Frame;
///
/// let frame = Frame::filled(4, 2, [128, 128, 128, 255]).unwrap();
/// assert_eq!(frame.data().len(), 4 * 2 * 4);
/// assert_eq!(frame.pixel(3, 1), [128, 128, 128, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 4;

    /// Wrap existing RGBA8 data.
    ///
    /// # Errors
    ///
    /// [`FrameError::ZeroDimensions`] if either dimension is zero,
    /// [`FrameError::LengthMismatch`] if `data.len() != width * height * 4`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimensions { width, height });
        }
        let expected = width * height * Self::CHANNELS;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimensions { width, height });
        }
        let data = rgba.repeat(width * height);
        Self::new(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame and return its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(Self::CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            Frame::new(0, 3, Vec::new()),
            Err(FrameError::ZeroDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Frame::filled(3, 0, [0; 4]).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert_eq!(
            Frame::new(2, 2, vec![0; 15]),
            Err(FrameError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_pixel_indexing_is_row_major() {
        let mut data = vec![0u8; 3 * 2 * 4];
        // pixel (2, 1)
        data[(3 + 2) * 4..(3 + 2) * 4 + 4].copy_from_slice(&[1, 2, 3, 4]);
        let frame = Frame::new(3, 2, data).unwrap();
        assert_eq!(frame.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(frame.pixels().nth(5), Some([1, 2, 3, 4]));
    }
}
