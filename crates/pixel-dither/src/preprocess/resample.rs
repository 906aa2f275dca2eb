//! Nearest-neighbor resampling between frames and working buffers.
//!
//! Both directions map a destination index to the source index whose span
//! contains the destination pixel centre:
//! `src = floor((2 * dst + 1) * src_len / (2 * dst_len))`. No interpolation
//! is performed, which keeps block edges hard.

use crate::frame::{Frame, WorkingBuffer};

/// Source index sampled for destination index `dst`.
#[inline]
pub fn nearest_index(dst: usize, dst_len: usize, src_len: usize) -> usize {
    ((2 * dst + 1) * src_len) / (2 * dst_len)
}

/// Reduced working resolution for a frame of `width x height` at `pixel_size`.
///
/// Each dimension is `floor(len / pixel_size)`, clamped to at least 1. A
/// `pixel_size` of 0 is treated as 1.
///
/// ```
/// use pixel_dither::reduced_dimensions;
///
/// assert_eq!(reduced_dimensions(640, 480, 4), (160, 120));
/// assert_eq!(reduced_dimensions(3, 2, 8), (1, 1));
/// ```
pub fn reduced_dimensions(width: usize, height: usize, pixel_size: u32) -> (usize, usize) {
    let size = pixel_size.max(1) as usize;
    ((width / size).max(1), (height / size).max(1))
}

/// Fill `buffer` (already sized to the reduced resolution) from `frame`.
pub fn downsample(frame: &Frame, buffer: &mut WorkingBuffer) {
    let (fw, fh) = (frame.width(), frame.height());
    let (bw, bh) = (buffer.width(), buffer.height());
    let data = frame.data();
    let samples = buffer.samples_mut();

    for y in 0..bh {
        let sy = nearest_index(y, bh, fh);
        for x in 0..bw {
            let sx = nearest_index(x, bw, fw);
            let i = (sy * fw + sx) * Frame::CHANNELS;
            samples[y * bw + x] = [data[i] as f32, data[i + 1] as f32, data[i + 2] as f32];
        }
    }
}

/// Replicate the quantized `buffer` back to `frame`'s resolution.
///
/// RGB comes from the buffer; alpha is copied from the matching pixel of
/// `frame`. `out` is cleared and refilled with RGBA8 data.
pub fn upscale(buffer: &WorkingBuffer, frame: &Frame, out: &mut Vec<u8>) {
    let (fw, fh) = (frame.width(), frame.height());
    let (bw, bh) = (buffer.width(), buffer.height());
    let source = frame.data();
    let samples = buffer.samples();

    out.clear();
    out.reserve(fw * fh * Frame::CHANNELS);

    for y in 0..fh {
        let by = nearest_index(y, fh, bh);
        let row = &samples[by * bw..(by + 1) * bw];
        for x in 0..fw {
            let s = row[nearest_index(x, fw, bw)];
            let alpha = source[(y * fw + x) * Frame::CHANNELS + 3];
            out.extend_from_slice(&[to_channel(s[0]), to_channel(s[1]), to_channel(s[2]), alpha]);
        }
    }
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_dimensions_floor_and_clamp() {
        assert_eq!(reduced_dimensions(10, 7, 3), (3, 2));
        assert_eq!(reduced_dimensions(1, 1, 50), (1, 1));
        assert_eq!(reduced_dimensions(9, 9, 0), (9, 9));
    }

    #[test]
    fn test_reduced_dimensions_monotonic() {
        for size in 1..40 {
            let (w0, h0) = reduced_dimensions(333, 101, size);
            let (w1, h1) = reduced_dimensions(333, 101, size + 1);
            assert!(w1 <= w0 && h1 <= h0, "pixel size {size} -> {}", size + 1);
        }
    }

    #[test]
    fn test_nearest_index_samples_block_centres() {
        // 8 source pixels into 2: centres at 2 and 6
        assert_eq!(nearest_index(0, 2, 8), 2);
        assert_eq!(nearest_index(1, 2, 8), 6);
        // Upscaling 2 -> 8: first four map to 0, rest to 1
        let mapped: Vec<usize> = (0..8).map(|x| nearest_index(x, 8, 2)).collect();
        assert_eq!(mapped, [0, 0, 0, 0, 1, 1, 1, 1]);
        // Identity
        assert!((0..5).all(|i| nearest_index(i, 5, 5) == i));
    }

    #[test]
    fn test_downsample_picks_source_pixels() {
        let data: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i, 255]).collect();
        let frame = Frame::new(4, 4, data).unwrap();
        let mut buffer = WorkingBuffer::new(2, 2);
        downsample(&frame, &mut buffer);
        // sampled (1,1), (3,1), (1,3), (3,3)
        let values: Vec<f32> = buffer.samples().iter().map(|s| s[0]).collect();
        assert_eq!(values, [5.0, 7.0, 13.0, 15.0]);
    }

    #[test]
    fn test_upscale_replicates_and_keeps_alpha() {
        let mut data = [10u8, 20, 30, 255].repeat(4);
        data[7] = 0; // pixel (1,0) transparent
        let frame = Frame::new(2, 2, data).unwrap();
        let buffer = WorkingBuffer::from_samples(1, 1, vec![[255.0, 0.0, 128.0]]).unwrap();

        let mut out = Vec::new();
        upscale(&buffer, &frame, &mut out);
        assert_eq!(
            out,
            [255, 0, 128, 255, 255, 0, 128, 0, 255, 0, 128, 255, 255, 0, 128, 255]
        );
    }
}
