//! Color types
//!
//! Quantization operates in raw 8-bit RGB. Working-buffer samples are plain
//! `[f32; 3]` triples so that intermediate filter values and accumulated
//! dither error can leave the 0..=255 range until they are clamped.
//!
//! ```
//! use pixel_dither::Rgb;
//!
//! let c = Rgb::from_u8(128, 64, 32);
//! assert_eq!(c.to_sample(), [128.0, 64.0, 32.0]);
//! ```

mod rgb;

pub use rgb::Rgb;

/// Clamp every channel of a sample into `0.0..=255.0`.
#[inline]
pub fn clamp_sample(sample: [f32; 3]) -> [f32; 3] {
    [
        sample[0].clamp(0.0, 255.0),
        sample[1].clamp(0.0, 255.0),
        sample[2].clamp(0.0, 255.0),
    ]
}

/// Store a sample the way an 8-bit canvas does: round half to even, then
/// clamp into `0.0..=255.0`.
#[inline]
pub fn store_sample(sample: [f32; 3]) -> [f32; 3] {
    clamp_sample(sample.map(f32::round_ties_even))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_sample_rounds_then_clamps() {
        assert_eq!(store_sample([-12.75, 400.0, 127.4]), [0.0, 255.0, 127.0]);
        assert_eq!(store_sample([0.5, 1.5, 254.5]), [0.0, 2.0, 254.0]);
        assert_eq!(store_sample([255.4, -0.4, 99.6]), [255.0, 0.0, 100.0]);
    }
}
