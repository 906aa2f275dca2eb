//! Tonal pre-filter: blur, contrast, brightness, saturation.
//!
//! The adjustments follow the CSS filter functions of the same names and are
//! applied in that order, in `f32`, with no intermediate clamping. The result
//! is then stored like an 8-bit canvas pixel: rounded and clamped into
//! `0..=255`, so dithering always starts from in-range integer channels.

use super::options::ToneOptions;
use crate::color::store_sample;
use crate::frame::WorkingBuffer;

/// Luma weights used by the CSS `saturate()` matrix.
const LUMA: [f32; 3] = [0.213, 0.715, 0.072];

/// Applies [`ToneOptions`] to a working buffer.
///
/// Holds blur scratch (a transposition buffer and the Gaussian weights) so
/// repeated calls with stable dimensions do not allocate.
#[derive(Debug, Default, Clone)]
pub struct TonalFilter {
    scratch: Vec<[f32; 3]>,
    weights: Vec<f32>,
    sigma: f32,
}

impl TonalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `buffer` in place. Steps whose parameter is the identity are
    /// skipped; every sample is then rounded and clamped to 8-bit range, so
    /// identity options leave integer input unchanged.
    pub fn apply(&mut self, buffer: &mut WorkingBuffer, options: &ToneOptions) {
        if options.blur > 0.0 {
            self.gaussian_blur(buffer, options.blur);
        }

        let ToneOptions {
            contrast,
            brightness,
            saturation,
            ..
        } = *options;
        let matrix = saturate_matrix(saturation);

        for sample in buffer.samples_mut() {
            let mut v = *sample;
            if contrast != 1.0 {
                v = v.map(|c| (c - 127.5) * contrast + 127.5);
            }
            if brightness != 1.0 {
                v = v.map(|c| c * brightness);
            }
            if saturation != 1.0 {
                v = apply_matrix(&matrix, v);
            }
            *sample = store_sample(v);
        }
    }

    /// Separable Gaussian blur, radius `ceil(3 * sigma)`, edges clamped.
    fn gaussian_blur(&mut self, buffer: &mut WorkingBuffer, sigma: f32) {
        self.prepare_weights(sigma);
        let (width, height) = (buffer.width(), buffer.height());

        self.scratch.clear();
        self.scratch.resize(width * height, [0.0; 3]);

        // Horizontal pass: buffer -> scratch
        let radius = self.weights.len() as isize - 1;
        let src = buffer.samples();
        for y in 0..height {
            let row = &src[y * width..(y + 1) * width];
            for x in 0..width {
                self.scratch[y * width + x] =
                    convolve(&self.weights, radius, |i| row[clamp_index(x, i, width)]);
            }
        }

        // Vertical pass: scratch -> buffer
        let dst = buffer.samples_mut();
        for y in 0..height {
            for x in 0..width {
                let scratch = &self.scratch;
                dst[y * width + x] = convolve(&self.weights, radius, |i| {
                    scratch[clamp_index(y, i, height) * width + x]
                });
            }
        }
    }

    /// One-sided normalized weights `w[0..=radius]`; recomputed only when
    /// sigma changes.
    fn prepare_weights(&mut self, sigma: f32) {
        if self.sigma == sigma && !self.weights.is_empty() {
            return;
        }
        let radius = (3.0 * sigma).ceil().max(1.0) as usize;
        let two_sigma_sq = 2.0 * sigma * sigma;

        self.weights.clear();
        self.weights
            .extend((0..=radius).map(|i| (-((i * i) as f32) / two_sigma_sq).exp()));

        let total: f32 = self.weights[0] + 2.0 * self.weights[1..].iter().sum::<f32>();
        for w in &mut self.weights {
            *w /= total;
        }
        self.sigma = sigma;
    }
}

#[inline]
fn clamp_index(center: usize, offset: isize, len: usize) -> usize {
    (center as isize + offset).clamp(0, len as isize - 1) as usize
}

#[inline]
fn convolve(weights: &[f32], radius: isize, sample: impl Fn(isize) -> [f32; 3]) -> [f32; 3] {
    let mut acc = [0.0f32; 3];
    for offset in -radius..=radius {
        let w = weights[offset.unsigned_abs()];
        let s = sample(offset);
        for c in 0..3 {
            acc[c] += s[c] * w;
        }
    }
    acc
}

/// The CSS/SVG `saturate(s)` color matrix.
fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    let [lr, lg, lb] = LUMA;
    [
        [lr + (1.0 - lr) * s, lg - lg * s, lb - lb * s],
        [lr - lr * s, lg + (1.0 - lg) * s, lb - lb * s],
        [lr - lr * s, lg - lg * s, lb + (1.0 - lb) * s],
    ]
}

#[inline]
fn apply_matrix(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    fn buffer(samples: Vec<[f32; 3]>, width: usize) -> WorkingBuffer {
        let height = samples.len() / width;
        WorkingBuffer::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn test_identity_leaves_integers_unchanged() {
        let samples = vec![[12.0, 200.0, 0.0], [255.0, 0.0, 99.0]];
        let mut buf = buffer(samples.clone(), 2);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new());
        assert_eq!(buf.samples(), samples.as_slice());
    }

    #[test]
    fn test_output_is_stored_as_8_bit() {
        let mut buf = buffer(vec![[12.3, 200.7, -4.0], [300.0, 0.5, 99.5]], 2);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new());
        assert_eq!(buf.get(0, 0), [12.0, 201.0, 0.0]);
        assert_eq!(buf.get(1, 0), [255.0, 0.0, 100.0]);
    }

    #[test]
    fn test_contrast_pivots_on_midpoint() {
        let mut buf = buffer(vec![[100.0, 200.0, 127.0]], 1);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().contrast(2.0));
        // 72.5, 272.5, 126.5 before storing
        assert_eq!(buf.get(0, 0), [72.0, 255.0, 126.0]);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let mut buf = buffer(vec![[100.0, 50.0, 200.0]], 1);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().brightness(1.5));
        assert_eq!(buf.get(0, 0), [150.0, 75.0, 255.0]);
    }

    #[test]
    fn test_no_clamp_between_steps() {
        let mut buf = buffer(vec![[200.0; 3]], 1);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().contrast(2.0).brightness(0.5));
        // (200 - 127.5) * 2 + 127.5 = 272.5, then * 0.5 = 136.25
        assert_eq!(buf.get(0, 0), [136.0; 3]);
    }

    #[test]
    fn test_saturate_zero_is_luma_gray() {
        let mut buf = buffer(vec![[255.0, 0.0, 0.0]], 1);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().saturation(0.0));
        // 0.213 * 255 = 54.3
        assert_eq!(buf.get(0, 0), [54.0; 3]);
    }

    #[test]
    fn test_saturate_keeps_gray() {
        let mut buf = buffer(vec![[90.0; 3]], 1);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().saturation(3.0));
        for c in buf.get(0, 0) {
            assert!(approx_eq(c, 90.0, 1e-3), "Gray should stay gray, got {c}");
        }
    }

    #[test]
    fn test_blur_preserves_flat_field() {
        let mut buf = buffer(vec![[80.0, 160.0, 240.0]; 25], 5);
        TonalFilter::new().apply(&mut buf, &ToneOptions::new().blur(1.5));
        for s in buf.samples() {
            for (c, expected) in s.iter().zip([80.0, 160.0, 240.0]) {
                assert!(approx_eq(*c, expected, 1e-3), "{c} != {expected}");
            }
        }
    }

    #[test]
    fn test_blur_spreads_impulse_symmetrically() {
        let mut samples = vec![[0.0; 3]; 49];
        samples[24] = [255.0; 3];
        let mut buf = buffer(samples, 7);
        TonalFilter::new().gaussian_blur(&mut buf, 1.0);

        let center = buf.get(3, 3)[0];
        assert!(center < 255.0 && center > 0.0);
        assert!(approx_eq(buf.get(2, 3)[0], buf.get(4, 3)[0], 1e-4));
        assert!(approx_eq(buf.get(3, 2)[0], buf.get(2, 3)[0], 1e-4));
        assert!(buf.get(2, 3)[0] < center);

        let total: f32 = buf.samples().iter().map(|s| s[0]).sum();
        assert!(approx_eq(total, 255.0, 0.5), "Interior blur keeps energy, got {total}");
    }

    #[test]
    fn test_weights_reused_for_same_sigma() {
        let mut filter = TonalFilter::new();
        filter.prepare_weights(2.0);
        assert_eq!(filter.weights.len(), 7);
        let ptr = filter.weights.as_ptr();
        filter.prepare_weights(2.0);
        assert_eq!(filter.weights.as_ptr(), ptr);
    }
}
