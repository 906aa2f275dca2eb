//! Tonal adjustment options.

/// Parameters for the tonal pre-filter.
///
/// # Defaults
///
/// The default is the identity: no blur, and contrast, brightness, and
/// saturation all at `1.0`.
///
/// # Example
///
/// ```
/// use pixel_dither::ToneOptions;
///
/// let options = ToneOptions::new().contrast(1.1).blur(0.5);
/// assert!(!options.is_identity());
/// assert!(ToneOptions::new().is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneOptions {
    /// Gaussian blur standard deviation in working-buffer pixels.
    ///
    /// `0.0` disables the blur.
    pub blur: f32,

    /// Contrast multiplier around the channel midpoint `127.5`.
    pub contrast: f32,

    /// Brightness multiplier applied to every channel.
    pub brightness: f32,

    /// Saturation multiplier (`0.0` is grayscale, `1.0` unchanged).
    pub saturation: f32,
}

impl Default for ToneOptions {
    fn default() -> Self {
        Self {
            blur: 0.0,
            contrast: 1.0,
            brightness: 1.0,
            saturation: 1.0,
        }
    }
}

impl ToneOptions {
    /// Identity options. Equivalent to `ToneOptions::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn blur(mut self, sigma: f32) -> Self {
        self.blur = sigma;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    /// `true` when applying these options would leave samples unchanged.
    pub fn is_identity(&self) -> bool {
        self.blur <= 0.0 && self.contrast == 1.0 && self.brightness == 1.0 && self.saturation == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let options = ToneOptions::default();
        assert_eq!(options.blur, 0.0);
        assert_eq!(options.contrast, 1.0);
        assert!(options.is_identity());
    }

    #[test]
    fn test_builder_sets_fields() {
        let options = ToneOptions::new()
            .blur(2.0)
            .contrast(1.2)
            .brightness(0.9)
            .saturation(0.0);
        assert_eq!(
            options,
            ToneOptions {
                blur: 2.0,
                contrast: 1.2,
                brightness: 0.9,
                saturation: 0.0,
            }
        );
        assert!(!options.is_identity());
    }

    #[test]
    fn test_negative_blur_counts_as_off() {
        assert!(ToneOptions::new().blur(-1.0).is_identity());
    }
}
