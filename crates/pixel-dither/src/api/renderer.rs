//! Frame pipeline orchestration.

use std::time::Instant;

use super::error::PipelineError;
use super::settings::PixelSettings;
use crate::dither::{dither_buffer, ErrorAccumulator};
use crate::frame::{Frame, WorkingBuffer};
use crate::palette::Palette;
use crate::preprocess::{downsample, reduced_dimensions, upscale, TonalFilter};

/// Renders frames into pixel art, reusing its scratch buffers.
///
/// A renderer owns the working buffer, the error accumulator, and the blur
/// scratch. They are resized per call and keep their allocations, so
/// rendering a stream of same-sized frames does not churn the heap. The
/// renderer carries no other state between calls: output depends only on
/// the arguments of each call.
///
/// # Example
///
/// ```
/// use pixel_dither::{builtin_palettes, Frame, FrameRenderer, PixelSettings};
///
/// let palette = &builtin_palettes()[0];
/// let settings = PixelSettings::default();
/// let source = Frame::filled(64, 48, [90, 140, 60, 255]).unwrap();
///
/// let mut renderer = FrameRenderer::new();
/// let out = renderer.render_frame(&source, &settings, palette).unwrap();
/// assert_eq!((out.width(), out.height()), (64, 48));
/// ```
#[derive(Debug, Default)]
pub struct FrameRenderer {
    working: WorkingBuffer,
    errors: ErrorAccumulator,
    filter: TonalFilter,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `source` with `settings` against `palette`.
    ///
    /// 1. Reduce to `max(1, W / pixel_size) x max(1, H / pixel_size)` by
    ///    nearest-neighbor sampling
    /// 2. Apply the tonal filter at the reduced resolution
    /// 3. Quantize and dither in place
    /// 4. Replicate back to `W x H`, keeping each source pixel's alpha
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidSettings`] when `settings` fail validation.
    pub fn render_frame(
        &mut self,
        source: &Frame,
        settings: &PixelSettings,
        palette: &Palette,
    ) -> Result<Frame, PipelineError> {
        settings.validate()?;
        let start = Instant::now();

        let (rw, rh) = reduced_dimensions(source.width(), source.height(), settings.pixel_size);
        self.working.resize(rw, rh);
        downsample(source, &mut self.working);

        self.filter.apply(&mut self.working, &settings.tone_options());

        dither_buffer(
            settings.dither_method,
            &mut self.working,
            palette,
            settings.dithering_intensity,
            &mut self.errors,
        );

        let mut data = Vec::new();
        upscale(&self.working, source, &mut data);
        let frame = Frame::new(source.width(), source.height(), data)?;

        tracing::debug!(
            width = source.width(),
            height = source.height(),
            reduced_width = rw,
            reduced_height = rh,
            method = %settings.dither_method,
            palette = palette.id(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Rendered frame"
        );
        Ok(frame)
    }

    /// Current working-buffer dimensions (those of the last render).
    pub fn working_dimensions(&self) -> (usize, usize) {
        (self.working.width(), self.working.height())
    }
}

/// Render one frame with a fresh renderer.
///
/// Convenience for one-off renders; use a [`FrameRenderer`] to reuse
/// scratch across frames.
pub fn render_frame(
    source: &Frame,
    settings: &PixelSettings,
    palette: &Palette,
) -> Result<Frame, PipelineError> {
    FrameRenderer::new().render_frame(source, settings, palette)
}
