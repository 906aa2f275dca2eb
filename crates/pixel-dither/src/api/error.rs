//! Unified error type for the frame pipeline.

use thiserror::Error;

use super::settings::SettingsError;
use crate::frame::FrameError;

/// Failure of a [`FrameRenderer::render_frame`](super::FrameRenderer::render_frame)
/// call. No partial output is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Settings outside their valid range
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    /// Source or output buffer has inconsistent dimensions
    #[error("invalid frame: {0}")]
    InvalidFrame(#[from] FrameError),
}
