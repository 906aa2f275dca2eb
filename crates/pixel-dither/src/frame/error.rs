use thiserror::Error;

/// Error type for buffer construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Width or height is zero
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Data length does not match the dimensions
    #[error("buffer length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch {
        /// `width * height * channels`
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}
