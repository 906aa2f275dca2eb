use pixel_dither::{FrameError, SettingsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Truncated frame: got {got} of {expected} bytes")]
    TruncatedFrame { got: usize, expected: usize },

    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Invalid frame rate: {0}")]
    InvalidFps(f64),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Render worker failed: {0}")]
    Worker(String),
}
