//! Pixel buffers
//!
//! [`Frame`] is the RGBA8 buffer exchanged with the surrounding application.
//! [`WorkingBuffer`] is the reduced-resolution `f32` grid that filtering and
//! quantization operate on.

mod error;
mod rgba;
mod working;

pub use error::FrameError;
pub use rgba::Frame;
pub use working::WorkingBuffer;
