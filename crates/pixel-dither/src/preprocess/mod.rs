//! Preprocessing ahead of quantization.
//!
//! The pipeline order is:
//!
//! 1. **Downsample** (nearest neighbor) to the reduced working resolution
//! 2. **Tonal filter**: blur, contrast, brightness, saturation
//!
//! Filtering runs at the reduced resolution, so its cost scales with the
//! working buffer rather than the source frame.

mod filter;
mod options;
mod resample;

pub use filter::TonalFilter;
pub use options::ToneOptions;
pub use resample::{downsample, nearest_index, reduced_dimensions, upscale};
