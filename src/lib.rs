//! Pixel-art studio
//!
//! Still-image and raw video front end for the `pixel_dither` frame
//! pipeline. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod media;
pub mod models;
pub mod services;
