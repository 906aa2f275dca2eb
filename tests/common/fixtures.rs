//! Test fixtures and constants.

use pixel_dither::Frame;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Palette ids shipped with the crate
pub mod palettes {
    pub const DEFAULT: &str = "olive-dream";
    pub const GAMEBOY: &str = "gameboy";
    pub const NOIR: &str = "noir";
}

/// Horizontal gradient with a vertical tint, fully opaque
pub fn gradient(width: usize, height: usize) -> Frame {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1).max(1)) as u8;
            let g = (y * 255 / (height - 1).max(1)) as u8;
            data.extend_from_slice(&[r, g, 128, 255]);
        }
    }
    Frame::new(width, height, data).unwrap()
}

/// Raw RGBA stream of `count` gradient frames, each shifted a little
pub fn raw_stream(count: usize, width: usize, height: usize) -> Vec<u8> {
    let base = gradient(width, height);
    let mut bytes = Vec::with_capacity(count * base.data().len());
    for i in 0..count {
        bytes.extend(base.data().iter().enumerate().map(|(n, &v)| {
            if n % 4 == 3 {
                v
            } else {
                v.wrapping_add((i * 17) as u8)
            }
        }));
    }
    bytes
}

/// Write `contents` as config.yaml in a fresh temp dir
pub fn config_dir(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

pub fn write_png(dir: &Path, name: &str, frame: &Frame) -> PathBuf {
    let path = dir.join(name);
    let bytes = pixelart_studio::media::encode_png(frame, false).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}
