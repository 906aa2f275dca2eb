//! Custom assertions for rendered frames.

use pixel_dither::{Frame, Palette};

/// Every pixel's RGB is an exact palette entry
pub fn assert_palette_only(frame: &Frame, palette: &Palette) {
    for (i, p) in frame.pixels().enumerate() {
        assert!(
            palette.colors().iter().any(|c| c.to_bytes() == [p[0], p[1], p[2]]),
            "pixel {i} ({}, {}, {}) is not in palette '{}'",
            p[0],
            p[1],
            p[2],
            palette.id()
        );
    }
}

/// Each `block x block` cell (clipped at the edges) is one colour
pub fn assert_blocky(frame: &Frame, block: usize) {
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let anchor = frame.pixel((x / block) * block, (y / block) * block);
            let p = frame.pixel(x, y);
            assert_eq!(
                &p[..3],
                &anchor[..3],
                "pixel ({x}, {y}) differs from its block"
            );
        }
    }
}

/// PNG signature check
pub fn assert_png(bytes: &[u8]) {
    assert!(bytes.len() > 8, "PNG too short: {} bytes", bytes.len());
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "missing PNG signature");
}
