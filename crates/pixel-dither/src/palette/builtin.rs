//! Built-in palettes shipped with the library.

use super::palette::Palette;
use crate::color::Rgb;

const fn c(hex: u32) -> Rgb {
    Rgb::from_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const BUILTIN: &[(&str, &str, &[Rgb])] = &[
    (
        "olive-dream",
        "Olive Dream",
        &[c(0x2d3122), c(0x575d41), c(0x898e6c), c(0xbcc19f), c(0xf2f5e1)],
    ),
    (
        "gameboy",
        "Classic GameBoy",
        &[c(0x0f380f), c(0x306230), c(0x8bac0f), c(0x9bbc0f)],
    ),
    (
        "noir",
        "Noir Cinema",
        &[
            c(0x000000),
            c(0x333333),
            c(0x666666),
            c(0x999999),
            c(0xcccccc),
            c(0xffffff),
        ],
    ),
    (
        "cga",
        "CGA Mode 4",
        &[c(0x000000), c(0x55ffff), c(0xff55ff), c(0xffffff)],
    ),
    (
        "sepia",
        "Vintage Sepia",
        &[c(0x433422), c(0x6e5a3e), c(0xa6906f), c(0xe1d2b1)],
    ),
    (
        "sunset",
        "Cyber Sunset",
        &[c(0x2d1b33), c(0x731c4b), c(0xf22e52), c(0xfb8c4d), c(0xffed9d)],
    ),
    (
        "nes",
        "Retro 8-Bit",
        &[
            c(0x000000),
            c(0xfc0000),
            c(0x0000fc),
            c(0x00fc00),
            c(0xfcfcfc),
            c(0xfcac44),
        ],
    ),
];

/// The built-in palettes, in display order. `olive-dream` comes first and is
/// the default.
///
/// ```
/// let palettes = pixel_dither::builtin_palettes();
/// assert_eq!(palettes[0].id(), "olive-dream");
/// ```
pub fn builtin_palettes() -> Vec<Palette> {
    BUILTIN
        .iter()
        .filter_map(|(id, name, colors)| Palette::new(*id, *name, colors.to_vec()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_present_in_order() {
        let ids: Vec<String> = builtin_palettes()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(
            ids,
            ["olive-dream", "gameboy", "noir", "cga", "sepia", "sunset", "nes"]
        );
    }

    #[test]
    fn test_builtin_colors_match_hex() {
        let palettes = builtin_palettes();
        let gameboy = &palettes[1];
        assert_eq!(gameboy.name(), "Classic GameBoy");
        let hex: Vec<String> = gameboy.colors().iter().map(Rgb::to_string).collect();
        assert_eq!(hex, ["#0f380f", "#306230", "#8bac0f", "#9bbc0f"]);

        let nes = &palettes[6];
        assert_eq!(nes.colors()[5], Rgb::from_u8(0xfc, 0xac, 0x44));
    }

    #[test]
    fn test_builtins_non_empty() {
        assert!(builtin_palettes().iter().all(|p| !p.is_empty()));
    }
}
