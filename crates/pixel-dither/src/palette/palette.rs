//! Palette struct and nearest-color matching.
//!
//! A palette is an ordered, non-empty list of 8-bit RGB colors. Matching is
//! an exhaustive linear scan by squared Euclidean distance in raw RGB, so
//! entry order only matters for breaking exact ties.

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::Rgb;

/// A fixed, ordered set of allowed output colors.
///
/// A `Palette` is never empty: [`Palette::new`] rejects an empty color list,
/// and deserialization goes through the same check. Duplicate colors are
/// accepted; the first occurrence always wins the nearest-color search.
///
/// # Example
///
/// ```
/// use pixel_dither::{Palette, Rgb};
///
/// let colors = vec![Rgb::from_u8(0, 0, 0), Rgb::from_u8(255, 255, 255)];
/// let palette = Palette::new("bw", "Black & White", colors).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.nearest_color([100.0, 100.0, 100.0]), Rgb::from_u8(0, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteSpec", into = "PaletteSpec")]
pub struct Palette {
    id: String,
    name: String,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a new palette.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        colors: Vec<Rgb>,
    ) -> Result<Self, PaletteError> {
        let id = id.into();
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette { id });
        }
        Ok(Self {
            id,
            name: name.into(),
            colors,
        })
    }

    /// Create a palette from hex color strings (`#RRGGBB` or `#RGB`).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first entry that fails
    /// to parse, or [`PaletteError::EmptyPalette`] if `hex` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_dither::Palette;
    ///
    /// let gb = Palette::from_hex("gb", "GameBoy", &["#0f380f", "#306230", "#8bac0f", "#9bbc0f"]).unwrap();
    /// assert_eq!(gb.len(), 4);
    /// ```
    pub fn from_hex<S: AsRef<str>>(
        id: impl Into<String>,
        name: impl Into<String>,
        hex: &[S],
    ) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<Rgb>()
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, name, colors)
    }

    /// Stable identifier referenced by `PixelSettings::palette_id`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Palette colors in insertion order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of colors in the palette (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the palette entry nearest to `sample`.
    ///
    /// Squared Euclidean distance in RGB; the first entry reaching the
    /// minimum wins.
    #[inline]
    pub fn find_nearest(&self, sample: [f32; 3]) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;
        for (i, color) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(sample);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// The palette color nearest to `sample`.
    #[inline]
    pub fn nearest_color(&self, sample: [f32; 3]) -> Rgb {
        self.colors[self.find_nearest(sample)]
    }
}

/// Nearest color in a raw color list.
///
/// Same matching rule as [`Palette::find_nearest`]. `colors` must not be
/// empty; an empty slice yields black.
pub fn nearest_color(sample: [f32; 3], colors: &[Rgb]) -> Rgb {
    let mut best = Rgb::default();
    let mut best_dist = f32::INFINITY;
    for &color in colors {
        let dist = color.distance_squared(sample);
        if dist < best_dist {
            best_dist = dist;
            best = color;
        }
    }
    best
}

/// Serialized palette form: colors stored as hex strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaletteSpec {
    id: String,
    name: String,
    colors: Vec<String>,
}

impl TryFrom<PaletteSpec> for Palette {
    type Error = PaletteError;

    fn try_from(spec: PaletteSpec) -> Result<Self, Self::Error> {
        Palette::from_hex(spec.id, spec.name, &spec.colors)
    }
}

impl From<Palette> for PaletteSpec {
    fn from(palette: Palette) -> Self {
        PaletteSpec {
            colors: palette.colors.iter().map(Rgb::to_string).collect(),
            id: palette.id,
            name: palette.name,
        }
    }
}
