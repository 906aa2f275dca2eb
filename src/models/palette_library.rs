use pixel_dither::{builtin_palettes, Palette, PaletteError};

/// Prefix carried by every user-supplied palette id
pub const CUSTOM_PREFIX: &str = "custom-";

/// Read-only palette lookup: built-in palettes followed by custom ones.
///
/// Never empty, so [`resolve`](Self::resolve) always has a fallback.
#[derive(Debug, Clone)]
pub struct PaletteLibrary {
    palettes: Vec<Palette>,
}

impl PaletteLibrary {
    /// Built-ins plus `custom`. Custom ids get the `custom-` prefix when
    /// they do not already carry it.
    pub fn new(custom: &[Palette]) -> Result<Self, PaletteError> {
        let mut palettes = builtin_palettes();
        for palette in custom {
            let id = if palette.id().starts_with(CUSTOM_PREFIX) {
                palette.id().to_string()
            } else {
                format!("{CUSTOM_PREFIX}{}", palette.id())
            };
            if palettes.iter().any(|p| p.id() == id) {
                tracing::warn!(id = %id, "Duplicate palette id, keeping the first");
                continue;
            }
            palettes.push(Palette::new(id, palette.name(), palette.colors().to_vec())?);
        }
        Ok(Self { palettes })
    }

    /// Built-in palettes only
    pub fn builtin() -> Self {
        Self {
            palettes: builtin_palettes(),
        }
    }

    /// Palette with `id`, or the first palette when the id is unknown
    pub fn resolve(&self, id: &str) -> &Palette {
        match self.get(id) {
            Some(palette) => palette,
            None => {
                let fallback = &self.palettes[0];
                tracing::warn!(
                    requested = %id,
                    fallback = %fallback.id(),
                    "Unknown palette id, using fallback"
                );
                fallback
            }
        }
    }

    /// Palette with exactly `id`
    pub fn get(&self, id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl Default for PaletteLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
