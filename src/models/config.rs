use crate::assets::AssetLoader;
use crate::error::ConfigError;
use pixel_dither::{DitherMethod, Palette, PixelSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Render settings snapshot
    #[serde(default)]
    pub settings: PixelSettings,

    /// Custom palettes, listed after the built-in ones
    #[serde(default)]
    pub palettes: Vec<Palette>,
}

/// Command-line overrides for individual settings fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub pixel_size: Option<u32>,
    pub palette_id: Option<String>,
    pub dither_method: Option<DitherMethod>,
    pub dithering: Option<f32>,
    pub contrast: Option<f32>,
    pub brightness: Option<f32>,
    pub blur: Option<f32>,
    pub saturation: Option<f32>,
}

impl SettingsOverrides {
    /// Apply every set override to `settings`
    pub fn apply(&self, settings: &mut PixelSettings) {
        if let Some(v) = self.pixel_size {
            settings.pixel_size = v;
        }
        if let Some(ref v) = self.palette_id {
            settings.palette_id = v.clone();
        }
        if let Some(v) = self.dither_method {
            settings.dither_method = v;
        }
        if let Some(v) = self.dithering {
            settings.dithering_intensity = v;
        }
        if let Some(v) = self.contrast {
            settings.contrast = v;
        }
        if let Some(v) = self.brightness {
            settings.brightness = v;
        }
        if let Some(v) = self.blur {
            settings.blur = v;
        }
        if let Some(v) = self.saturation {
            settings.saturation = v;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Read, parse and validation failures are logged and fall back to the
    /// defaults.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        palettes = config.palettes.len(),
                        palette_id = %config.settings.palette_id,
                        dither_method = %config.settings.dither_method,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate a config file, reporting every failure
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate YAML config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.settings.validate()?;
        Ok(config)
    }
}
