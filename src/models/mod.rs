pub mod config;
pub mod palette_library;

pub use config::{AppConfig, SettingsOverrides};
pub use palette_library::{PaletteLibrary, CUSTOM_PREFIX};
