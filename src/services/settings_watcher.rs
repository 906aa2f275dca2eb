//! Settings file watcher.
//!
//! Monitors the config file and publishes each valid, changed settings
//! snapshot on a `watch` channel. Invalid edits are logged and ignored, so
//! subscribers always hold the last good snapshot.

use crate::models::{AppConfig, SettingsOverrides};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use pixel_dither::PixelSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Quiet period after the last filesystem event before reloading
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Keeps the underlying watcher alive; dropping it stops reloads.
pub struct SettingsWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. Must be called inside a tokio runtime.
    ///
    /// `overrides` are re-applied on every reload so command-line flags keep
    /// winning over the file.
    pub fn spawn(
        path: PathBuf,
        overrides: SettingsOverrides,
        sender: watch::Sender<PixelSettings>,
    ) -> Result<Self, notify::Error> {
        let (tx, mut rx) = mpsc::channel::<()>(16);

        // Editors often replace the file, so watch its directory and filter
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_access() {
                        return;
                    }
                    let relevant = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if relevant {
                        let _ = tx.try_send(());
                    }
                }
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let reload_path = path.clone();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Wait for the burst of events to settle
                loop {
                    match tokio::time::timeout(DEBOUNCE, rx.recv()).await {
                        Ok(Some(())) => continue,
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }

                let Some(settings) = reload(&reload_path, &overrides) else {
                    continue;
                };
                let pixel_size = settings.pixel_size;
                let palette_id = settings.palette_id.clone();
                let dither_method = settings.dither_method;
                let changed = sender.send_if_modified(|current| {
                    if *current == settings {
                        false
                    } else {
                        *current = settings;
                        true
                    }
                });
                if changed {
                    tracing::info!(
                        pixel_size,
                        palette_id = %palette_id,
                        dither_method = %dither_method,
                        "Settings reloaded"
                    );
                } else {
                    tracing::debug!("Config changed but settings are unchanged");
                }
            }
        });

        tracing::info!(path = %path.display(), "Settings watcher started");
        Ok(Self {
            path,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read `path` and apply `overrides`; `None` if the result is unusable.
pub fn reload(path: &Path, overrides: &SettingsOverrides) -> Option<PixelSettings> {
    let mut settings = match AppConfig::load_from_path(path) {
        Ok(config) => config.settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
            return None;
        }
    };
    overrides.apply(&mut settings);
    if let Err(e) = settings.validate() {
        tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid settings");
        return None;
    }
    Some(settings)
}
