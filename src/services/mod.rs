pub mod frame_scheduler;
pub mod settings_watcher;

pub use frame_scheduler::{FrameScheduler, StreamStats, DEFAULT_FPS};
pub use settings_watcher::{reload, SettingsWatcher, DEBOUNCE};
