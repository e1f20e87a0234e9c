use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::error::ConfigError;

pub const DEFAULT_SETTINGS_FILE: &str = "carousel.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CarouselSettings {
    /// How long the visual transition runs; the transition lock is held this long.
    pub transition_ms: u64,
    pub autoplay_interval_ms: u64,
    /// Grace delay between every image settling and the first autoplay start.
    pub startup_delay_ms: u64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            transition_ms: 1600,
            autoplay_interval_ms: 8000,
            startup_delay_ms: 1000,
        }
    }
}

impl CarouselSettings {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                setting: "transition_ms",
            });
        }
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                setting: "autoplay_interval_ms",
            });
        }
        // A zero startup delay is fine: autoplay then starts on the next turn.
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    transition_ms: Option<u64>,
    autoplay_interval_ms: Option<u64>,
    startup_delay_ms: Option<u64>,
}

/// Builds settings from defaults, then the TOML file, then the environment.
///
/// A missing default file is not an error; an explicitly named file that
/// cannot be read or parsed is.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<CarouselSettings> {
    let mut settings = CarouselSettings::default();

    let file_cfg = match path {
        Some(path) => Some(read_settings_file(path)?),
        None => {
            let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                Some(read_settings_file(&default_path)?)
            } else {
                None
            }
        }
    };

    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.transition_ms {
            settings.transition_ms = v;
        }
        if let Some(v) = file_cfg.autoplay_interval_ms {
            settings.autoplay_interval_ms = v;
        }
        if let Some(v) = file_cfg.startup_delay_ms {
            settings.startup_delay_ms = v;
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<SettingsFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str::<SettingsFile>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

/// Applies `CAROUSEL_*` then `APP__*` overrides; later names win and values
/// that do not parse as milliseconds are ignored.
fn apply_env_overrides(
    settings: &mut CarouselSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let read = |keys: [&str; 2]| {
        keys.into_iter()
            .filter_map(&lookup)
            .filter_map(|raw| raw.trim().parse::<u64>().ok())
            .last()
    };

    if let Some(v) = read(["CAROUSEL_TRANSITION_MS", "APP__TRANSITION_MS"]) {
        settings.transition_ms = v;
    }
    if let Some(v) = read([
        "CAROUSEL_AUTOPLAY_INTERVAL_MS",
        "APP__AUTOPLAY_INTERVAL_MS",
    ]) {
        settings.autoplay_interval_ms = v;
    }
    if let Some(v) = read(["CAROUSEL_STARTUP_DELAY_MS", "APP__STARTUP_DELAY_MS"]) {
        settings.startup_delay_ms = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
