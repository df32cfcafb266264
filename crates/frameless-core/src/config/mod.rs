mod loader;
pub mod template;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::{Monitor, Rect};

pub use loader::{config_dir, config_path, load, save, try_load};

/// Top-level settings for Frameless.
///
/// Loaded from `~/.config/frameless/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File logging.
    pub logging: LogConfig,
    /// Window catalog refresh behaviour.
    pub refresh: RefreshConfig,
    /// Values a new profile starts from.
    pub defaults: Defaults,
    /// Saved per-application profiles.
    #[serde(rename = "app", skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<AppSetting>,
}

/// Window catalog refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Milliseconds between periodic catalog refreshes.
    pub interval_ms: u64,
    /// Also refresh as soon as the OS reports windows appearing,
    /// disappearing or being renamed.
    pub event_hooks: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            event_hooks: true,
        }
    }
}

/// How a profile finds its window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Exact window title.
    #[default]
    Title,
    /// Exact executable path of the owning process.
    Executable,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "Window Title",
            Self::Executable => "Executable Path",
        })
    }
}

/// Starting values for a new profile.
///
/// `Monitor = 0` means "the primary display".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Defaults {
    pub monitor: u32,
    pub match_type: MatchType,
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            monitor: 0,
            match_type: MatchType::Title,
            offset_x: 0,
            offset_y: 0,
            width: 1920,
            height: 1080,
        }
    }
}

/// A saved profile: which window to match and where to pin it.
///
/// `Monitor` is the 1-based display number. Offsets are relative to
/// that display's top-left corner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppSetting {
    pub window_name: String,
    pub exe_path: String,
    pub monitor: u32,
    pub match_type: MatchType,
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl AppSetting {
    /// A blank profile seeded from the configured defaults.
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            monitor: defaults.monitor,
            match_type: defaults.match_type,
            offset_x: defaults.offset_x,
            offset_y: defaults.offset_y,
            width: defaults.width,
            height: defaults.height,
            ..Default::default()
        }
    }

    /// The field compared against the catalog for this match type.
    pub fn match_key(&self) -> &str {
        match self.match_type {
            MatchType::Title => &self.window_name,
            MatchType::Executable => &self.exe_path,
        }
    }

    /// Absolute target rectangle on the given display.
    pub fn target_rect(&self, monitor: &Monitor) -> Rect {
        Rect::new(
            monitor.left + self.offset_x,
            monitor.top + self.offset_y,
            self.width,
            self.height,
        )
    }
}

impl fmt::Display for AppSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.match_type {
            MatchType::Title => f.write_str(&self.window_name),
            MatchType::Executable => f.write_str(
                self.exe_path
                    .rsplit(['\\', '/'])
                    .next()
                    .unwrap_or_default(),
            ),
        }
    }
}

impl Settings {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.refresh.interval_ms = self.refresh.interval_ms.clamp(100, 60_000);
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
    }

    /// Parses and validates a settings document.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let mut settings: Settings = toml::from_str(content).map_err(|e| e.to_string())?;
        settings.validate();
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| e.to_string())
    }
}
