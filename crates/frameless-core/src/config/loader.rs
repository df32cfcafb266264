use std::path::PathBuf;

use super::Settings;

/// Returns the config directory: `~/.config/frameless/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("frameless"))
}

/// Returns the config file path: `~/.config/frameless/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Settings)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Settings, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    Settings::from_toml(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the settings from disk, falling back to defaults.
///
/// A missing file silently yields defaults; other errors are logged.
pub fn load() -> Settings {
    if !config_path().is_some_and(|p| p.exists()) {
        return Settings::default();
    }
    match try_load() {
        Ok(settings) => settings,
        Err(e) => {
            crate::log_warn!("{e}");
            eprintln!("Warning: {e}");
            Settings::default()
        }
    }
}

/// Writes the whole settings document back to `config.toml`.
pub fn save(settings: &Settings) -> Result<(), String> {
    let dir = config_dir().ok_or("could not determine config directory")?;
    std::fs::create_dir_all(&dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    let path = dir.join("config.toml");
    let content = settings.to_toml()?;
    std::fs::write(&path, content).map_err(|e| format!("{}: {e}", path.display()))
}
