/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `frameless init` to create a starter file that users can
/// immediately edit.
pub fn generate_config() -> String {
    r##"# Frameless configuration
# Location: ~/.config/frameless/config.toml

[refresh]
# Milliseconds between window list refreshes.
interval_ms = 1000
# Also refresh immediately when windows open, close or change title.
event_hooks = true

# Starting values for new profiles.
[defaults]
# Display number (1 = first display). 0 picks the primary display.
Monitor = 0
# "title" matches the exact window title, "executable" the exact exe path.
MatchType = "title"
OffsetX = 0
OffsetY = 0
Width = 1920
Height = 1080

[logging]
# Enable file logging to ~/.config/frameless/logs/frameless.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10

# One [[app]] table per profile.
# [[app]]
# WindowName = "My Game"
# ExePath = 'C:\Games\MyGame\game.exe'
# Monitor = 1
# MatchType = "executable"
# OffsetX = 0
# OffsetY = 0
# Width = 2560
# Height = 1440
"##
    .to_string()
}
